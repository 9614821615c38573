//! Asset loading: glTF/GLB import into CPU-side model data.
//!
//! A model is fetched once, off the render thread, and handed back through a
//! single completion callback. The renderer consumes [`ModelData`], never raw
//! glTF documents.
//!
//! # Invariants
//! - Node transforms are baked into vertex data; [`ModelData::bounds`] is in
//!   model space.
//! - An [`AssetRequest`] completes exactly once.

mod diagnostics;
mod import;
mod model;
mod request;

use std::time::Duration;

pub use import::import_model;
pub use model::{Material, MeshPrimitive, ModelData};
pub use request::{AssetRequest, LoadOutcome};

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("glTF error: {0}")]
    Gltf(#[from] gltf::Error),
    #[error("glTF document has no scene")]
    NoScene,
    #[error("asset load timed out after {0:?}")]
    TimedOut(Duration),
    #[error("asset loader thread exited without a result")]
    WorkerLost,
}

pub fn crate_info() -> &'static str {
    "bouquet-assets v0.1.0"
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::path::PathBuf;

    /// One triangle (0,0,0) (2,0,0) (0,4,0), little-endian f32.
    const TRIANGLE_BASE64: &str = "AAAAAAAAAAAAAAAAAAAAQAAAAAAAAAAAAAAAAAAAgEAAAAAA";

    /// Two instances of the triangle: a root at (1,1,1) and its child at
    /// (0,0,-2) relative to the root.
    pub fn two_node_gltf() -> String {
        format!(
            r#"{{
  "asset": {{ "version": "2.0" }},
  "scene": 0,
  "scenes": [ {{ "nodes": [0] }} ],
  "nodes": [
    {{ "name": "root", "mesh": 0, "translation": [1.0, 1.0, 1.0], "children": [1] }},
    {{ "name": "child", "mesh": 0, "translation": [0.0, 0.0, -2.0] }}
  ],
  "meshes": [
    {{ "name": "petal", "primitives": [ {{ "attributes": {{ "POSITION": 0 }}, "material": 0 }} ] }}
  ],
  "materials": [
    {{ "name": "pink", "pbrMetallicRoughness": {{ "baseColorFactor": [1.0, 0.7, 0.75, 1.0] }} }}
  ],
  "accessors": [
    {{ "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
       "min": [0.0, 0.0, 0.0], "max": [2.0, 4.0, 0.0] }}
  ],
  "bufferViews": [ {{ "buffer": 0, "byteOffset": 0, "byteLength": 36 }} ],
  "buffers": [
    {{ "byteLength": 36, "uri": "data:application/octet-stream;base64,{TRIANGLE_BASE64}" }}
  ]
}}"#
        )
    }

    /// A valid document whose only node carries no mesh.
    pub fn empty_scene_gltf() -> &'static str {
        r#"{
  "asset": { "version": "2.0" },
  "scene": 0,
  "scenes": [ { "nodes": [0] } ],
  "nodes": [ { "name": "empty" } ]
}"#
    }

    pub fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }
}
