use std::path::Path;

use crate::AssetError;

/// Sorted entry names of `dir`. Directories carry a trailing `/`.
pub fn list_directory(dir: impl AsRef<Path>) -> Result<Vec<String>, AssetError> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir.as_ref())? {
        let entry = entry?;
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type()?.is_dir() {
            name.push('/');
        }
        names.push(name);
    }
    names.sort();
    Ok(names)
}

/// Log what actually sits next to an asset that failed to load.
///
/// Purely diagnostic: the result never feeds back into loading.
pub fn log_directory_listing(asset_path: &Path) {
    let dir = match asset_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    match list_directory(dir) {
        Ok(names) => {
            tracing::debug!(dir = %dir.display(), entries = names.len(), "asset directory listing");
            for name in names {
                tracing::debug!("  {name}");
            }
        }
        Err(e) => {
            tracing::warn!(dir = %dir.display(), "could not list asset directory: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_is_sorted_and_marks_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.glb"), b"").unwrap();
        std::fs::write(dir.path().join("a.gltf"), b"").unwrap();
        std::fs::create_dir(dir.path().join("textures")).unwrap();

        let names = list_directory(dir.path()).unwrap();
        assert_eq!(names, vec!["a.gltf", "b.glb", "textures/"]);
    }

    #[test]
    fn listing_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_directory(dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, AssetError::Io(_)));
    }

    #[test]
    fn logging_never_panics_on_bare_file_names() {
        log_directory_listing(Path::new("lily.glb"));
        log_directory_listing(Path::new("/definitely/not/here/lily.glb"));
    }
}
