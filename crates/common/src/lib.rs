//! Shared types used by every bouquet crate.
//!
//! # Invariants
//! - An empty [`Aabb`] reports zero size and a zero center.
//! - [`Transform::matrix`] composes as translation * rotation * scale.

pub mod bounds;
pub mod types;

pub use bounds::Aabb;
pub use types::Transform;
