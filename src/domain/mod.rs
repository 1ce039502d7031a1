//! Domain logic - pure release rules independent of git and GitHub

pub mod dependency;
pub mod tag;

pub use dependency::{DependencyUpdate, LATEST, UNKNOWN};
pub use tag::ReleaseTag;
