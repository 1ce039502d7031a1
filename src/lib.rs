pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod github;
pub mod notes;
pub mod publish;
pub mod title;
pub mod ui;
pub mod version;

pub use error::{ReleaseError, Result};
