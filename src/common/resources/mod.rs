//! # Resource definitions for model weights and vocabularies
//!
//! Model artifacts (TorchScript weights, vocabulary files) are accessed
//! through the [`ResourceProvider`] trait, which abstracts over where a file
//! lives. Two providers are available:
//! - [`LocalResource`]: points to a file on the local filesystem;
//! - [`RemoteResource`] _(feature `remote`)_: points to a file behind a URL,
//!   downloaded and cached locally on first access.

mod local;

use std::path::PathBuf;

use crate::common::error::MirrorBertError;
pub use local::LocalResource;

/// # Resource Trait that can provide the location of a model artifact
pub trait ResourceProvider {
    /// Provides the local path for a resource.
    ///
    /// # Returns
    ///
    /// * `PathBuf` pointing to the resource file
    fn get_local_path(&self) -> Result<PathBuf, MirrorBertError>;
}

#[cfg(feature = "remote")]
mod remote;
#[cfg(feature = "remote")]
pub use remote::RemoteResource;
