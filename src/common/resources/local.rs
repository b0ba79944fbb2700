use std::path::PathBuf;

use crate::common::error::MirrorBertError;
use crate::resources::ResourceProvider;

/// # Local resource
#[derive(PartialEq, Clone)]
pub struct LocalResource {
    /// Local path for the resource
    pub local_path: PathBuf,
}

impl ResourceProvider for LocalResource {
    /// Gets the path for a local resource.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mirror_bert::resources::{LocalResource, ResourceProvider};
    /// use std::path::PathBuf;
    /// let weights_resource = LocalResource {
    ///     local_path: PathBuf::from("path/to/model.pt"),
    /// };
    /// let weights_path = weights_resource.get_local_path();
    /// ```
    fn get_local_path(&self) -> Result<PathBuf, MirrorBertError> {
        Ok(self.local_path.clone())
    }
}

impl From<PathBuf> for LocalResource {
    fn from(local_path: PathBuf) -> Self {
        LocalResource { local_path }
    }
}
