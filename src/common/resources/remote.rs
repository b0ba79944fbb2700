use std::path::PathBuf;

use cached_path::{Cache, Options, ProgressBar};
use dirs::cache_dir;
use lazy_static::lazy_static;

use crate::common::error::MirrorBertError;
use crate::resources::ResourceProvider;

/// # Remote resource that will be downloaded and cached locally on demand
#[derive(PartialEq, Clone)]
pub struct RemoteResource {
    /// Remote path/url for the resource
    pub url: String,
    /// Local subdirectory of the cache root where this resource is saved
    pub cache_subdir: String,
}

impl RemoteResource {
    /// Creates a new RemoteResource from an URL and a cache subdirectory. Note
    /// that this does not download the resource (only declares the remote and
    /// local locations).
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mirror_bert::resources::RemoteResource;
    /// let vocab_resource = RemoteResource::new(
    ///     "https://huggingface.co/cambridgeltl/mirror-bert-base-uncased-sentence/resolve/main/vocab.txt",
    ///     "cambridgeltl/mirror-bert-base-uncased-sentence",
    /// );
    /// ```
    pub fn new(url: &str, cache_subdir: &str) -> RemoteResource {
        RemoteResource {
            url: url.to_string(),
            cache_subdir: cache_subdir.to_string(),
        }
    }
}

impl ResourceProvider for RemoteResource {
    /// Gets the local path for a remote resource. The remote resource is
    /// downloaded and cached, then the path to the local cache is returned.
    fn get_local_path(&self) -> Result<PathBuf, MirrorBertError> {
        let cached_path = CACHE
            .cached_path_with_options(&self.url, &Options::default().subdir(&self.cache_subdir))?;
        Ok(cached_path)
    }
}

lazy_static! {
    #[derive(Copy, Clone, Debug)]
/// # Global cache directory
/// If the environment variable `MIRROR_BERT_CACHE` is set, will save the cached
/// model files at that location. Otherwise defaults to
/// `$XDG_CACHE_HOME/.mirror-bert`, or the corresponding user cache for the
/// current system.
    pub static ref CACHE: Cache = Cache::builder()
        .dir(_get_cache_directory())
        .progress_bar(Some(ProgressBar::Light))
        .build().unwrap();
}

fn _get_cache_directory() -> PathBuf {
    match std::env::var("MIRROR_BERT_CACHE") {
        Ok(value) => PathBuf::from(value),
        Err(_) => {
            let mut home = cache_dir().unwrap();
            home.push(".mirror-bert");
            home
        }
    }
}
