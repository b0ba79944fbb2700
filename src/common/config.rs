use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

/// Utility to deserialize JSON configuration files.
pub trait Config
where
    Self: Sized,
    for<'de> Self: Deserialize<'de>,
{
    /// Loads a configuration file from a JSON file. Panics if the file cannot
    /// be opened or does not parse as the expected structure.
    fn from_file<P: AsRef<Path>>(path: P) -> Self {
        let f = File::open(path).expect("Could not open configuration file.");
        let br = BufReader::new(f);
        let config: Self = serde_json::from_reader(br).expect("could not parse configuration");
        config
    }
}
