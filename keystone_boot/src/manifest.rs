use crate::LoadError;
use config::Config;
use keystone_config::ConfigFile;
use serde::Deserialize;
use std::path::Path;

/// The content of a script artifact: the names of the classes it exports.
///
/// The format is chosen by the final extension of the file name, so both
/// `warmer.script.toml` and `warmer.script.yaml` are valid artifacts.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct ScriptManifest {
    /// Exported class names, in declaration order.
    #[serde(default)]
    pub exports: Vec<String>,
}

impl ScriptManifest {
    /// Reads and parses the manifest at the given path.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let file = ConfigFile::try_at(path.to_path_buf()).ok_or(LoadError::UnsupportedFormat)?;

        let manifest = Config::builder()
            .add_source(config::File::from(file))
            .build()?
            .try_deserialize()?;

        Ok(manifest)
    }
}
