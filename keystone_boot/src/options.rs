use serde::Deserialize;
use std::path::PathBuf;

/// Options of an artifact booter: where to look for artifact files and which
/// files to pick.
///
/// Every option is optional so that partial overrides can be
/// [merged](ArtifactOptions::merged_over) over a booter’s defaults key by key.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ArtifactOptions {
    /// Directories to search, in order. Relative directories are resolved
    /// against the project root.
    pub dirs: Option<Vec<String>>,

    /// File name suffixes to match, such as `.script.toml`.
    #[serde(alias = "extension")]
    pub extensions: Option<Vec<String>>,

    /// Whether to search the directories recursively.
    #[serde(alias = "recursive")]
    pub nested: Option<bool>,
}

impl ArtifactOptions {
    /// Sets the directories to search.
    pub fn with_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dirs = Some(dirs.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the file name suffixes to match.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = Some(extensions.into_iter().map(Into::into).collect());
        self
    }

    /// Sets whether to search recursively.
    pub fn with_nested(mut self, nested: bool) -> Self {
        self.nested = Some(nested);
        self
    }

    /// Returns these options with every unset key taken from `defaults`.
    pub fn merged_over(self, defaults: &ArtifactOptions) -> Self {
        Self {
            dirs: self.dirs.or_else(|| defaults.dirs.clone()),
            extensions: self.extensions.or_else(|| defaults.extensions.clone()),
            nested: self.nested.or(defaults.nested),
        }
    }
}

impl ArtifactOptions {
    /// Reports the directories to search; empty if unset.
    pub fn dirs(&self) -> &[String] {
        self.dirs.as_deref().unwrap_or_default()
    }

    /// Reports the file name suffixes to match; empty if unset.
    pub fn extensions(&self) -> &[String] {
        self.extensions.as_deref().unwrap_or_default()
    }

    /// Reports whether to search recursively; `false` if unset.
    pub fn nested(&self) -> bool {
        self.nested.unwrap_or(false)
    }
}

/// The `boot` section of the application configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BootOptions {
    /// Overrides the resolved [project root](keystone_core::ProjectRoot).
    #[serde(alias = "projectRoot")]
    pub project_root: Option<PathBuf>,

    /// Overrides for the
    /// [lifecycle script booter](crate::LifecycleScriptBooter).
    pub scripts: ArtifactOptions,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn merge_is_key_by_key() {
        // Given
        let defaults = ArtifactOptions::default()
            .with_dirs(["scripts"])
            .with_extensions([".script.toml"])
            .with_nested(true);
        let overrides = ArtifactOptions::default().with_nested(false);

        // When
        let merged = overrides.merged_over(&defaults);

        // Then
        assert_eq!(merged.dirs(), ["scripts".to_string()]);
        assert_eq!(merged.extensions(), [".script.toml".to_string()]);
        assert!(!merged.nested());
    }

    #[test]
    fn from_yaml() {
        // Given
        let input = r#"
project_root: /srv/app
scripts:
  dirs: [lifecycle]
  recursive: false
"#;

        // When
        let options = serde_yml::from_str::<BootOptions>(input).unwrap();

        // Then
        assert_eq!(
            options,
            BootOptions {
                project_root: Some(PathBuf::from("/srv/app")),
                scripts: ArtifactOptions::default()
                    .with_dirs(["lifecycle"])
                    .with_nested(false),
            },
        );
    }

    #[test]
    fn from_empty() {
        assert_eq!(
            serde_yml::from_str::<BootOptions>("{}").unwrap(),
            BootOptions::default(),
        );
    }
}
