use crate::Scanner;
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment};
use keystone_core::ProjectRoot;
use std::path::PathBuf;

/// A small facade for assembling the opinionated version of [`ConfigBuilder`].
pub struct Assembler;

/// A simple preference collection accepted by the [`Assembler`] facade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblerChoices {
    /// The directory against which a relative config directory is resolved.
    /// If absent, the [`ProjectRoot`] is resolved at assembly time.
    pub project_root: Option<PathBuf>,
    /// The dir name/path passed to the [`Scanner::find_config_files`] method.
    pub dir_name: Option<String>,
    /// Whether to add the [`Environment`] source to the [`ConfigBuilder`].
    pub env_enabled: bool,
    /// If given, defines the prefix to pass to the [`Environment::prefix`]
    /// method.
    pub env_prefix: Option<String>,
    /// If given, defines which separator to pass to the
    /// [`Environment::separator`] method.
    pub env_separator: Option<String>,
}

impl Default for AssemblerChoices {
    fn default() -> Self {
        Self {
            project_root: None,
            dir_name: Some("config".to_string()),
            env_enabled: true,
            env_prefix: Some("APP".to_string()),
            env_separator: Some("_".to_string()),
        }
    }
}

impl Assembler {
    /// Creates and returns the opinionated [`ConfigBuilder`]: every scanned
    /// config file in precedence order, followed by the environment source
    /// (if enabled), which overrides them all.
    pub fn make_builder(choices: &AssemblerChoices) -> ConfigBuilder<DefaultState> {
        let mut builder = ConfigBuilder::<DefaultState>::default();

        let project_root = match choices.project_root {
            Some(ref root) => root.clone(),
            None => ProjectRoot::resolve().unwrap_or_default(),
        };

        // Find and add all config files as sources
        for config_file in Scanner::find_config_files(&project_root, choices.dir_name.as_deref()) {
            builder = builder.add_source(config::File::from(config_file));
        }

        // Conditionally add an environment-based source
        if choices.env_enabled {
            let mut env_source = Environment::default();

            if let Some(prefix) = choices.env_prefix.as_deref() {
                env_source = env_source.prefix(prefix);
            }

            if let Some(separator) = choices.env_separator.as_deref() {
                env_source = env_source.separator(separator);
            }

            builder = builder.add_source(env_source);
        }

        builder
    }
}
