use config::{File, FileFormat, FileSourceFile};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// Represents a single file in one of the supported configuration formats.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ConfigFile {
    /// A file like `app.toml`.
    Toml(PathBuf),

    /// A file like `app.yaml` / `app.yml`.
    Yaml(PathBuf),
}

impl ConfigFile {
    /// Creates a [`ConfigFile`] from the given [`PathBuf`], if the final
    /// extension of the file name is a supported one. Any preceding dots in
    /// the file name (e.g., `warmer.script.toml`) are irrelevant.
    ///
    /// Does not touch the filesystem.
    pub fn try_at(path: PathBuf) -> Option<Self> {
        let extension = path.extension().and_then(std::ffi::OsStr::to_str)?;

        if is_toml_extension(extension) {
            Some(Self::Toml(path))
        } else if is_yaml_extension(extension) {
            Some(Self::Yaml(path))
        } else {
            None
        }
    }
}

impl ConfigFile {
    /// Returns a reference to the internally held path.
    pub fn path(&self) -> &Path {
        match *self {
            Self::Toml(ref path) => path,
            Self::Yaml(ref path) => path,
        }
    }

    /// Returns the corresponding [`FileFormat`].
    pub fn format(&self) -> FileFormat {
        match *self {
            Self::Toml(_) => FileFormat::Toml,
            Self::Yaml(_) => FileFormat::Yaml,
        }
    }
}

impl PartialOrd for ConfigFile {
    /// Delegates to the [`Ord`] implementation.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ConfigFile {
    /// Orders by path alone, regardless of the format.
    fn cmp(&self, other: &Self) -> Ordering {
        self.path().cmp(other.path())
    }
}

/// Reports whether the given string slice is a recognized YAML extension.
fn is_yaml_extension(ext: &str) -> bool {
    ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml")
}

/// Reports whether the given string slice is a recognized TOML extension.
fn is_toml_extension(ext: &str) -> bool {
    ext.eq_ignore_ascii_case("toml")
}

impl From<ConfigFile> for PathBuf {
    fn from(file: ConfigFile) -> Self {
        match file {
            ConfigFile::Toml(path) => path,
            ConfigFile::Yaml(path) => path,
        }
    }
}

impl From<ConfigFile> for File<FileSourceFile, FileFormat> {
    fn from(file: ConfigFile) -> Self {
        let format = file.format();
        let path = PathBuf::from(file);

        File::from(path).format(format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn final_extension_decides() {
        assert_eq!(
            ConfigFile::try_at(PathBuf::from("warmer.script.toml")),
            Some(ConfigFile::Toml(PathBuf::from("warmer.script.toml"))),
        );
        assert_eq!(
            ConfigFile::try_at(PathBuf::from("app.YAML")),
            Some(ConfigFile::Yaml(PathBuf::from("app.YAML"))),
        );
        assert_eq!(ConfigFile::try_at(PathBuf::from("warmer.script.js")), None);
        assert_eq!(ConfigFile::try_at(PathBuf::from("toml")), None);
    }

    #[test]
    fn ordering_ignores_format() {
        // Given
        let mut files = vec![
            ConfigFile::Toml(PathBuf::from("b.toml")),
            ConfigFile::Yaml(PathBuf::from("a.yaml")),
        ];

        // When
        files.sort();

        // Then
        assert_eq!(files[0].path(), Path::new("a.yaml"));
    }
}
