use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// File-name suffixes whose content is concatenated into the export.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".html", ".css", ".js", ".md"];

/// Directory names pruned from the walk.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &[".git", "node_modules", "__pycache__"];

/// Name of the export file written into the root directory.
pub const DEFAULT_OUTPUT_FILE: &str = "SFT_Console_Full_Context.txt";

/// Configuration for an export run.
///
/// Use [`Config::builder()`] to construct a new configuration.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Config {
    /// Root directory to walk
    pub root_dir: PathBuf,

    /// Destination of the export
    pub output_path: PathBuf,

    /// Suffixes selecting files for the content section, in order
    pub extensions: Vec<String>,

    /// Directory basenames never descended into
    pub exclude_dirs: BTreeSet<String>,

    /// File names never concatenated, even when their suffix matches
    pub self_exclude: BTreeSet<String>,
}

impl Config {
    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use context_export::Config;
    ///
    /// let config = Config::builder()
    ///     .root_dir("./site")
    ///     .build()
    ///     .expect("valid configuration");
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Root directory doesn't exist or is not a directory
    /// - The extension list is empty or contains an empty suffix
    /// - The output path has no file name
    pub fn validate(&self) -> Result<()> {
        if !self.root_dir.exists() {
            return Err(Error::config(format!(
                "Root directory does not exist: {}",
                self.root_dir.display()
            )));
        }

        if !self.root_dir.is_dir() {
            return Err(Error::config(format!(
                "Root path is not a directory: {}",
                self.root_dir.display()
            )));
        }

        if self.extensions.is_empty() {
            return Err(Error::config("at least one extension is required"));
        }

        if self.extensions.iter().any(String::is_empty) {
            return Err(Error::config("extensions must not be empty strings"));
        }

        if self.output_file_name().is_none() {
            return Err(Error::config(format!(
                "Output path has no file name: {}",
                self.output_path.display()
            )));
        }

        Ok(())
    }

    /// Returns the bare file name of the output path.
    #[must_use]
    pub fn output_file_name(&self) -> Option<&str> {
        self.output_path.file_name().and_then(|name| name.to_str())
    }

    /// Returns true if a directory with this basename is pruned.
    #[must_use]
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.exclude_dirs.contains(name)
    }

    /// Returns true if a file with this name belongs in the content section.
    ///
    /// Matching is a case-sensitive suffix test on the whole name, so
    /// `archive.min.js` qualifies and `README.MD` does not.
    #[must_use]
    pub fn is_content_file(&self, name: &str) -> bool {
        !self.self_exclude.contains(name)
            && self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }
}

impl Default for Config {
    fn default() -> Self {
        let root_dir = PathBuf::from(".");
        let output_path = root_dir.join(DEFAULT_OUTPUT_FILE);
        Self {
            root_dir,
            output_path,
            extensions: to_owned_list(DEFAULT_EXTENSIONS),
            exclude_dirs: to_owned_list(DEFAULT_EXCLUDE_DIRS),
            self_exclude: BTreeSet::from([DEFAULT_OUTPUT_FILE.to_string()]),
        }
    }
}

fn to_owned_list<C: FromIterator<String>>(items: &[&str]) -> C {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Builder for creating a [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    root_dir: Option<PathBuf>,
    output_path: Option<PathBuf>,
    extensions: Option<Vec<String>>,
    exclude_dirs: Option<BTreeSet<String>>,
    self_exclude: BTreeSet<String>,
}

impl ConfigBuilder {
    /// Sets the root directory to walk.
    #[must_use]
    pub fn root_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.root_dir = Some(path.into());
        self
    }

    /// Sets the output file path.
    ///
    /// Defaults to [`DEFAULT_OUTPUT_FILE`] inside the root directory.
    #[must_use]
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Replaces the extension allow-list.
    #[must_use]
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = Some(extensions.into_iter().map(Into::into).collect());
        self
    }

    /// Replaces the set of pruned directory names.
    #[must_use]
    pub fn exclude_dirs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_dirs = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Adds a file name that must never be concatenated.
    ///
    /// The output file name is always excluded; this is for extra names such
    /// as the exporter's own program file.
    #[must_use]
    pub fn self_exclude(mut self, name: impl Into<String>) -> Self {
        self.self_exclude.insert(name.into());
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn build(self) -> Result<Config> {
        let root_dir = self.root_dir.unwrap_or_else(|| PathBuf::from("."));
        let output_path = self
            .output_path
            .unwrap_or_else(|| default_output_path(&root_dir));

        let mut self_exclude = self.self_exclude;
        if let Some(name) = output_path.file_name().and_then(|n| n.to_str()) {
            self_exclude.insert(name.to_string());
        }

        let config = Config {
            root_dir,
            output_path,
            extensions: self
                .extensions
                .unwrap_or_else(|| to_owned_list(DEFAULT_EXTENSIONS)),
            exclude_dirs: self
                .exclude_dirs
                .unwrap_or_else(|| to_owned_list(DEFAULT_EXCLUDE_DIRS)),
            self_exclude,
        };

        config.validate()?;
        Ok(config)
    }
}

fn default_output_path(root: &Path) -> PathBuf {
    root.join(DEFAULT_OUTPUT_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let temp = assert_fs::TempDir::new().unwrap();
        let config = Config::builder().root_dir(temp.path()).build().unwrap();

        assert_eq!(config.extensions, vec![".html", ".css", ".js", ".md"]);
        assert!(config.is_excluded_dir(".git"));
        assert!(config.is_excluded_dir("node_modules"));
        assert!(config.is_excluded_dir("__pycache__"));
        assert_eq!(config.output_path, temp.path().join(DEFAULT_OUTPUT_FILE));
        assert!(config.self_exclude.contains(DEFAULT_OUTPUT_FILE));
    }

    #[test]
    fn test_invalid_root_dir() {
        let result = Config::builder()
            .root_dir("/nonexistent/path/that/should/not/exist")
            .build();

        assert!(result.unwrap_err().is_config());
    }

    #[test]
    fn test_root_must_be_directory() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.path().join("plain.txt");
        std::fs::write(&file, "x").unwrap();

        assert!(Config::builder().root_dir(&file).build().is_err());
    }

    #[test]
    fn test_empty_extensions_rejected() {
        let temp = assert_fs::TempDir::new().unwrap();

        let none: Vec<String> = Vec::new();
        assert!(
            Config::builder()
                .root_dir(temp.path())
                .extensions(none)
                .build()
                .is_err()
        );
        assert!(
            Config::builder()
                .root_dir(temp.path())
                .extensions([".md", ""])
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_custom_output_name_is_self_excluded() {
        let temp = assert_fs::TempDir::new().unwrap();
        let config = Config::builder()
            .root_dir(temp.path())
            .output_path(temp.path().join("bundle.md"))
            .self_exclude("context-export")
            .build()
            .unwrap();

        assert!(!config.is_content_file("bundle.md"));
        assert!(!config.is_content_file("context-export"));
        assert!(config.is_content_file("other.md"));
    }

    #[test]
    fn test_suffix_matching_is_plain_and_case_sensitive() {
        let config = Config::default();

        assert!(config.is_content_file("index.html"));
        assert!(config.is_content_file("vendor.min.js"));
        assert!(config.is_content_file(".md"));
        assert!(!config.is_content_file("README.MD"));
        assert!(!config.is_content_file("notes.txt"));
        assert!(!config.is_content_file("page.htm"));
        assert!(!config.is_content_file(DEFAULT_OUTPUT_FILE));
    }
}
