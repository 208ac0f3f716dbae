//! Results Loader
//!
//! Reads one JSON result file per revision and combines them in the order the
//! revisions were requested.

use crate::config::InputConfig;
use benchtable_core::{CombinedResults, RevisionResult, StatError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures while reading result files
#[derive(Debug, Error)]
pub enum LoadError {
    /// No file exists for a requested revision
    #[error("No results for revision '{rev}': {} not found", path.display())]
    NotFound {
        /// Revision label
        rev: String,
        /// Expected file location
        path: PathBuf,
    },

    /// The file exists but could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File location
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON
    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        /// File location
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// The JSON does not have the result shape
    #[error("Unexpected result layout in {}: {source}", path.display())]
    Layout {
        /// File location
        path: PathBuf,
        /// Underlying shape error
        #[source]
        source: StatError,
    },
}

/// Locates and parses result files
#[derive(Debug, Clone)]
pub struct ResultsLoader {
    directory: PathBuf,
    input: InputConfig,
}

impl ResultsLoader {
    /// Loader reading from `directory` with the naming pattern in `input`
    pub fn new(directory: impl Into<PathBuf>, input: InputConfig) -> Self {
        Self {
            directory: directory.into(),
            input,
        }
    }

    /// Path of the result file for one revision
    pub fn path_for(&self, package: &str, rev: &str) -> PathBuf {
        self.directory.join(self.input.file_name(package, rev))
    }

    /// Load the results of one revision
    pub fn load_revision(&self, package: &str, rev: &str) -> Result<RevisionResult, LoadError> {
        let path = self.path_for(package, rev);
        if !path.exists() {
            return Err(LoadError::NotFound {
                rev: rev.to_string(),
                path,
            });
        }

        let result = read_result_file(&path)?;
        tracing::debug!(
            rev,
            path = %path.display(),
            benchmarks = result.len(),
            "loaded results"
        );
        Ok(result)
    }

    /// Load every revision, keeping the requested order
    pub fn load_results(
        &self,
        package: &str,
        revisions: &[String],
    ) -> Result<CombinedResults, LoadError> {
        revisions
            .iter()
            .map(|rev| {
                self.load_revision(package, rev)
                    .map(|result| (rev.clone(), result))
            })
            .collect()
    }
}

/// Parse one result file
pub fn read_result_file(path: &Path) -> Result<RevisionResult, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    RevisionResult::from_json(value).map_err(|source| LoadError::Layout {
        path: path.to_path_buf(),
        source,
    })
}

/// Load results for `revisions` of `package` from `directory` using the default naming pattern
pub fn load_results(
    package: &str,
    revisions: &[String],
    directory: impl Into<PathBuf>,
) -> Result<CombinedResults, LoadError> {
    ResultsLoader::new(directory, InputConfig::default()).load_results(package, revisions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchtable_core::Stat;

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_load_in_requested_order() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "results_Pkg@main.json",
            r#"{"b": {"median": 1.0}, "a": {"median": 2.0}}"#,
        );
        write(dir.path(), "results_Pkg@dirty.json", r#"{"a": 3.0, "c": null}"#);

        let revs = vec!["dirty".to_string(), "main".to_string()];
        let combined = load_results("Pkg", &revs, dir.path()).unwrap();

        assert_eq!(combined.labels().collect::<Vec<_>>(), vec!["dirty", "main"]);
        let dirty = combined.get("dirty").unwrap();
        assert_eq!(dirty.get("a"), Some(&Stat::Scalar(3.0)));
        assert_eq!(dirty.get("c"), Some(&Stat::Missing));
        assert_eq!(
            combined.get("main").unwrap().names().collect::<Vec<_>>(),
            vec!["b", "a"]
        );
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_results("Pkg", &["v1".to_string()], dir.path()).unwrap_err();
        match err {
            LoadError::NotFound { rev, path } => {
                assert_eq!(rev, "v1");
                assert!(path.ends_with("results_Pkg@v1.json"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_json_and_layout() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "results_Pkg@bad.json", "{not json");
        write(dir.path(), "results_Pkg@list.json", "[1, 2, 3]");

        assert!(matches!(
            load_results("Pkg", &["bad".to_string()], dir.path()),
            Err(LoadError::Json { .. })
        ));
        assert!(matches!(
            load_results("Pkg", &["list".to_string()], dir.path()),
            Err(LoadError::Layout { .. })
        ));
    }

    #[test]
    fn test_custom_pattern() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "pkg-v2.json", r#"{"x": {"median": 0.5}}"#);

        let loader = ResultsLoader::new(
            dir.path(),
            InputConfig {
                directory: String::new(),
                file_pattern: "{package}-{rev}.json".to_string(),
            },
        );
        let result = loader.load_revision("pkg", "v2").unwrap();
        assert_eq!(result.len(), 1);
    }
}
