//! JSON file persistence for the product-sales document

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use shared::{Document, DocumentError, LoadReport};
use thiserror::Error;

/// Persistence failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("could not read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },

    #[error("could not serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("could not write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result of reading the store at startup.
///
/// A failed read still yields a usable (empty) document; the failure is kept
/// in `warning` so it can be shown to the user.
#[derive(Debug)]
pub struct LoadOutcome {
    pub document: Document,
    pub report: LoadReport,
    pub warning: Option<StoreError>,
}

impl LoadOutcome {
    fn empty(warning: Option<StoreError>) -> Self {
        Self {
            document: Document::new(),
            report: LoadReport::default(),
            warning,
        }
    }
}

/// Whole-file JSON store. Every save rewrites the complete document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: Arc<PathBuf>,
    retention_days: u32,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>, retention_days: u32) -> Self {
        Self {
            path: Arc::new(path.into()),
            retention_days,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name offered when the document is downloaded
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| crate::config::DEFAULT_DATA_FILE.to_string())
    }

    /// Read the document.
    ///
    /// A missing or empty file is an empty document. Unreadable or corrupt
    /// content also yields an empty document, with the failure attached.
    pub async fn load(&self) -> LoadOutcome {
        let content = match tokio::fs::read_to_string(self.path.as_path()).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "No data file yet, starting empty");
                return LoadOutcome::empty(None);
            }
            Err(source) => {
                let err = StoreError::Read {
                    path: self.path.to_path_buf(),
                    source,
                };
                tracing::warn!("{}. Starting with an empty document", err);
                return LoadOutcome::empty(Some(err));
            }
        };

        match Document::from_json_str(&content) {
            Ok((document, report)) => {
                if report.dropped_entries > 0 || report.reset_histories > 0 || report.skipped_names > 0 {
                    tracing::debug!(?report, "Repaired malformed data while loading");
                }
                tracing::info!(
                    path = %self.path.display(),
                    products = report.products,
                    "Loaded sales data"
                );
                LoadOutcome {
                    document,
                    report,
                    warning: None,
                }
            }
            Err(source) => {
                let err = StoreError::Parse {
                    path: self.path.to_path_buf(),
                    source,
                };
                tracing::warn!("{}. Starting with an empty document", err);
                LoadOutcome::empty(Some(err))
            }
        }
    }

    /// Normalize the document against `today` and overwrite the file.
    ///
    /// Normalization (retention prune, newest-first sort) is applied to the
    /// in-memory document even when the write fails.
    pub async fn save(&self, document: &mut Document, today: NaiveDate) -> Result<(), StoreError> {
        let pruned = document.normalize(today, self.retention_days);
        if pruned > 0 {
            tracing::debug!(pruned, retention_days = self.retention_days, "Pruned expired sales");
        }

        let content = document.to_pretty_json()?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::Write {
                    path: self.path.to_path_buf(),
                    source,
                })?;
        }

        tokio::fs::write(self.path.as_path(), content)
            .await
            .map_err(|source| StoreError::Write {
                path: self.path.to_path_buf(),
                source,
            })?;

        tracing::debug!(path = %self.path.display(), products = document.len(), "Saved sales data");
        Ok(())
    }
}
