use std::path::PathBuf;

use thiserror::Error;

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("no documents in 'campana' for campanaID '{0}'")]
    CampaignNotFound(String),

    #[error("file does not exist: {0}")]
    FileNotFound(String),

    #[error("template workbook not found: {}", .0.display())]
    TemplateMissing(PathBuf),

    #[error("document store error: {0}")]
    Store(String),

    #[error("workbook error: {0}")]
    Workbook(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// True for failures that surface to the caller as HTTP 404.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ExportError::CampaignNotFound(_) | ExportError::FileNotFound(_)
        )
    }
}
