use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("could not parse theme catalog\n{0}")]
    CatalogParse(String),
    #[error("failed to decode source image {path}\n{source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("failed to write output image {path}\n{reason}")]
    Encode { path: PathBuf, reason: String },
    #[error("failed to create output directory {path}\n{source}")]
    DirectoryCreate {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to load font {path}: {reason}")]
    Font { path: PathBuf, reason: String },
    #[error("failed to write batch report {path}\n{reason}")]
    ReportWrite { path: PathBuf, reason: String },
}

impl ThemeError {
    pub(crate) fn catalog(msg: impl Into<String>) -> Self {
        ThemeError::CatalogParse(msg.into())
    }

    /// Short machine-friendly name of the error kind, used in batch reports.
    pub fn kind(&self) -> &'static str {
        match self {
            ThemeError::CatalogParse(_) => "catalog",
            ThemeError::Decode { .. } => "decode",
            ThemeError::Encode { .. } => "encode",
            ThemeError::DirectoryCreate { .. } => "directory",
            ThemeError::Font { .. } => "font",
            ThemeError::ReportWrite { .. } => "report",
        }
    }
}
