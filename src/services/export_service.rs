use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use bytes::Bytes;
use tracing::{info, instrument};

use crate::error::Result;
use crate::services::gateway::Gateway;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Excel,
    Pdf,
}

impl ExportFormat {
    /// Path below the API base, e.g. `export/excel`.
    pub fn path_segments(&self) -> [&'static str; 2] {
        match self {
            ExportFormat::Excel => ["export", "excel"],
            ExportFormat::Pdf => ["export", "pdf"],
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "candidates.xlsx",
            ExportFormat::Pdf => "candidates.pdf",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Excel => f.write_str("excel"),
            ExportFormat::Pdf => f.write_str("pdf"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(format!("unknown export format '{}', expected excel or pdf", other)),
        }
    }
}

/// A downloaded report, kept in memory until saved.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub format: ExportFormat,
    pub content: Bytes,
}

impl ExportFile {
    pub fn file_name(&self) -> &'static str {
        self.format.file_name()
    }

    pub async fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(self.file_name());
        tokio::fs::write(&path, &self.content).await?;
        info!(path = %path.display(), bytes = self.content.len(), "Export saved");
        Ok(path)
    }
}

#[derive(Clone)]
pub struct ExportService {
    gateway: Gateway,
}

impl ExportService {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    #[instrument(skip(self))]
    pub async fn download(&self, format: ExportFormat) -> Result<ExportFile> {
        let content = self.gateway.download(&format.path_segments()).await?;
        Ok(ExportFile { format, content })
    }
}
