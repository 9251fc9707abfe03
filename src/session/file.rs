//! Report files picked by the user.

use anyhow::{Context, Result};
use std::fmt;
use std::path::Path;

/// Extensions offered by the file picker. Informational only: content is
/// never inspected.
pub const ACCEPTED_EXTENSIONS: [&str; 2] = ["xml", "pdf"];

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// A scanner report held in memory: payload, file name and declared media type.
#[derive(Clone, PartialEq, Eq)]
pub struct ReportFile {
    name: String,
    media_type: String,
    bytes: Vec<u8>,
}

impl ReportFile {
    /// Build a report with the media type inferred from the file name.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let media_type = media_type_for(&name).to_string();
        Self {
            name,
            media_type,
            bytes,
        }
    }

    pub fn with_media_type(
        name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Read a report from disk. Only the final path component is kept as the name.
    #[tracing::instrument(skip_all, fields(path = %path.display()))]
    pub async fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("Report path has no file name: {}", path.display()))?
            .to_string();

        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read report file {}", path.display()))?;

        tracing::debug!("Loaded report '{}' ({} bytes)", name, bytes.len());
        Ok(Self::new(name, bytes))
    }

    /// Whether the picker filter (`.xml`, `.pdf`) would offer this name.
    pub fn is_accepted_name(name: &str) -> bool {
        extension(name)
            .map(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Reports can be megabytes of XML; keep them out of debug logs.
impl fmt::Debug for ReportFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportFile")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

fn media_type_for(name: &str) -> &'static str {
    match extension(name).as_deref() {
        Some("xml") => "application/xml",
        Some("pdf") => "application/pdf",
        _ => FALLBACK_MEDIA_TYPE,
    }
}
