use std::fmt;

/// Opaque locator of a generated table, as returned by the service.
///
/// Never empty: a blank link from the service is treated as a failed
/// submission, not as a result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DownloadLink(String);

impl DownloadLink {
    pub fn parse(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DownloadLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
