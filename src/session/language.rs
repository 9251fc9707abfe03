use crate::common::errors::InvalidLanguage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language of the generated table's contents.
///
/// Sent to the service as the `tableLanguage` field. Not related to the
/// language the interface itself is displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutputLanguage {
    #[default]
    Eng,
    Rus,
}

impl OutputLanguage {
    pub const ALL: [OutputLanguage; 2] = [OutputLanguage::Eng, OutputLanguage::Rus];

    /// Wire value for the `tableLanguage` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputLanguage::Eng => "ENG",
            OutputLanguage::Rus => "RUS",
        }
    }
}

impl fmt::Display for OutputLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Exact match only: the service understands nothing but the two codes.
impl FromStr for OutputLanguage {
    type Err = InvalidLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ENG" => Ok(OutputLanguage::Eng),
            "RUS" => Ok(OutputLanguage::Rus),
            other => Err(InvalidLanguage(other.to_string())),
        }
    }
}
