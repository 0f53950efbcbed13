use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::FilenameError;

static FILENAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([^_./\\]+)_([^_./\\]+)_([^_./\\]+)\.([A-Za-z0-9]+)$")
        .expect("invalid image filename regex")
});

/// Whether a screenshot shows the genuine site or a phishing copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    /// Genuine site.
    Real,
    /// Phishing copy.
    Fake,
}

/// Parsed view of one catalog filename.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Image {
    filename: String,
    site: String,
    site_name: String,
    kind: ImageKind,
    difficulty: String,
}

impl Image {
    /// Parse `<type>_<site>_<difficulty>.<ext>`.
    pub fn parse(filename: &str) -> Result<Self, FilenameError> {
        let caps = FILENAME_RE
            .captures(filename)
            .ok_or_else(|| FilenameError::Malformed {
                filename: filename.to_string(),
            })?;

        let kind = match &caps[1] {
            "real" => ImageKind::Real,
            "fake" => ImageKind::Fake,
            other => {
                return Err(FilenameError::UnknownKind {
                    filename: filename.to_string(),
                    kind: other.to_string(),
                })
            }
        };
        let site = caps[2].to_string();

        Ok(Self {
            filename: filename.to_string(),
            site_name: capitalize(&site),
            site,
            kind,
            difficulty: caps[3].to_string(),
        })
    }

    /// Original filename, used for asset lookup and the used set.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Site token exactly as it appears in the filename. Pairs match on this.
    pub fn site(&self) -> &str {
        &self.site
    }

    /// Display name: the site token with its first letter upper-cased.
    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    /// Genuine or phishing.
    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    /// Shorthand for `kind() == ImageKind::Real`.
    pub fn is_real(&self) -> bool {
        self.kind == ImageKind::Real
    }

    /// Free-form difficulty label (`easy`, `hard`, ...).
    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
