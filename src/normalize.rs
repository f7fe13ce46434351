//! Text normalization for location tokens and ZIP codes
//!
//! All location comparisons in the service happen on [`NormalizedToken`]s,
//! which are only ever produced by [`sanitize`].

use serde::Serialize;
use std::fmt;

/// Shortest ZIP token accepted by [`validate_zip`]
pub const ZIP_MIN_LEN: usize = 3;
/// Longest ZIP token accepted by [`validate_zip`]
pub const ZIP_MAX_LEN: usize = 10;

/// Lowercased, trimmed text restricted to ASCII letters, digits, `_`, `-`
/// and whitespace
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NormalizedToken(String);

impl NormalizedToken {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `None` for the empty token
    #[must_use]
    pub fn non_empty(self) -> Option<Self> {
        if self.is_empty() { None } else { Some(self) }
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A [`NormalizedToken`] that passed [`validate_zip`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZipToken(NormalizedToken);

impl ZipToken {
    /// Accept `token` if it has the shape of a postal code
    #[must_use]
    pub fn parse(token: NormalizedToken) -> Option<Self> {
        validate_zip(&token).then_some(Self(token))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ZipToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_kept(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || c.is_whitespace()
}

/// Canonicalize free text: drop disallowed characters, trim, lowercase
#[must_use]
pub fn sanitize(raw: &str) -> NormalizedToken {
    let kept: String = raw.chars().filter(|&c| is_kept(c)).collect();
    NormalizedToken(kept.trim().to_ascii_lowercase())
}

/// Like [`sanitize`], absent input yields the empty token
#[must_use]
pub fn sanitize_optional(raw: Option<&str>) -> NormalizedToken {
    raw.map(sanitize).unwrap_or_default()
}

/// Syntactic postal-code check: 3 to 10 ASCII alphanumerics or hyphens.
///
/// A pass says nothing about whether the code exists.
#[must_use]
pub fn validate_zip(token: &NormalizedToken) -> bool {
    let len = token.as_str().chars().count();
    (ZIP_MIN_LEN..=ZIP_MAX_LEN).contains(&len)
        && token
            .as_str()
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}
