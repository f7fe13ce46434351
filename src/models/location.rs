//! Location model for resolved postal codes

use serde::Serialize;

use crate::normalize::NormalizedToken;

/// Country and town a ZIP code resolved to. Either may be empty, not both.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub country: NormalizedToken,
    pub town: NormalizedToken,
}

impl ResolvedLocation {
    #[must_use]
    pub fn new(country: NormalizedToken, town: NormalizedToken) -> Self {
        Self { country, town }
    }
}
