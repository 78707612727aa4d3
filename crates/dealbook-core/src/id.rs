//! Stable ID newtype for company records.
//!
//! Record ids are opaque strings assigned at creation (caller-supplied or
//! generated) and never reassigned. Wrapping them in a newtype keeps ids
//! from being confused with other string fields at the type level.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque company identifier. Serializes as a plain JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanyId(pub String);

impl CompanyId {
    /// Borrows the raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CompanyId {
    fn from(raw: String) -> Self {
        CompanyId(raw)
    }
}

impl From<&str> for CompanyId {
    fn from(raw: &str) -> Self {
        CompanyId(raw.to_string())
    }
}
