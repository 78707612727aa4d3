//! Company record types: the persisted record, the creation draft, and the
//! update patch.
//!
//! All three serialize in camelCase to match the persisted document format.
//! [`Company`] is a closed field set: unknown input fields are dropped at
//! the serde boundary rather than carried opaquely.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::id::CompanyId;
use crate::level::level_for;

/// One company record as persisted in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Opaque unique identifier, immutable once assigned.
    pub id: CompanyId,
    /// Display name; unique (case-sensitive exact match) across the set.
    pub name: String,
    /// Comma-separated business category tags.
    #[serde(default)]
    pub business: String,
    /// Integer score, observed domain 0-100.
    pub investment_score: i64,
    /// Derived label; recomputed on every score change. Plain string so
    /// legacy labels outside the canonical table survive round-trips.
    #[serde(default)]
    pub investment_level: String,
    /// Ordered favorable news items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorable_news: Option<Vec<String>>,
    /// Revenue by year label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<BTreeMap<String, f64>>,
    /// Free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<String>,
    /// Free text; older records use this field instead of `other`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// ISO-8601 stamp, set once at creation.
    #[serde(default)]
    pub created_at: String,
    /// ISO-8601 stamp, refreshed on every mutation.
    #[serde(default)]
    pub updated_at: String,
}

/// Input for creating a record. Carries no timestamps; the store stamps both.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDraft {
    /// Caller-supplied id; generated when absent or empty.
    #[serde(default)]
    pub id: Option<CompanyId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub business: String,
    /// Required at the store boundary; kept optional here so a missing
    /// score reports a validation error instead of a parse failure.
    #[serde(default)]
    pub investment_score: Option<i64>,
    /// Explicit level override; derived from the score when absent or empty.
    #[serde(default)]
    pub investment_level: Option<String>,
    #[serde(default)]
    pub favorable_news: Option<Vec<String>>,
    #[serde(default)]
    pub revenue: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub other: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Shallow-merge update patch: only fields present in the patch overwrite
/// the record. Ids and `createdAt` are not patchable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub business: Option<String>,
    #[serde(default)]
    pub investment_score: Option<i64>,
    #[serde(default)]
    pub investment_level: Option<String>,
    #[serde(default)]
    pub favorable_news: Option<Vec<String>>,
    #[serde(default)]
    pub revenue: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub other: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CompanyPatch {
    /// Overwrites the fields present in this patch onto `company`.
    ///
    /// A patched score always wins over a patched level: the label is
    /// derived state and is recomputed from the new score.
    pub fn apply_to(&self, company: &mut Company) {
        if let Some(name) = &self.name {
            company.name = name.clone();
        }
        if let Some(business) = &self.business {
            company.business = business.clone();
        }
        if let Some(news) = &self.favorable_news {
            company.favorable_news = Some(news.clone());
        }
        if let Some(revenue) = &self.revenue {
            company.revenue = Some(revenue.clone());
        }
        if let Some(other) = &self.other {
            company.other = Some(other.clone());
        }
        if let Some(notes) = &self.notes {
            company.notes = Some(notes.clone());
        }
        if let Some(score) = self.investment_score {
            company.investment_score = score;
            company.investment_level = level_for(score).to_string();
        } else if let Some(level) = &self.investment_level {
            company.investment_level = level.clone();
        }
    }
}
