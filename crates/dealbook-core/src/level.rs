//! Investment-level derivation from numeric scores.
//!
//! The level label is derived state: recomputed whenever a record's score
//! changes, persisted alongside the score, and overridable only at creation.
//! Labels stay plain strings on the record itself because legacy documents
//! carry labels outside this table (letter grades from an older deployment);
//! this module is the single source of the canonical mapping.

/// Score 0-25.
pub const LEVEL_AVOID: &str = "不建议投资";
/// Score 26-50.
pub const LEVEL_HIGH_RISK: &str = "高风险";
/// Score 51-75.
pub const LEVEL_CAUTION: &str = "谨慎投资";
/// Score 76-100.
pub const LEVEL_WORTH: &str = "值得投资";
/// Any score outside 0-100.
pub const LEVEL_UNKNOWN: &str = "未知";

/// The four in-range labels, in the order statistics buckets are seeded.
pub const CANONICAL_LEVELS: [&str; 4] =
    [LEVEL_WORTH, LEVEL_CAUTION, LEVEL_HIGH_RISK, LEVEL_AVOID];

/// Maps an investment score to its level label.
///
/// The four bands are inclusive on both ends and partition 0..=100 with no
/// gap or overlap; anything outside that domain maps to [`LEVEL_UNKNOWN`].
pub fn level_for(score: i64) -> &'static str {
    match score {
        0..=25 => LEVEL_AVOID,
        26..=50 => LEVEL_HIGH_RISK,
        51..=75 => LEVEL_CAUTION,
        76..=100 => LEVEL_WORTH,
        _ => LEVEL_UNKNOWN,
    }
}
