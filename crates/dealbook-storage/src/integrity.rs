//! Checksums and structural validation for persisted data.

use dealbook_core::Company;

use crate::document::Document;

/// Checksum of a company list, as a lowercase hex string.
///
/// Computed over the serialized JSON of the list, so any field change in
/// any record produces a different digest.
pub fn companies_checksum(companies: &[Company]) -> String {
    let bytes = serde_json::to_vec(companies).expect("company serialization should never fail");
    blake3::hash(&bytes).to_hex().to_string()
}

/// A record is structurally valid when it has a non-empty id and name.
pub fn record_is_valid(company: &Company) -> bool {
    !company.id.as_str().is_empty() && !company.name.is_empty()
}

/// A document is structurally valid when every record is.
pub fn document_is_valid(document: &Document) -> bool {
    document.companies.iter().all(record_is_valid)
}

/// Whether the document's stored checksum matches its contents.
///
/// An empty checksum never verifies.
pub fn checksum_matches(document: &Document) -> bool {
    !document.checksum.is_empty() && document.checksum == companies_checksum(&document.companies)
}
