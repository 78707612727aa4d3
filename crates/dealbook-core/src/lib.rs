pub mod company;
pub mod id;
pub mod level;

// Re-export commonly used types
pub use company::{Company, CompanyDraft, CompanyPatch};
pub use id::CompanyId;
pub use level::{level_for, CANONICAL_LEVELS};
