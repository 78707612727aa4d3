//! Central store for company records.
//!
//! Every mutation funnels through an exclusive sentinel lock and ends in
//! an atomic write: the document is serialized to a sibling `.tmp` file,
//! then renamed over `companies.json`. Reads re-sync from disk first so
//! concurrent processes observe each other's writes. Batch and import
//! acquire the lock once and apply all their sub-operations in memory
//! before a single persist.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dealbook_core::{level_for, Company, CompanyDraft, CompanyId, CompanyPatch, CANONICAL_LEVELS};

use crate::backup::BackupManager;
use crate::clock::{Clock, SystemClock};
use crate::document::{self, Document, ExportDocument, DATA_VERSION};
use crate::error::StorageError;
use crate::lock::LockFile;

/// Data file name inside the data directory.
pub const DATA_FILE: &str = "companies.json";

/// Backup directory name inside the data directory.
pub const BACKUP_DIR: &str = "backups";

/// Lock sentinel name inside the data directory.
pub const LOCK_FILE: &str = ".lock";

/// Compare-selection sidecar name inside the data directory.
pub const COMPARE_FILE: &str = "compare.json";

/// File-backed store for company records.
///
/// Holds an in-memory copy of the record list and reconciles it with the
/// data file before every read and write, so the file on disk is the
/// source of truth and the last writer wins.
pub struct CompanyStore {
    data_file: PathBuf,
    compare_file: PathBuf,
    lock: LockFile,
    backup: BackupManager,
    clock: Arc<dyn Clock>,
    companies: Vec<Company>,
}

impl CompanyStore {
    /// Open the store rooted at `data_dir`, creating the directory
    /// layout and an empty data file when absent.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        Self::open_with_clock(data_dir, Arc::new(SystemClock))
    }

    /// Open the store with an injected timestamp source.
    pub fn open_with_clock(
        data_dir: impl AsRef<Path>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, StorageError> {
        let root = data_dir.as_ref();
        let backup_dir = root.join(BACKUP_DIR);
        fs::create_dir_all(&backup_dir)?;

        let data_file = root.join(DATA_FILE);
        let mut store = Self {
            compare_file: root.join(COMPARE_FILE),
            lock: LockFile::new(root.join(LOCK_FILE)),
            backup: BackupManager::new(data_file.clone(), backup_dir, clock.clone()),
            data_file,
            clock,
            companies: Vec::new(),
        };
        store.reload()?;
        Ok(store)
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    pub fn backup_manager(&self) -> &BackupManager {
        &self.backup
    }

    /// Reconcile the in-memory list with the data file.
    ///
    /// A missing data file is replaced with a persisted empty document.
    /// An unreadable or corrupt data file falls back to the newest usable
    /// backup, or to an empty list when none exists; the fallback is not
    /// written back until the next mutation.
    pub fn reload(&mut self) -> Result<(), StorageError> {
        if !self.data_file.exists() {
            tracing::info!(path = %self.data_file.display(), "data file missing, creating empty store");
            self.companies.clear();
            return self.save();
        }
        self.sync_from_disk()
    }

    fn sync_from_disk(&mut self) -> Result<(), StorageError> {
        match document::load(&self.data_file) {
            Ok(document) => {
                self.companies = document.companies;
                Ok(())
            }
            Err(StorageError::Io(err)) if err.kind() == ErrorKind::NotFound => {
                self.companies.clear();
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "data file unusable, attempting backup restore");
                match self.backup.restore_latest() {
                    Some(document) => self.companies = document.companies,
                    None => {
                        tracing::warn!("no usable backup, starting empty");
                        self.companies.clear();
                    }
                }
                Ok(())
            }
        }
    }

    /// Persist the in-memory list under the sentinel lock.
    pub fn save(&self) -> Result<(), StorageError> {
        let _guard = self.lock.acquire()?;
        self.persist()
    }

    /// Write the current list atomically. Caller holds the lock.
    fn persist(&self) -> Result<(), StorageError> {
        let document = Document::new(self.companies.clone(), self.clock.now_iso());
        let bytes = serde_json::to_vec_pretty(&document)?;

        let tmp = self.data_file.with_extension("json.tmp");
        let mut file = File::create(&tmp)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        fs::rename(&tmp, &self.data_file)?;

        tracing::debug!(
            path = %self.data_file.display(),
            companies = document.companies.len(),
            "data persisted"
        );
        Ok(())
    }

    /// All records, freshly reconciled with disk.
    pub fn all_companies(&mut self) -> Result<Vec<Company>, StorageError> {
        self.reload()?;
        Ok(self.companies.clone())
    }

    /// Single record lookup by id.
    pub fn company_by_id(&mut self, id: &CompanyId) -> Result<Company, StorageError> {
        self.reload()?;
        self.companies
            .iter()
            .find(|company| company.id == *id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound { id: id.clone() })
    }

    /// Add a record. The draft must carry a name and an investment score;
    /// id and level are derived when absent.
    pub fn add_company(&mut self, draft: CompanyDraft) -> Result<Company, StorageError> {
        self.reload()?;
        let company = self.apply_add(draft)?;
        self.save()?;
        Ok(company)
    }

    /// Patch an existing record. A present score recomputes the level.
    pub fn update_company(
        &mut self,
        id: &CompanyId,
        patch: CompanyPatch,
    ) -> Result<Company, StorageError> {
        self.reload()?;
        let company = self.apply_update(id, patch)?;
        self.save()?;
        Ok(company)
    }

    /// Remove a record, returning it.
    pub fn delete_company(&mut self, id: &CompanyId) -> Result<Company, StorageError> {
        self.reload()?;
        let company = self.apply_delete(id)?;
        self.save()?;
        Ok(company)
    }

    /// Run a sequence of mutations under one lock acquisition.
    ///
    /// Sub-operations are applied in order against the in-memory list;
    /// each gets its own outcome and a failure does not stop the rest.
    /// The surviving state is persisted once at the end.
    pub fn batch(
        &mut self,
        operations: Vec<BatchOperation>,
    ) -> Result<Vec<BatchOutcome>, StorageError> {
        let _guard = self.lock.acquire()?;
        self.sync_from_disk()?;

        let mut outcomes = Vec::with_capacity(operations.len());
        for operation in operations {
            let result = match operation {
                BatchOperation::Add { data } => self.apply_add(data),
                BatchOperation::Update { id, data } => self.apply_update(&id, data),
                BatchOperation::Delete { id } => self.apply_delete(&id),
                BatchOperation::Unknown => Err(StorageError::Validation {
                    reason: "unknown operation type".to_string(),
                }),
            };
            outcomes.push(BatchOutcome::from(result));
        }

        self.persist()?;
        Ok(outcomes)
    }

    fn apply_add(&mut self, draft: CompanyDraft) -> Result<Company, StorageError> {
        let score = match draft.investment_score {
            Some(score) if !draft.name.is_empty() => score,
            _ => {
                return Err(StorageError::Validation {
                    reason: "company name and investment score are required".to_string(),
                })
            }
        };

        if self
            .companies
            .iter()
            .any(|company| company.name == draft.name)
        {
            return Err(StorageError::DuplicateName { name: draft.name });
        }

        let id = draft
            .id
            .filter(|id| !id.as_str().is_empty())
            .unwrap_or_else(|| CompanyId::from(Uuid::new_v4().to_string()));
        let investment_level = draft
            .investment_level
            .filter(|level| !level.is_empty())
            .unwrap_or_else(|| level_for(score).to_string());
        let now = self.clock.now_iso();

        let company = Company {
            id,
            name: draft.name,
            business: draft.business,
            investment_score: score,
            investment_level,
            created_at: now.clone(),
            updated_at: now,
            favorable_news: draft.favorable_news,
            revenue: draft.revenue,
            other: draft.other,
            notes: draft.notes,
        };
        self.companies.push(company.clone());
        Ok(company)
    }

    fn apply_update(
        &mut self,
        id: &CompanyId,
        patch: CompanyPatch,
    ) -> Result<Company, StorageError> {
        let index = self
            .companies
            .iter()
            .position(|company| company.id == *id)
            .ok_or_else(|| StorageError::NotFound { id: id.clone() })?;

        if let Some(new_name) = patch.name.as_deref() {
            if !new_name.is_empty()
                && self
                    .companies
                    .iter()
                    .any(|company| company.name == new_name && company.id != *id)
            {
                return Err(StorageError::DuplicateName {
                    name: new_name.to_string(),
                });
            }
        }

        let now = self.clock.now_iso();
        let company = &mut self.companies[index];
        patch.apply_to(company);
        company.updated_at = now;
        Ok(company.clone())
    }

    fn apply_delete(&mut self, id: &CompanyId) -> Result<Company, StorageError> {
        let index = self
            .companies
            .iter()
            .position(|company| company.id == *id)
            .ok_or_else(|| StorageError::NotFound { id: id.clone() })?;
        Ok(self.companies.remove(index))
    }

    /// Records matching every constraint in the filter.
    pub fn search(&mut self, filter: &SearchFilter) -> Result<Vec<Company>, StorageError> {
        self.reload()?;
        Ok(self
            .companies
            .iter()
            .filter(|company| filter.matches(company))
            .cloned()
            .collect())
    }

    /// Aggregate view over the current records.
    pub fn statistics(&mut self) -> Result<Statistics, StorageError> {
        self.reload()?;

        let mut investment_levels: IndexMap<String, u64> = CANONICAL_LEVELS
            .iter()
            .map(|level| (level.to_string(), 0))
            .collect();
        for company in &self.companies {
            *investment_levels
                .entry(company.investment_level.clone())
                .or_insert(0) += 1;
        }

        let mut business_distribution: IndexMap<String, u64> = IndexMap::new();
        for company in &self.companies {
            for tag in company.business.split(',') {
                let tag = tag.trim();
                if tag.is_empty() {
                    continue;
                }
                *business_distribution.entry(tag.to_string()).or_insert(0) += 1;
            }
        }

        let average_score = if self.companies.is_empty() {
            0
        } else {
            let total: i64 = self
                .companies
                .iter()
                .map(|company| company.investment_score)
                .sum();
            (total as f64 / self.companies.len() as f64).round() as i64
        };

        Ok(Statistics {
            total_companies: self.companies.len(),
            investment_levels,
            average_score,
            business_distribution,
            last_updated: self.clock.now_iso(),
        })
    }

    /// Snapshot of all records as an export payload.
    pub fn export_all(&mut self) -> Result<ExportDocument, StorageError> {
        self.reload()?;
        Ok(ExportDocument {
            companies: self.companies.clone(),
            export_time: self.clock.now_iso(),
            version: DATA_VERSION.to_string(),
        })
    }

    /// Replace or merge the record list with an imported one.
    ///
    /// A backup of the current data file is taken under the lock before
    /// anything changes. Merge keeps existing records and appends only
    /// incoming ones whose ids are new; replace swaps the whole list.
    /// Returns the incoming record count either way.
    pub fn import_all(
        &mut self,
        incoming: Vec<Company>,
        options: &ImportOptions,
    ) -> Result<usize, StorageError> {
        let incoming_count = incoming.len();
        let _guard = self.lock.acquire()?;

        self.backup.create_backup();

        if options.merge {
            self.sync_from_disk()?;
            let existing: HashSet<CompanyId> = self
                .companies
                .iter()
                .map(|company| company.id.clone())
                .collect();
            self.companies.extend(
                incoming
                    .into_iter()
                    .filter(|company| !existing.contains(&company.id)),
            );
        } else {
            self.companies = incoming;
        }

        self.persist()?;
        tracing::info!(imported = incoming_count, merge = options.merge, "import complete");
        Ok(incoming_count)
    }

    /// Ids saved for side-by-side comparison. Missing or unreadable
    /// sidecar reads as an empty selection.
    pub fn compare_list(&self) -> Vec<CompanyId> {
        match fs::read(&self.compare_file) {
            Ok(raw) => serde_json::from_slice(&raw).unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }

    /// Persist the comparison selection atomically.
    pub fn save_compare_list(&self, ids: &[CompanyId]) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(&ids)?;
        let tmp = self.compare_file.with_extension("json.tmp");
        let mut file = File::create(&tmp)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        fs::rename(&tmp, &self.compare_file)?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn set_lock_policy(&mut self, attempts: u32, retry_delay: std::time::Duration) {
        let path = self.lock.path().to_path_buf();
        self.lock = LockFile::with_policy(path, attempts, retry_delay);
    }
}

/// One mutation inside a batch request.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BatchOperation {
    Add { data: CompanyDraft },
    Update { id: CompanyId, data: CompanyPatch },
    Delete { id: CompanyId },
    #[serde(other)]
    Unknown,
}

/// Per-operation result of a batch run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Company>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<Company, StorageError>> for BatchOutcome {
    fn from(result: Result<Company, StorageError>) -> Self {
        match result {
            Ok(company) => Self {
                success: true,
                data: Some(company),
                error: None,
            },
            Err(err) => Self {
                success: false,
                data: None,
                error: Some(err.to_string()),
            },
        }
    }
}

/// Import behavior. Merge (the default) keeps existing records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOptions {
    #[serde(default = "default_merge")]
    pub merge: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self { merge: true }
    }
}

fn default_merge() -> bool {
    true
}

/// Search constraints. Absent fields do not constrain.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchFilter {
    pub term: Option<String>,
    pub category: Option<String>,
    pub min_score: Option<i64>,
    pub max_score: Option<i64>,
}

impl SearchFilter {
    /// Filter on the free-text term alone.
    pub fn term(term: impl Into<String>) -> Self {
        Self {
            term: Some(term.into()),
            ..Self::default()
        }
    }

    fn matches(&self, company: &Company) -> bool {
        if let Some(term) = &self.term {
            let needle = term.to_lowercase();
            let hit = company.name.to_lowercase().contains(&needle)
                || company.business.to_lowercase().contains(&needle)
                || company.investment_level.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        if let Some(category) = &self.category {
            let wanted = category.to_lowercase();
            let hit = company
                .business
                .split(',')
                .any(|tag| tag.trim().to_lowercase() == wanted);
            if !hit {
                return false;
            }
        }
        if let Some(min) = self.min_score {
            if company.investment_score < min {
                return false;
            }
        }
        if let Some(max) = self.max_score {
            if company.investment_score > max {
                return false;
            }
        }
        true
    }
}

/// Aggregates over the record list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_companies: usize,
    pub investment_levels: IndexMap<String, u64>,
    pub average_score: i64,
    pub business_distribution: IndexMap<String, u64>,
    pub last_updated: String,
}
