//! Operator CLI for the dealbook data store.
//!
//! Provides the `dealbook` binary with subcommands for inspecting and
//! maintaining a data directory: `list`, `export`, `import`, `backup`, and
//! `verify`. Operates on the same `CompanyStore` the HTTP server uses,
//! ensuring identical persistence behavior from both entry points.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use dealbook_storage::{
    document, integrity, store, CompanyStore, ExportDocument, ImportOptions, StorageError,
};

/// Dealbook data store tools.
#[derive(Parser)]
#[command(name = "dealbook", about = "Company record store tools")]
struct Cli {
    /// Data directory holding companies.json.
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Print all records as pretty JSON.
    List,

    /// Write the export document to a file or stdout.
    Export {
        /// Output file (stdout when omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import records from an export document file.
    Import {
        /// Export document to import.
        file: PathBuf,

        /// Merge with existing records instead of replacing them.
        #[arg(long)]
        merge: bool,
    },

    /// Create a backup snapshot now and prune old ones.
    Backup,

    /// Validate the data file and verify its checksum.
    Verify,
}

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::List => run_list(&cli.data_dir),
        Commands::Export { output } => run_export(&cli.data_dir, output),
        Commands::Import { file, merge } => run_import(&cli.data_dir, &file, merge),
        Commands::Backup => run_backup(&cli.data_dir),
        Commands::Verify => run_verify(&cli.data_dir),
    };
    process::exit(exit_code);
}

/// Open the store, reporting failures on stderr.
fn open_store(data_dir: &Path) -> Result<CompanyStore, i32> {
    CompanyStore::open(data_dir).map_err(|e| {
        eprintln!(
            "Error: failed to open store in '{}': {}",
            data_dir.display(),
            e
        );
        3
    })
}

/// Execute the list subcommand.
///
/// Returns exit code: 0 = success, 1 = serialization error, 3 = I/O error.
fn run_list(data_dir: &Path) -> i32 {
    let mut store = match open_store(data_dir) {
        Ok(store) => store,
        Err(code) => return code,
    };

    let companies = match store.all_companies() {
        Ok(companies) => companies,
        Err(e) => {
            eprintln!("Error: failed to read records: {}", e);
            return 3;
        }
    };

    match serde_json::to_string_pretty(&companies) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: failed to serialize records: {}", e);
            1
        }
    }
}

/// Execute the export subcommand.
///
/// Returns exit code: 0 = success, 1 = serialization error, 3 = I/O error.
fn run_export(data_dir: &Path, output: Option<PathBuf>) -> i32 {
    let mut store = match open_store(data_dir) {
        Ok(store) => store,
        Err(code) => return code,
    };

    let export = match store.export_all() {
        Ok(export) => export,
        Err(e) => {
            eprintln!("Error: export failed: {}", e);
            return 3;
        }
    };

    let json = match serde_json::to_string_pretty(&export) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error: failed to serialize export document: {}", e);
            return 1;
        }
    };

    match output {
        Some(path) => {
            if let Err(e) = std::fs::write(&path, &json) {
                eprintln!("Error: failed to write '{}': {}", path.display(), e);
                return 3;
            }
            println!(
                "Exported {} record(s) to {}",
                export.companies.len(),
                path.display()
            );
            0
        }
        None => {
            println!("{}", json);
            0
        }
    }
}

/// Execute the import subcommand.
///
/// Returns exit code: 0 = success, 1 = invalid export document,
/// 3 = I/O error.
fn run_import(data_dir: &Path, file: &Path, merge: bool) -> i32 {
    let raw = match std::fs::read(file) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("Error: failed to read '{}': {}", file.display(), e);
            return 3;
        }
    };

    // An export document; a full persisted document parses too since the
    // extra metadata fields are ignored.
    let imported: ExportDocument = match serde_json::from_slice(&raw) {
        Ok(document) => document,
        Err(e) => {
            eprintln!(
                "Error: '{}' is not a valid export document: {}",
                file.display(),
                e
            );
            return 1;
        }
    };

    let mut store = match open_store(data_dir) {
        Ok(store) => store,
        Err(code) => return code,
    };

    match store.import_all(imported.companies, &ImportOptions { merge }) {
        Ok(count) => {
            println!("Imported {} record(s)", count);
            0
        }
        Err(StorageError::Io(e)) => {
            eprintln!("Error: import failed: {}", e);
            3
        }
        Err(e) => {
            eprintln!("Error: import failed: {}", e);
            1
        }
    }
}

/// Execute the backup subcommand.
///
/// Returns exit code: 0 = success (prints the backup path), 3 = I/O error.
fn run_backup(data_dir: &Path) -> i32 {
    let store = match open_store(data_dir) {
        Ok(store) => store,
        Err(code) => return code,
    };

    match store.backup_manager().create_backup() {
        Some(path) => {
            println!("{}", path.display());
            0
        }
        None => {
            eprintln!("Error: backup failed (missing or unreadable data file)");
            3
        }
    }
}

/// Execute the verify subcommand.
///
/// Reads the data file directly, without store side effects.
/// Returns exit code: 0 = valid, 1 = corrupt/invalid document,
/// 2 = checksum mismatch, 3 = I/O error.
fn run_verify(data_dir: &Path) -> i32 {
    let data_file = data_dir.join(store::DATA_FILE);

    let loaded = match document::load(&data_file) {
        Ok(document) => document,
        Err(StorageError::CorruptData { reason }) => {
            eprintln!("Invalid: {}", reason);
            return 1;
        }
        Err(e) => {
            eprintln!("Error: failed to read '{}': {}", data_file.display(), e);
            return 3;
        }
    };

    if loaded.checksum.is_empty() {
        println!(
            "Valid: {} record(s), no checksum recorded",
            loaded.companies.len()
        );
        return 0;
    }

    if integrity::checksum_matches(&loaded) {
        println!(
            "Valid: {} record(s), checksum verified",
            loaded.companies.len()
        );
        0
    } else {
        eprintln!("Checksum mismatch: contents do not match the recorded checksum");
        2
    }
}
