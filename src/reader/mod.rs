//! Reader Module
//!
//! The database handle that ties the byte space, directory, lookup engine,
//! record codec, and iterator together.
//!
//! ## Responsibilities
//! - Open and map the file, parse the directory
//! - Answer hashed lookups (`get`, `count`, `find`)
//! - Decode records at a position (`key_at`, `value_at`)
//! - Walk every record in storage order (`next_key`, `records`)
//!
//! ## Concurrency
//! A `Reader` holds no mutable state after `open`, so it is `Send + Sync`
//! and any number of threads can query one handle through `&Reader`.
//! `close` takes the handle by value, so it cannot race with reads.

mod iter;
mod lookup;
mod record;

use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{Config, MIN_WINDOW_SIZE};
use crate::error::Result;
use crate::format::Directory;
use crate::space::ByteSpace;
use crate::CdbError;

pub use iter::Records;
pub use record::Record;

/// Read-only handle to an open constant database
pub struct Reader {
    /// Path the database was opened from
    path: PathBuf,
    /// Windowed mapping of the whole file
    space: ByteSpace,
    /// Directory summary gathered at open time
    directory: Directory,
}

/// Informational totals about an open database
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// File size in bytes
    pub file_size: u64,
    /// Number of mapped windows
    pub window_count: usize,
    /// Offset where the sub-tables begin (end of the record region)
    pub table_start: u64,
    /// Sum of halved directory length fields. Not used by lookups.
    pub slot_total: u64,
}

impl Reader {
    /// Open a database with the given config
    ///
    /// On open:
    /// 1. Validate the config
    /// 2. Open the file and map it in windows
    /// 3. Parse the 256-entry directory
    pub fn open(config: Config) -> Result<Self> {
        // Step 1: Validate config
        if config.window_size < MIN_WINDOW_SIZE {
            return Err(CdbError::Config(format!(
                "window size {} is below the minimum of {} bytes",
                config.window_size, MIN_WINDOW_SIZE
            )));
        }

        // Step 2: Open and map
        let file = File::open(&config.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CdbError::NotFound(config.path.clone()),
            _ => CdbError::Io(e),
        })?;
        let space = ByteSpace::map(file, config.window_size)?;

        // Step 3: Parse directory
        let directory = Directory::parse(&space, config.verify_directory)?;

        debug!(
            path = %config.path.display(),
            file_size = space.len(),
            windows = space.window_count(),
            table_start = directory.table_start,
            slot_total = directory.slot_total,
            "opened database"
        );

        Ok(Self {
            path: config.path,
            space,
            directory,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified file
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        let config = Config::builder().path(path.as_ref()).build();
        Self::open(config)
    }

    /// Release all mappings and the file handle
    pub fn close(self) {
        debug!(path = %self.path.display(), "closing database");
        self.space.close();
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Path the database was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Offset where the sub-tables begin
    pub fn table_start(&self) -> u64 {
        self.directory.table_start
    }

    /// Informational totals
    pub fn stats(&self) -> Stats {
        Stats {
            file_size: self.space.len(),
            window_count: self.space.window_count(),
            table_start: self.directory.table_start,
            slot_total: self.directory.slot_total,
        }
    }
}
