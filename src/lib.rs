//! # mapcdb
//!
//! A read-only reader for constant database files:
//! - 256-bucket directory of open-addressed hash sub-tables
//! - Sequential record region with zlib-compressed values
//! - Memory-mapped in bounded windows, so files larger than one mapping work
//! - Lock-free concurrent reads through a shared handle
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Reader                               │
//! │         get / count / find / records / key_at / value_at     │
//! └──────────┬──────────────────┬──────────────────┬────────────┘
//!            │                  │                  │
//!            ▼                  ▼                  ▼
//!   ┌─────────────────┐ ┌──────────────┐ ┌──────────────────┐
//!   │  Lookup Engine  │ │ Record Codec │ │     Iterator     │
//!   │ (hash + probe)  │ │  (inflate)   │ │  (storage order) │
//!   └────────┬────────┘ └──────┬───────┘ └────────┬─────────┘
//!            │                 │                  │
//!            └─────────────────┼──────────────────┘
//!                              ▼
//!                     ┌─────────────────┐
//!                     │   Byte Space    │
//!                     │ (mmap windows)  │
//!                     └─────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use mapcdb::Reader;
//!
//! let reader = Reader::open_path("data.cdb")?;
//! if let Some(value) = reader.find(b"hello")? {
//!     println!("{} bytes", value.len());
//! }
//! for record in reader.records() {
//!     let record = record?;
//!     println!("{:?}", record.key);
//! }
//! # Ok::<(), mapcdb::CdbError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod space;
pub mod format;
pub mod codec;
pub mod reader;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CdbError, Result};
pub use config::Config;
pub use format::hash;
pub use reader::{Reader, Record, Records, Stats};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of mapcdb
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
