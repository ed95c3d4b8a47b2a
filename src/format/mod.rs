//! On-disk Format
//!
//! Constants and decoders for the constant database layout. All integers are
//! little-endian.
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Directory (4096 bytes)                                  │
//! │   256 × [Offset: u64 (8) | Slots: u64 (8)]              │
//! ├─────────────────────────────────────────────────────────┤
//! │ Records (variable)                                      │
//! │   [KeyLen: u32][ValLen: u32][Key][Zlib-compressed Value]│
//! │   ... repeated for each record ...                      │
//! ├─────────────────────────────────────────────────────────┤
//! │ Sub-tables (variable, starts at table_start)            │
//! │   [Hash: u64 (low 32 bits)][RecordPos: u64]             │
//! │   ... Slots entries per directory bucket ...            │
//! │   (RecordPos = 0 marks an empty slot)                   │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod hash;
pub mod header;

pub use hash::hash;
pub use header::{Directory, DirectoryEntry};

// =============================================================================
// Shared Constants (used by header, lookup, record, iterator)
// =============================================================================

/// Number of primary buckets in the directory
pub const DIRECTORY_ENTRIES: u64 = 256;

/// Directory entry size: Offset (8) + Slots (8) = 16 bytes
pub const DIRECTORY_ENTRY_SIZE: u64 = 16;

/// Directory size: 256 × 16 = 4096 bytes; the first record starts here
pub const DIRECTORY_SIZE: u64 = DIRECTORY_ENTRIES * DIRECTORY_ENTRY_SIZE;

/// Slot size: Hash (8) + RecordPos (8) = 16 bytes
pub const SLOT_SIZE: u64 = 16;

/// Record header size: KeyLen (4) + ValLen (4) = 8 bytes
pub const RECORD_HEADER_SIZE: u64 = 8;

/// Record position stored in an empty slot
pub const EMPTY_SLOT: u64 = 0;
