//! Directory (header) parsing
//!
//! Reads the 256 directory entries at open time to find where the record
//! region ends. Entries are re-read by the lookup path on every query rather
//! than cached; the directory is 4 KiB and stays page-resident.

use crate::error::Result;
use crate::space::ByteSpace;
use crate::CdbError;

use super::{DIRECTORY_ENTRIES, DIRECTORY_ENTRY_SIZE, DIRECTORY_SIZE, SLOT_SIZE};

/// One directory entry: where a bucket's sub-table lives and how many slots it has
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// File offset of the sub-table
    pub offset: u64,
    /// Raw length field, used as the sub-table's slot count
    pub slots: u64,
}

impl DirectoryEntry {
    /// Read directory entry `bucket` from the byte space
    pub fn read(space: &ByteSpace, bucket: u64) -> Result<Self> {
        let pos = bucket * DIRECTORY_ENTRY_SIZE;
        Ok(Self {
            offset: space.read_u64(pos)?,
            slots: space.read_u64(pos + 8)?,
        })
    }

    /// One past the last byte of the sub-table, if it is representable
    pub fn end(&self) -> Option<u64> {
        self.slots
            .checked_mul(SLOT_SIZE)
            .and_then(|size| self.offset.checked_add(size))
    }
}

/// Summary of the directory gathered at open time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directory {
    /// Lowest sub-table offset; records live in `[DIRECTORY_SIZE, table_start)`
    pub table_start: u64,
    /// Sum of `slots >> 1` over all entries.
    ///
    /// Informational only. Lookups use the length field unhalved; whether the
    /// halving reflects an on-disk convention or is a defect is unresolved, so
    /// both readings are preserved as they are.
    pub slot_total: u64,
}

impl Directory {
    /// Parse all 256 entries
    ///
    /// With `verify` set, every entry must point at or past the end of the
    /// directory and its sub-table must end inside the file.
    pub fn parse(space: &ByteSpace, verify: bool) -> Result<Self> {
        if space.len() < DIRECTORY_SIZE {
            return Err(CdbError::StructuralCorruption(format!(
                "file is {} bytes, shorter than the {} byte directory",
                space.len(),
                DIRECTORY_SIZE
            )));
        }

        let mut table_start = u64::MAX;
        let mut slot_total = 0u64;

        for bucket in 0..DIRECTORY_ENTRIES {
            let entry = DirectoryEntry::read(space, bucket)?;
            if verify {
                Self::verify_entry(space, bucket, &entry)?;
            }

            table_start = table_start.min(entry.offset);
            slot_total = slot_total.saturating_add(entry.slots >> 1);
        }

        Ok(Self {
            table_start,
            slot_total,
        })
    }

    fn verify_entry(space: &ByteSpace, bucket: u64, entry: &DirectoryEntry) -> Result<()> {
        if entry.offset < DIRECTORY_SIZE {
            return Err(CdbError::StructuralCorruption(format!(
                "bucket {} sub-table offset {} lies inside the directory",
                bucket, entry.offset
            )));
        }

        match entry.end() {
            Some(end) if end <= space.len() => Ok(()),
            _ => Err(CdbError::StructuralCorruption(format!(
                "bucket {} sub-table ({} slots at {}) extends past end of file ({} bytes)",
                bucket,
                entry.slots,
                entry.offset,
                space.len()
            ))),
        }
    }
}
