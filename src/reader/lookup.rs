//! Lookup Engine
//!
//! Two-level hashed search: the low byte of the key hash picks a directory
//! bucket, the remaining 24 bits pick a starting slot in that bucket's
//! sub-table, and linear probing walks forward from there.
//!
//! ## Probe termination
//! A probe stops at the first empty slot (record position 0) or after every
//! slot of the sub-table has been visited once, whichever comes first. It
//! never stops early on a match, so `get` and `count` always walk the same
//! chain.
//!
//! Positions returned here are hash matches only. Two distinct keys can share
//! a 32-bit hash; `find` and `find_all` compare the stored key bytes.

use tracing::trace;

use crate::error::Result;
use crate::format::hash::{bucket, start_slot};
use crate::format::{hash, DirectoryEntry, EMPTY_SLOT, SLOT_SIZE};
use crate::CdbError;

use super::Reader;

impl Reader {
    /// Position of the `index`-th record whose hash matches `key`
    ///
    /// Returns:
    /// - `Ok(Some(position))` — a hash-equal candidate; verify with `key_at`
    /// - `Ok(None)` — fewer than `index + 1` hash matches
    pub fn get(&self, key: &[u8], index: u64) -> Result<Option<u64>> {
        let mut found = None;
        self.probe(key, |nth, position| {
            if nth == index {
                found = Some(position);
            }
        })?;
        Ok(found)
    }

    /// Number of records whose hash matches `key` (0 when absent)
    pub fn count(&self, key: &[u8]) -> Result<u64> {
        self.probe(key, |_, _| {})
    }

    /// Every hash-matching record position for `key`, in probe order
    pub fn positions(&self, key: &[u8]) -> Result<Vec<u64>> {
        let mut positions = Vec::new();
        self.probe(key, |_, position| positions.push(position))?;
        Ok(positions)
    }

    /// Decoded value of the first record whose key equals `key`
    pub fn find(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        for position in self.positions(key)? {
            if self.key_matches(position, key)? {
                return self.value_at(position).map(Some);
            }
        }
        Ok(None)
    }

    /// Decoded values of every record whose key equals `key`, in probe order
    pub fn find_all(&self, key: &[u8]) -> Result<Vec<Vec<u8>>> {
        let mut values = Vec::new();
        for position in self.positions(key)? {
            if self.key_matches(position, key)? {
                values.push(self.value_at(position)?);
            }
        }
        Ok(values)
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Walk the probe chain for `key`, calling `visit(nth_match, position)` for
    /// each slot whose stored hash equals the key hash. Returns the match count.
    fn probe(&self, key: &[u8], mut visit: impl FnMut(u64, u64)) -> Result<u64> {
        let h = hash(key);
        let entry = DirectoryEntry::read(&self.space, bucket(h))?;
        if entry.slots == 0 {
            return Ok(0);
        }

        let start = start_slot(h, entry.slots);
        let mut matches = 0u64;

        for step in 0..entry.slots {
            let slot = (start + step) % entry.slots;
            let slot_pos = slot
                .checked_mul(SLOT_SIZE)
                .and_then(|rel| entry.offset.checked_add(rel))
                .ok_or_else(|| {
                    CdbError::StructuralCorruption(format!(
                        "slot {} of sub-table at {} is not addressable",
                        slot, entry.offset
                    ))
                })?;

            // Hash lives in the low 32 bits of a 64-bit field
            let stored_hash = self.space.read_u64(slot_pos)? as u32;
            let record_pos = self.space.read_u64(slot_pos + 8)?;

            if record_pos == EMPTY_SLOT {
                break;
            }
            if stored_hash == h {
                visit(matches, record_pos);
                matches += 1;
            }
        }

        trace!(
            hash = h,
            bucket = bucket(h),
            slots = entry.slots,
            start,
            matches,
            "probed sub-table"
        );
        Ok(matches)
    }
}
