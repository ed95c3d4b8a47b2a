//! Record Codec
//!
//! Decodes the record stored at a position:
//! `[KeyLen: u32][ValLen: u32][Key][Zlib-compressed Value]`.

use bytes::Bytes;
use tracing::warn;

use crate::codec::decompress;
use crate::error::Result;
use crate::format::RECORD_HEADER_SIZE;

use super::Reader;

/// A decoded record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Byte offset of the record's length prefix
    pub position: u64,
    /// Key bytes
    pub key: Bytes,
    /// Decompressed value bytes (raw bytes if the payload did not inflate)
    pub value: Bytes,
}

/// Length prefix of a record
#[derive(Debug, Clone, Copy)]
pub(super) struct RecordHeader {
    pub key_len: u32,
    pub value_len: u32,
}

impl RecordHeader {
    /// Position of the first key byte
    pub fn key_pos(position: u64) -> u64 {
        position + RECORD_HEADER_SIZE
    }

    /// Position of the first compressed value byte
    pub fn value_pos(&self, position: u64) -> u64 {
        Self::key_pos(position) + u64::from(self.key_len)
    }

    /// Total on-disk size of the record
    pub fn record_len(&self) -> u64 {
        RECORD_HEADER_SIZE + u64::from(self.key_len) + u64::from(self.value_len)
    }
}

impl Reader {
    /// Key bytes of the record at `position`
    pub fn key_at(&self, position: u64) -> Result<Vec<u8>> {
        let key_len = self.space.read_u32(position)?;
        self.space
            .bytes(RecordHeader::key_pos(position), key_len as usize)
    }

    /// Decompressed value of the record at `position`
    ///
    /// A payload that fails to inflate is not an error: the raw compressed
    /// bytes are returned and a warning is logged.
    pub fn value_at(&self, position: u64) -> Result<Vec<u8>> {
        let raw = self.raw_value_at(position)?;
        match decompress(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(
                    position,
                    compressed_len = raw.len(),
                    error = %e,
                    "value did not decompress, returning raw bytes"
                );
                Ok(raw)
            }
        }
    }

    /// Compressed value bytes of the record at `position`, as stored
    pub fn raw_value_at(&self, position: u64) -> Result<Vec<u8>> {
        let header = self.record_header(position)?;
        self.space
            .bytes(header.value_pos(position), header.value_len as usize)
    }

    /// Key and decompressed value of the record at `position`
    pub fn record_at(&self, position: u64) -> Result<Record> {
        Ok(Record {
            position,
            key: Bytes::from(self.key_at(position)?),
            value: Bytes::from(self.value_at(position)?),
        })
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    /// Read the length prefix at `position`
    pub(super) fn record_header(&self, position: u64) -> Result<RecordHeader> {
        // A successful first read bounds position + 4 by the file length
        let key_len = self.space.read_u32(position)?;
        let value_len = self.space.read_u32(position + 4)?;
        Ok(RecordHeader { key_len, value_len })
    }

    /// Whether the record at `position` stores exactly `key`
    ///
    /// Compares in place when the key lies inside one window.
    pub(super) fn key_matches(&self, position: u64, key: &[u8]) -> Result<bool> {
        let key_len = self.space.read_u32(position)?;
        if key_len as usize != key.len() {
            return Ok(false);
        }

        let key_pos = RecordHeader::key_pos(position);
        match self.space.contiguous(key_pos, key.len())? {
            Some(stored) => Ok(stored == key),
            None => Ok(self.space.bytes(key_pos, key.len())? == key),
        }
    }
}
