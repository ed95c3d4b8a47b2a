//! Shared test fixtures
//!
//! A minimal database writer used only to produce fixture files. The layout
//! mirrors what the reader expects: directory, records, then one sub-table
//! per bucket.

#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::ZlibEncoder;
use flate2::Compression;
use mapcdb::hash;
use tempfile::TempDir;

pub const DIRECTORY_SIZE: usize = 4096;

/// Two distinct keys with the same 32-bit hash
pub const COLLIDING_KEYS: (&[u8], &[u8]) = (b"key1285194", b"key6905800");

/// How many slots a bucket holding `n` records gets
#[derive(Debug, Clone, Copy)]
pub enum SlotLayout {
    /// `2n` slots, the usual half-full tables
    Double,
    /// Exactly `n` slots, no empty sentinel
    Exact,
    /// `n + extra` slots
    Extra(u64),
}

impl SlotLayout {
    fn slots(self, n: u64) -> u64 {
        match self {
            SlotLayout::Double => n * 2,
            SlotLayout::Exact => n,
            SlotLayout::Extra(extra) => n + extra,
        }
    }
}

/// Builds database files for tests
pub struct CdbWriter {
    /// (key, stored value bytes)
    records: Vec<(Vec<u8>, Vec<u8>)>,
    layout: SlotLayout,
}

impl CdbWriter {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            layout: SlotLayout::Double,
        }
    }

    pub fn layout(mut self, layout: SlotLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Add a record, compressing the value
    pub fn add(&mut self, key: &[u8], value: &[u8]) -> &mut Self {
        let compressed = compress(value);
        self.records.push((key.to_vec(), compressed));
        self
    }

    /// Add a record whose stored value bytes are written as given
    pub fn add_raw(&mut self, key: &[u8], stored: &[u8]) -> &mut Self {
        self.records.push((key.to_vec(), stored.to_vec()));
        self
    }

    /// Serialize to bytes
    pub fn build(&self) -> Vec<u8> {
        let mut out = vec![0u8; DIRECTORY_SIZE];
        let mut buckets: Vec<Vec<(u32, u64)>> = vec![Vec::new(); 256];

        for (key, stored) in &self.records {
            let position = out.len() as u64;
            out.extend_from_slice(&(key.len() as u32).to_le_bytes());
            out.extend_from_slice(&(stored.len() as u32).to_le_bytes());
            out.extend_from_slice(key);
            out.extend_from_slice(stored);

            let h = hash(key);
            buckets[(h & 0xFF) as usize].push((h, position));
        }

        let mut directory = Vec::with_capacity(DIRECTORY_SIZE);
        for bucket in &buckets {
            let slots = self.layout.slots(bucket.len() as u64);
            let offset = out.len() as u64;

            let mut table = vec![(0u64, 0u64); slots as usize];
            for &(h, position) in bucket {
                let mut slot = (u64::from(h >> 8) % slots) as usize;
                while table[slot].1 != 0 {
                    slot = (slot + 1) % slots as usize;
                }
                table[slot] = (u64::from(h), position);
            }
            for (h, position) in table {
                out.extend_from_slice(&h.to_le_bytes());
                out.extend_from_slice(&position.to_le_bytes());
            }

            directory.extend_from_slice(&offset.to_le_bytes());
            directory.extend_from_slice(&slots.to_le_bytes());
        }

        out[..DIRECTORY_SIZE].copy_from_slice(&directory);
        out
    }

    /// Serialize and write to `path`
    pub fn write(&self, path: &Path) {
        fs::write(path, self.build()).unwrap();
    }
}

pub fn compress(payload: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(payload).unwrap();
    encoder.finish().unwrap()
}

pub fn setup_temp_db() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test.cdb");
    (temp_dir, path)
}

/// Writer holding `count` records `key{i:05}` → `value{i}`
pub fn numbered_writer(count: usize) -> CdbWriter {
    let mut writer = CdbWriter::new();
    for i in 0..count {
        let key = format!("key{:05}", i);
        let value = format!("value{}", i);
        writer.add(key.as_bytes(), value.as_bytes());
    }
    writer
}

/// Install a test-writer subscriber once; `RUST_LOG` controls the level
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
