//! Byte Space
//!
//! Presents a whole file as one addressable byte range on top of a list of
//! bounded memory-mapped windows.
//!
//! ## Layout
//! ```text
//!  position:  0            W            2W           len
//!             ├────────────┼────────────┼─────────────┤
//!  windows:   │  window 0  │  window 1  │  window 2   │
//!             └────────────┴────────────┴─────────────┘
//!  window = pos / W, offset = pos % W
//! ```
//!
//! Every accessor is boundary-safe: a value whose bytes straddle one or more
//! window edges is assembled from each window in turn. Every accessor is also
//! bounds-checked against the file length, so a corrupt length field surfaces
//! as [`CdbError::StructuralCorruption`] instead of a fault.

use std::fs::File;

use memmap2::{Mmap, MmapOptions};

use crate::error::Result;
use crate::CdbError;

/// Read-only, window-segmented view of a file
pub struct ByteSpace {
    /// Mapped windows in file order; all but the last are `window_size` long.
    /// Declared before `file` so mappings are released first.
    windows: Vec<Mmap>,
    /// Backing file handle
    file: File,
    /// Maximum bytes per window
    window_size: u64,
    /// Total file length
    len: u64,
}

impl ByteSpace {
    /// Map `file` in successive windows of `min(remaining, window_size)` bytes
    ///
    /// If any mapping fails, the windows mapped so far and the file are
    /// dropped before the error is returned.
    pub fn map(file: File, window_size: u64) -> Result<Self> {
        if window_size == 0 {
            return Err(CdbError::Config("window size must be non-zero".to_string()));
        }

        let len = file.metadata()?.len();
        let window_len = usize::try_from(window_size.min(len)).map_err(|_| {
            CdbError::Config(format!(
                "window size {} does not fit in the address space",
                window_size
            ))
        })?;

        let mut windows = Vec::new();
        let mut offset = 0u64;
        while offset < len {
            // Only the tail window can be shorter than window_len
            let size = (len - offset).min(window_len as u64) as usize;

            // SAFETY: the file is opened read-only and the database format is
            // immutable; concurrent truncation by another process is outside
            // the reader's contract.
            let window = unsafe { MmapOptions::new().offset(offset).len(size).map(&file)? };
            windows.push(window);
            offset += size as u64;
        }

        Ok(Self {
            windows,
            file,
            window_size,
            len,
        })
    }

    /// Total length of the byte space (the file size)
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of mapped windows
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Maximum bytes per window
    pub fn window_size(&self) -> u64 {
        self.window_size
    }

    /// Read a little-endian u32 at `pos`
    pub fn read_u32(&self, pos: u64) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.read_into(pos, &mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Read a little-endian u64 at `pos`
    pub fn read_u64(&self, pos: u64) -> Result<u64> {
        let mut buf = [0u8; 8];
        self.read_into(pos, &mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }

    /// Copy `len` bytes starting at `pos` into a new buffer
    pub fn bytes(&self, pos: u64, len: usize) -> Result<Vec<u8>> {
        // Reject before allocating; a corrupt length can be up to 4 GiB
        self.check_range(pos, len as u64)?;
        let mut buf = vec![0u8; len];
        self.read_into(pos, &mut buf)?;
        Ok(buf)
    }

    /// Fill `dst` with the bytes starting at `pos`, crossing window edges as needed
    pub fn read_into(&self, pos: u64, dst: &mut [u8]) -> Result<()> {
        self.check_range(pos, dst.len() as u64)?;

        let mut copied = 0usize;
        let mut cursor = pos;
        while copied < dst.len() {
            let (window, offset) = self.locate(cursor)?;
            let take = (window.len() - offset).min(dst.len() - copied);
            dst[copied..copied + take].copy_from_slice(&window[offset..offset + take]);
            copied += take;
            cursor += take as u64;
        }
        Ok(())
    }

    /// Borrow `[pos, pos + len)` directly when it lies inside a single window
    ///
    /// Returns `Ok(None)` when the range straddles a window edge; callers fall
    /// back to [`ByteSpace::bytes`] in that case.
    pub fn contiguous(&self, pos: u64, len: usize) -> Result<Option<&[u8]>> {
        self.check_range(pos, len as u64)?;
        if len == 0 {
            return Ok(Some(&[]));
        }

        let (window, offset) = self.locate(pos)?;
        Ok(window.get(offset..offset + len))
    }

    /// Release all windows and the file handle
    pub fn close(self) {
        let Self { windows, file, .. } = self;
        drop(windows);
        drop(file);
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Resolve a position to its window and the offset inside it
    fn locate(&self, pos: u64) -> Result<(&Mmap, usize)> {
        let index = (pos / self.window_size) as usize;
        let offset = (pos % self.window_size) as usize;
        let window = self.windows.get(index).ok_or_else(|| {
            CdbError::StructuralCorruption(format!(
                "position {} maps to missing window {}",
                pos, index
            ))
        })?;
        Ok((window, offset))
    }

    fn check_range(&self, pos: u64, len: u64) -> Result<()> {
        match pos.checked_add(len) {
            Some(end) if end <= self.len => Ok(()),
            _ => Err(CdbError::StructuralCorruption(format!(
                "read of {} bytes at {} exceeds file length {}",
                len, pos, self.len
            ))),
        }
    }
}
