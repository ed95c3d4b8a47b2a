//! Value codec
//!
//! Record values are stored as zlib-wrapped deflate streams. Decompression
//! writes into a growable buffer, so the inflated size is never guessed from
//! the compressed size.

use std::io;

use flate2::{Decompress, FlushDecompress, Status};

/// Initial output reservation when the compressed input is tiny
const MIN_OUTPUT_RESERVE: usize = 256;

/// Inflate a zlib stream into a freshly allocated, growable buffer
///
/// Fails on a malformed stream and on one that ends before its final block;
/// the caller decides how to degrade.
pub fn decompress(compressed: &[u8]) -> io::Result<Vec<u8>> {
    let mut inflater = Decompress::new(true);
    let mut out = Vec::with_capacity(compressed.len().saturating_mul(2).max(MIN_OUTPUT_RESERVE));

    loop {
        if out.len() == out.capacity() {
            out.reserve(out.capacity());
        }

        let consumed = inflater.total_in() as usize;
        let produced = out.len();
        let status = inflater
            .decompress_vec(&compressed[consumed..], &mut out, FlushDecompress::None)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        match status {
            Status::StreamEnd => return Ok(out),
            Status::Ok | Status::BufError => {
                let stalled = inflater.total_in() as usize == consumed && out.len() == produced;
                if stalled && out.len() < out.capacity() {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "zlib stream ended before its final block",
                    ));
                }
            }
        }
    }
}
