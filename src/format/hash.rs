//! Key hash
//!
//! The 32-bit digest that picks a directory bucket and a starting slot. Files
//! in the wild were written with this exact function, so any change to it
//! makes every existing database unreadable.

/// Hash seed
const SEED: u64 = 5381;

/// Hash a key: `h = (h + (h << 5)) ^ byte` for every byte, starting at 5381
///
/// The accumulator is 64 bits wide and only truncated to 32 bits once the
/// loop completes.
pub fn hash(key: &[u8]) -> u32 {
    let mut h = SEED;
    for &byte in key {
        h = h.wrapping_add(h << 5) ^ u64::from(byte);
    }
    h as u32
}

/// Directory bucket selected by a hash (its low byte)
pub fn bucket(h: u32) -> u64 {
    u64::from(h & 0xFF)
}

/// Starting slot inside a sub-table of `slots` entries (`slots` must be non-zero)
pub fn start_slot(h: u32, slots: u64) -> u64 {
    u64::from(h >> 8) % slots
}
