//! Data-cache access paths.
//!
//! The default geometry is 2048 lines of 8 bytes: offset `addr[2:0]`, index
//! `addr[13:3]`, tag `addr >> 14`. Loads read through the cache; stores are
//! write-through with no allocation on a miss.

use super::{Cache, le_value};
use crate::common::error::MemoryFault;
use crate::soc::Platform;

/// Reads `size` bytes at `addr` on a hit, returned zero-extended.
pub fn load(cache: &mut Cache, addr: u64, size: usize) -> Option<u64> {
    cache.lookup(addr, size).map(le_value)
}

/// Writes the low `size` bytes of `value` to memory, updating the cached copy
/// when the line is present.
///
/// # Returns
///
/// Whether the store hit in the cache. A miss leaves the cache untouched.
///
/// # Errors
///
/// Propagates the platform's [`MemoryFault`]; the cache is not modified then.
pub fn store<P: Platform + ?Sized>(
    cache: &mut Cache,
    platform: &mut P,
    addr: u64,
    value: u64,
    size: usize,
) -> Result<bool, MemoryFault> {
    platform.write_memory(addr, value, size)?;
    let bytes = value.to_le_bytes();
    let hit = cache.update(addr, &bytes[..size.min(bytes.len())]);
    if hit {
        cache.hits += 1;
    } else {
        cache.misses += 1;
    }
    Ok(hit)
}
