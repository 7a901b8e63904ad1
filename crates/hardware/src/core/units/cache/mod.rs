//! Direct-mapped cache model with a two-phase fill.
//!
//! Both the instruction and data caches are instances of [`Cache`]; the
//! submodules add the access paths specific to each. It provides:
//! 1. **Geometry:** `lines` × `line_bytes`, both powers of two. The index is the
//!    bits just above the line offset, and the tag is everything above the index.
//! 2. **Lookup:** Hit/miss with per-cache counters.
//! 3. **Fill:** A miss parks one outstanding fill. Phase one issues the read
//!    and polls the platform's readiness predicate. Phase two, on the following
//!    cycle, installs the line. Stages track the phase in their stage-register
//!    flags; the cache only holds the data in flight.

/// Instruction-cache access path.
pub mod icache;

/// Data-cache access paths (load, write-through store).
pub mod dcache;

use crate::config::CacheGeometry;
use crate::soc::Platform;

/// A read that has been issued to the platform but not yet installed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingFill {
    /// Address the read was issued at (line-aligned unless `install` is false).
    pub addr: u64,
    /// Bytes requested.
    pub len: usize,
    /// Data returned by the platform, or `None` if the read faulted and must be re-issued.
    pub data: Option<Vec<u8>>,
    /// Whether the bytes form a whole line to install, or an uncached access.
    pub install: bool,
}

/// Progress of the outstanding fill after one poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillPoll {
    /// Still waiting for the platform (or for a faulted read to succeed).
    Waiting,
    /// The platform reported the data ready; commit on the next cycle.
    Ready,
}

/// Direct-mapped cache storage.
#[derive(Clone, Debug)]
pub struct Cache {
    name: &'static str,
    tags: Vec<Option<u64>>,
    data: Vec<u8>,
    line_bytes: usize,
    offset_bits: u32,
    index_bits: u32,
    pending: Option<PendingFill>,
    /// Lookups that found their line.
    pub hits: u64,
    /// Lookups that did not.
    pub misses: u64,
    /// Fill reads the platform refused.
    pub faults: u64,
}

impl Cache {
    /// Creates an empty cache.
    ///
    /// # Arguments
    ///
    /// * `name`     - Label used in log lines (`"icache"`, `"dcache"`).
    /// * `geometry` - Validated line count and line size.
    pub fn new(name: &'static str, geometry: &CacheGeometry) -> Self {
        Self {
            name,
            tags: vec![None; geometry.lines],
            data: vec![0; geometry.lines * geometry.line_bytes],
            line_bytes: geometry.line_bytes,
            offset_bits: geometry.line_bytes.trailing_zeros(),
            index_bits: geometry.lines.trailing_zeros(),
            pending: None,
            hits: 0,
            misses: 0,
            faults: 0,
        }
    }

    /// Line size in bytes.
    pub const fn line_bytes(&self) -> usize {
        self.line_bytes
    }

    /// Line index of `addr`.
    pub const fn index(&self, addr: u64) -> usize {
        ((addr >> self.offset_bits) & ((1 << self.index_bits) - 1)) as usize
    }

    /// Tag of `addr`.
    pub const fn tag(&self, addr: u64) -> u64 {
        addr >> (self.offset_bits + self.index_bits)
    }

    /// Byte offset of `addr` within its line.
    pub const fn offset(&self, addr: u64) -> usize {
        (addr & (self.line_bytes as u64 - 1)) as usize
    }

    /// Start address of the line holding `addr`.
    pub const fn line_base(&self, addr: u64) -> u64 {
        addr & !(self.line_bytes as u64 - 1)
    }

    /// True when `[addr, addr + len)` lies inside one line.
    pub const fn fits_line(&self, addr: u64, len: usize) -> bool {
        self.offset(addr) + len <= self.line_bytes
    }

    /// True when the line holding `addr` is present. Does not touch the counters.
    pub fn contains(&self, addr: u64) -> bool {
        self.tags[self.index(addr)] == Some(self.tag(addr))
    }

    /// Reads `len` bytes at `addr` on a hit, counting the hit or miss.
    ///
    /// Accesses that straddle a line boundary always miss.
    pub fn lookup(&mut self, addr: u64, len: usize) -> Option<&[u8]> {
        if self.fits_line(addr, len) && self.contains(addr) {
            self.hits += 1;
            let start = self.index(addr) * self.line_bytes + self.offset(addr);
            Some(&self.data[start..start + len])
        } else {
            self.misses += 1;
            None
        }
    }

    /// Reads `len` bytes at `addr` if present, without touching the counters.
    pub fn peek(&self, addr: u64, len: usize) -> Option<&[u8]> {
        if !self.fits_line(addr, len) || !self.contains(addr) {
            return None;
        }
        let start = self.index(addr) * self.line_bytes + self.offset(addr);
        Some(&self.data[start..start + len])
    }

    /// Overwrites cached bytes at `addr` if the line is present.
    ///
    /// Returns whether the line was present.
    pub fn update(&mut self, addr: u64, bytes: &[u8]) -> bool {
        if !self.fits_line(addr, bytes.len()) || !self.contains(addr) {
            return false;
        }
        let start = self.index(addr) * self.line_bytes + self.offset(addr);
        self.data[start..start + bytes.len()].copy_from_slice(bytes);
        true
    }

    /// Installs a whole line at `base`, replacing whatever occupied the slot.
    pub fn install(&mut self, base: u64, line: &[u8]) {
        let idx = self.index(base);
        let start = idx * self.line_bytes;
        let n = line.len().min(self.line_bytes);
        self.data[start..start + n].copy_from_slice(&line[..n]);
        self.tags[idx] = Some(self.tag(base));
    }

    /// The fill in flight, if any.
    pub const fn pending(&self) -> Option<&PendingFill> {
        self.pending.as_ref()
    }

    /// Phase one, first cycle: issues the read for a miss at `addr`.
    ///
    /// A whole line is requested when the access fits in one; otherwise the
    /// exact range is read and will be handed back uncached. A faulting read
    /// is logged and retried by [`Cache::poll_fill`].
    pub fn begin_fill<P: Platform + ?Sized>(&mut self, addr: u64, len: usize, platform: &mut P) {
        let install = self.fits_line(addr, len);
        let (addr, len) = if install {
            (self.line_base(addr), self.line_bytes)
        } else {
            (addr, len)
        };
        tracing::debug!(
            cache = self.name,
            addr = format_args!("{addr:#x}"),
            len,
            "miss, fill issued"
        );
        let mut fill = PendingFill {
            addr,
            len,
            data: None,
            install,
        };
        self.issue(&mut fill, platform);
        self.pending = Some(fill);
    }

    fn issue<P: Platform + ?Sized>(&mut self, fill: &mut PendingFill, platform: &mut P) {
        let mut buf = vec![0; fill.len];
        match platform.read_memory(fill.addr, &mut buf) {
            Ok(()) => fill.data = Some(buf),
            Err(fault) => {
                self.faults += 1;
                tracing::warn!(cache = self.name, %fault, "fill read failed, retrying");
            }
        }
    }

    /// Phase one, later cycles: re-issues a faulted read, then polls readiness.
    pub fn poll_fill<P: Platform + ?Sized>(&mut self, platform: &mut P) -> FillPoll {
        let Some(mut fill) = self.pending.take() else {
            return FillPoll::Ready;
        };
        if fill.data.is_none() {
            self.issue(&mut fill, platform);
        }
        let ready = fill.data.is_some() && platform.memory_ready(fill.addr);
        self.pending = Some(fill);
        if ready { FillPoll::Ready } else { FillPoll::Waiting }
    }

    /// Phase two: installs the fetched line.
    ///
    /// # Returns
    ///
    /// The raw bytes of an uncached (line-straddling) fill, or `None` once a
    /// line has been installed.
    pub fn commit_fill(&mut self) -> Option<Vec<u8>> {
        let fill = self.pending.take()?;
        let data = fill.data?;
        if fill.install {
            tracing::debug!(
                cache = self.name,
                addr = format_args!("{:#x}", fill.addr),
                "fill committed"
            );
            self.install(fill.addr, &data);
            None
        } else {
            Some(data)
        }
    }

    /// Drops the fill in flight (its requester was squashed).
    pub fn cancel_fill(&mut self) {
        if let Some(fill) = self.pending.take() {
            tracing::trace!(
                cache = self.name,
                addr = format_args!("{:#x}", fill.addr),
                "fill cancelled"
            );
        }
    }
}

/// Little-endian value of up to eight bytes.
pub fn le_value(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .rev()
        .fold(0, |acc, &b| (acc << 8) | u64::from(b))
}
