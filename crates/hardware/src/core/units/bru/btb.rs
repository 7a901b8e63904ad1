//! Branch Target Buffer (BTB).
//!
//! A small fully-associative table mapping a branch PC to the target it was
//! last resolved to. It performs:
//! 1. **Lookup:** A linear scan for the fetch PC.
//! 2. **Lazy allocation:** A miss claims the next free slot with the target still unknown.
//! 3. **Resolution:** Execute compares the true target with the stored one and
//!    fills or corrects it. Entries are never evicted; once full, new branches
//!    simply go unpredicted.

/// One BTB slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BtbEntry {
    /// PC of the branch instruction.
    pub tag: u64,
    /// Resolved target, or `None` until the branch first executes.
    pub target: Option<u64>,
}

/// Outcome of a fetch-time lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BtbLookup {
    /// Tag present with a known target.
    Hit(u64),
    /// Tag present but the target is still unknown.
    Pending,
    /// Tag was absent; a slot was claimed for it.
    Allocated,
    /// Tag was absent and every slot is taken.
    Full,
}

/// Outcome of updating the BTB with a resolved target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BtbResolution {
    /// No entry exists for this PC.
    Untracked,
    /// The stored target matched.
    Correct,
    /// The entry had no target; it now holds the resolved one.
    Populated,
    /// The stored target differed and has been overwritten.
    Mismatch {
        /// The target that was stored before the update.
        stale: u64,
    },
}

/// Fixed-capacity, linearly scanned branch target buffer.
#[derive(Clone, Debug)]
pub struct Btb {
    entries: Vec<BtbEntry>,
    capacity: usize,
}

impl Btb {
    /// Creates an empty BTB holding at most `capacity` branches.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    fn find(&self, pc: u64) -> Option<usize> {
        self.entries.iter().position(|e| e.tag == pc)
    }

    /// Looks up `pc`, claiming a slot for it on a miss.
    ///
    /// # Arguments
    ///
    /// * `pc` - Fetch address of a branch instruction.
    ///
    /// # Returns
    ///
    /// A [`BtbLookup`]; only [`BtbLookup::Hit`] carries a usable prediction.
    pub fn lookup(&mut self, pc: u64) -> BtbLookup {
        if let Some(i) = self.find(pc) {
            return self.entries[i].target.map_or(BtbLookup::Pending, BtbLookup::Hit);
        }
        if self.entries.len() < self.capacity {
            self.entries.push(BtbEntry {
                tag: pc,
                target: None,
            });
            BtbLookup::Allocated
        } else {
            BtbLookup::Full
        }
    }

    /// Records the resolved taken-target of the branch at `pc`.
    pub fn resolve(&mut self, pc: u64, target: u64) -> BtbResolution {
        let Some(i) = self.find(pc) else {
            return BtbResolution::Untracked;
        };
        let entry = &mut self.entries[i];
        match entry.target {
            Some(t) if t == target => BtbResolution::Correct,
            Some(stale) => {
                entry.target = Some(target);
                BtbResolution::Mismatch { stale }
            }
            None => {
                entry.target = Some(target);
                BtbResolution::Populated
            }
        }
    }

    /// Entry for `pc`, without allocating.
    pub fn probe(&self, pc: u64) -> Option<&BtbEntry> {
        self.find(pc).map(|i| &self.entries[i])
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no branch has been seen yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of slots.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}
