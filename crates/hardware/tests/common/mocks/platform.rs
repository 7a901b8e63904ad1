use mockall::mock;
use rvpipe_core::common::error::MemoryFault;
use rvpipe_core::soc::{Platform, System};

mock! {
    pub Platform {}

    impl Platform for Platform {
        fn read_memory(&mut self, addr: u64, buf: &mut [u8]) -> Result<(), MemoryFault>;
        fn write_memory(&mut self, addr: u64, value: u64, size: usize) -> Result<(), MemoryFault>;
        fn memory_ready(&mut self, addr: u64) -> bool;
        fn read_register(&self, idx: usize) -> u64;
        fn write_register(&mut self, idx: usize, value: u64);
        fn get_pc(&self) -> u64;
        fn set_pc(&mut self, pc: u64);
    }
}

/// A [`System`] whose next `fail_writes` writes and `fail_reads` reads are refused.
pub struct FlakyPlatform {
    pub inner: System,
    pub fail_writes: usize,
    pub fail_reads: usize,
    pub refused_writes: usize,
    pub refused_reads: usize,
}

impl FlakyPlatform {
    pub fn new(inner: System) -> Self {
        Self {
            inner,
            fail_writes: 0,
            fail_reads: 0,
            refused_writes: 0,
            refused_reads: 0,
        }
    }
}

impl Platform for FlakyPlatform {
    fn read_memory(&mut self, addr: u64, buf: &mut [u8]) -> Result<(), MemoryFault> {
        if self.fail_reads > 0 {
            self.fail_reads -= 1;
            self.refused_reads += 1;
            return Err(MemoryFault::Read {
                addr,
                size: buf.len(),
            });
        }
        self.inner.read_memory(addr, buf)
    }

    fn write_memory(&mut self, addr: u64, value: u64, size: usize) -> Result<(), MemoryFault> {
        if self.fail_writes > 0 {
            self.fail_writes -= 1;
            self.refused_writes += 1;
            return Err(MemoryFault::Write { addr, size });
        }
        self.inner.write_memory(addr, value, size)
    }

    fn memory_ready(&mut self, addr: u64) -> bool {
        self.inner.memory_ready(addr)
    }

    fn read_register(&self, idx: usize) -> u64 {
        self.inner.read_register(idx)
    }

    fn write_register(&mut self, idx: usize, value: u64) {
        self.inner.write_register(idx, value);
    }

    fn get_pc(&self) -> u64 {
        self.inner.get_pc()
    }

    fn set_pc(&mut self, pc: u64) {
        self.inner.set_pc(pc);
    }
}
