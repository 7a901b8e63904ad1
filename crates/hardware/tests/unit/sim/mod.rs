/// Flat and ELF program loading.
pub mod loader;
