/// Scriptable and fault-injecting platforms.
pub mod platform;
