//! Option store backends

pub mod memory;
pub mod redis;

pub use memory::MemoryOptionStore;
pub use redis::RedisOptionStore;
