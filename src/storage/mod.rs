// storage/mod.rs

pub mod cache;
pub mod metrics;

pub use self::cache::FrequencyCache;
pub use self::metrics::{CacheMetrics, CacheStats};
