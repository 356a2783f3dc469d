pub mod generator;
pub mod cache;

pub use generator::GeneratorConfig;
pub use cache::CacheConfig;
