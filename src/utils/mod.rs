pub mod document;
pub mod profiler;

pub use self::document::{read_document, write_result};
pub use self::profiler::{ProfileReport, StageProfiler};
