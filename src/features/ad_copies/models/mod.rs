pub mod ad_copy;

pub use ad_copy::{AdCopy, AdPlatform, AdPlatformSelection, ExportRow, GeneratedBatch};
