pub mod ad_copy_service;

pub use ad_copy_service::AdCopyService;
