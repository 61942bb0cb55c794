pub mod ad_copy_handler;

pub use ad_copy_handler::*;
