//! Google Sheets export: service-account authentication plus the
//! create / append / share calls against the Sheets and Drive APIs.

pub mod service_account;
pub mod sheets_client;

pub use sheets_client::{SheetExporter, SheetsClient};
