/// Header row written to every exported spreadsheet
pub const EXPORT_HEADER: [&str; 3] = ["Platform", "Headlines", "Descriptions"];

/// Prefix for the platform label in export rows (results come from OpenAI)
pub const EXPORT_LABEL_PREFIX: &str = "OpenAI";

/// OAuth2 scopes required to create, write and share spreadsheets
pub const SHEETS_SCOPES: &str =
    "https://spreadsheets.google.com/feeds https://www.googleapis.com/auth/drive";
