//! Ad-copy generation feature: prompt rendering, per-platform completion
//! calls and spreadsheet export of the latest batch.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/ad-copies/generate` | Generate copies for the selected platform(s) |
//! | GET | `/api/ad-copies/latest` | Last generated batch |
//! | POST | `/api/ad-copies/export` | Export the last batch to a new spreadsheet |

pub mod clients;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::AdCopyService;
