//! Movie discovery core: catalog client, preference store, search and
//! recommendations for a presentation layer to drive.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod telemetry;

pub use api::{handlers, AppState};
pub use config::Config;
pub use error::{AppError, AppResult};
