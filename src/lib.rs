// Library root
// -----------
// The binary (`main.rs`) parses arguments, sets up logging and calls
// `ui::run`; everything else lives here so it can be tested without a
// server.
//
// Module responsibilities:
// - `models`: read-only records built from the server's JSON.
// - `api`: HTTP access to the server and the submissions join.
// - `presenter`: tables on stdout and CSV export.
// - `cli` / `config`: flags and the INI config file they override.
// - `ui`: runs the requested operations in order.
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod presenter;
pub mod ui;

pub use api::{ApiClient, HttpTransport, Transport};
pub use error::{ClientError, Result};
