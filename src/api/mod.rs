//! Gridstore API Server module
//!
//! Provides the HTTP REST boundary for the browser front-end.
//! Run with `gridstore-server`.

pub mod handlers;
pub mod server;

pub use server::run_api_server;
