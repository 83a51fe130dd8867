//! Web boundary: view and upload routes
//!
//! Thin glue over the pipeline. Upload-validation failures are
//! user-visible messages; pipeline errors become error pages.

mod handler;
mod server;

pub use server::{router, HttpServer};
