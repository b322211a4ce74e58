//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign/propagate request ID)
//!     → handlers.rs
//!         /resolve (form)      → resolver → Redirect | identifier page | form with error
//!         /api/resolve (JSON)  → resolver → Report
//!         fallback             → canonical entity page or 404
//!     → pages.rs (HTML rendering)
//! ```

pub mod handlers;
pub mod pages;
pub mod request;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
