//! HTTP surface of the Weather Trek backend.
//!
//! Routes and handlers live here so integration tests can drive the router
//! without binding a socket; `main.rs` only adds the CLI and middleware.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
