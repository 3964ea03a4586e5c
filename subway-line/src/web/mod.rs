//! Web layer for subway line management.
//!
//! Provides HTTP endpoints for adding, removing and listing the sections
//! of in-memory lines.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, LineRegistry};
