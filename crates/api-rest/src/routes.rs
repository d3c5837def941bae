//! HTTP route handlers.
//!
//! Health checks live at the root; everything else is versioned under `/api/v1`.

pub mod health;
pub mod v1;
