//! API Routes
//!
//! Route handlers organized by functionality.

pub mod complaints;
pub mod dashboard;
pub mod health;
