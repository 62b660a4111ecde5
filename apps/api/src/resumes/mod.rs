//! Résumé upload, listing and analysis.

pub mod handlers;
pub mod store;
