//! Résumé ↔ job description matching.

pub mod handlers;
pub mod input;
