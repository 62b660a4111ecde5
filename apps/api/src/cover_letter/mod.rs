//! Cover-letter generation from a stored résumé.

pub mod handlers;
