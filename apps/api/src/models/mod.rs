pub mod outcome;
pub mod resume;
