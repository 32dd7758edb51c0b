pub mod candidate;
pub mod dashboard;
