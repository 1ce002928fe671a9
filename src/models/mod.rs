pub mod log_entry;
pub mod region;
pub mod report;
