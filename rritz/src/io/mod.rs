pub mod report;
pub mod trial_log;
