pub mod attendance;
pub mod register;
pub mod report;
