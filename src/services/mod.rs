pub mod candidates;
pub mod jwt;
pub mod storage;
pub mod uploads;
pub mod users;
