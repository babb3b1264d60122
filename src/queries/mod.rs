pub mod candidates;
pub mod users;
