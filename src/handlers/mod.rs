pub mod auth;
pub mod candidates;
pub mod health;

pub use auth::*;
pub use candidates::*;
pub use health::*;
