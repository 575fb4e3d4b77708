pub mod articles;
pub mod maintenance;
pub mod stats;
pub mod users;
