pub mod http;
pub mod sqlite;
