pub mod article;
pub mod tag;
pub mod user;
