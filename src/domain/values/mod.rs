pub mod article_status;
pub mod identity;
pub mod window;
