pub mod article_repository;
pub mod maintenance;
pub mod stats_repository;
pub mod tag_repository;
pub mod user_repository;
