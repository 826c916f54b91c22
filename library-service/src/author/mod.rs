pub mod edit_author_command;
pub mod query_manager;
pub mod repository;
