pub mod add_book_command;
pub mod query_manager;
pub mod repository;
