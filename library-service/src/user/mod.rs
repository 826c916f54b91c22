pub mod create_user_command;
pub mod login_command;
pub mod repository;
