pub mod config;
pub mod env_file;
pub mod layout;
pub mod screens;
pub mod settings;
