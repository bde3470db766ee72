pub mod config;
pub mod i18n;
pub mod permissions;
pub mod roles;
pub mod server;
