//! Configuration modules loaded from environment variables.

pub mod database;
pub mod mail;
pub mod server;

pub use database::DatabaseConfig;
pub use mail::MailConfig;
pub use server::ServerConfig;
