//! Infrastructure: SQLite connection, migrations, configuration, logging.

pub mod config;
pub mod db;
pub mod logging;

pub use config::AppConfig;
pub use db::{get_connection, init_db, Database};
