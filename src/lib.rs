pub mod app;
pub mod commands;
pub mod domain;
pub mod error;
pub mod infra;
pub mod session;

use commands::Presenter;
use error::AppError;
use infra::{init_db, logging::init_logging, AppConfig};
use session::{run_session, Terminal};

/// Startup: config, logging, schema, demo data, then the interactive session.
/// Any failure before the session starts is returned to the caller as fatal.
pub fn run() -> Result<(), AppError> {
    let config = AppConfig::from_env()?;
    if let Err(e) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("logging disabled: {}", e);
    }

    log::info!("DB path: {:?}", config.db_path);
    let db = init_db(&config.db_path).map_err(|e| {
        log::error!("DB init failed: {}", e);
        e
    })?;

    let report = app::seed_sample_data(&db)?;
    log::info!(
        "Sample data: {} user(s), {} post(s) inserted",
        report.users_inserted,
        report.posts_inserted
    );

    let mut presenter = Presenter::new(db)?;
    let stdin = std::io::stdin();
    let mut term = Terminal::new(stdin.lock(), std::io::stdout());
    run_session(&mut presenter, &mut term)
}
