//! # Journal Server - Entry Point
//! src/main.rs
//!
//! Parsea la configuración, inicializa el logging y arranca el servidor.
//! Ctrl-C registra `Server stopped.` y termina el proceso.

use journal_server::config::Config;
use journal_server::journal::Journal;
use journal_server::server::{install_shutdown_handler, Server};
use tracing::{debug, error};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::new();

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    debug!(?config, "parsed configuration");

    if let Err(e) = config.validate() {
        error!("invalid configuration: {}", e);
        return Err(e.into());
    }
    config.log_summary();

    let journal = Journal::from_config(&config)?;
    install_shutdown_handler()?;

    let mut server = Server::new(config, journal);
    server.run()?;

    Ok(())
}
