//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración por argumentos CLI y variables de entorno. Todo lo que antes
//! era estado implícito del proceso (directorio de trabajo, raíz de entradas,
//! nombre del script) se pasa explícitamente a los componentes desde acá.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./journal_server --port 8000 --root ./web --log-level debug
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! JOURNAL_PORT=8000 JOURNAL_HOST=0.0.0.0 ./journal_server
//! ```

use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};

/// Configuración del servidor de diario
#[derive(Debug, Clone, Parser)]
#[command(name = "journal_server")]
#[command(about = "Servidor HTTP/1.0 local para guardar y mostrar entradas de diario")]
#[command(version)]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8000", env = "JOURNAL_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "JOURNAL_HOST")]
    pub host: String,

    /// Raíz del servidor: archivos estáticos, entradas y script viven acá
    #[arg(long, default_value = ".", env = "JOURNAL_ROOT")]
    pub root: PathBuf,

    /// Directorio de entradas, relativo a la raíz
    #[arg(long = "entries-dir", default_value = "entries", env = "JOURNAL_ENTRIES_DIR")]
    pub entries_dir: PathBuf,

    /// Script de render regenerado en cada guardado, relativo a la raíz
    #[arg(long = "script", default_value = "script.js", env = "JOURNAL_SCRIPT")]
    pub script_file: PathBuf,

    /// Template del script (con un único `{json_data}`); sin esto se usa el
    /// template incluido
    #[arg(long, env = "JOURNAL_TEMPLATE")]
    pub template: Option<PathBuf>,

    /// Nivel de log
    #[arg(short, long = "log-level", default_value = "info", env = "JOURNAL_LOG_LEVEL",
          value_parser = clap::value_parser!(Level))]
    pub log_level: Level,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use journal_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:8000");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// `<root>/<entries_dir>`
    pub fn entries_root(&self) -> PathBuf {
        self.root.join(&self.entries_dir)
    }

    /// `<root>/<script_file>`
    pub fn script_path(&self) -> PathBuf {
        self.root.join(&self.script_file)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.entries_dir.as_os_str().is_empty() {
            return Err("Entries dir must not be empty".to_string());
        }
        if self.entries_dir.is_absolute() {
            return Err("Entries dir must be relative to the root".to_string());
        }
        if self.script_file.as_os_str().is_empty() {
            return Err("Script file must not be empty".to_string());
        }
        if self.script_file.is_absolute() {
            return Err("Script file must be relative to the root".to_string());
        }
        if self.host.trim().is_empty() {
            return Err("Host must not be empty".to_string());
        }

        Ok(())
    }

    /// Registra un resumen de la configuración
    pub fn log_summary(&self) {
        info!(address = %self.address(), root = %self.root.display(), "network");
        info!(
            entries = %self.entries_root().display(),
            script = %self.script_path().display(),
            template = %self
                .template
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in".to_string()),
            "storage"
        );
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".to_string(),
            root: PathBuf::from("."),
            entries_dir: PathBuf::from("entries"),
            script_file: PathBuf::from("script.js"),
            template: None,
            log_level: Level::INFO,
        }
    }
}
