//! # Journal
//! src/journal/mod.rs
//!
//! Pipeline de persistencia de entradas:
//!
//! ```text
//! POST /          → EntryStore → RenderScriptGenerator
//! POST /previous  → ReplayLoader → EntryStore → RenderScriptGenerator
//! ```
//!
//! El proceso no guarda estado en memoria entre requests: todo vive en el
//! árbol de entradas y en el script de render.

pub mod batch;
pub mod clock;
pub mod render;
pub mod replay;
pub mod store;

pub use batch::Batch;
pub use clock::{Clock, SystemClock};
pub use render::{RenderScriptGenerator, ScriptTemplate};
pub use replay::{ReplayLoader, ReplayResult};
pub use store::{entry_relative_path, EntryStore, StoredEntry};

use crate::config::Config;
use crate::error::TemplateError;
use crate::static_files::StaticFileServer;

/// Estado compartido por los handlers del dispatcher
pub struct Journal {
    pub store: EntryStore,
    pub replay: ReplayLoader,
    pub files: StaticFileServer,
}

impl Journal {
    /// Arma los componentes a partir de la configuración
    ///
    /// El template se carga y valida acá, una sola vez.
    pub fn from_config(config: &Config) -> Result<Self, TemplateError> {
        Self::with_clock(config, Box::new(SystemClock))
    }

    /// Igual que `from_config` pero con un reloj propio
    pub fn with_clock(config: &Config, clock: Box<dyn Clock>) -> Result<Self, TemplateError> {
        let template = match &config.template {
            Some(path) => ScriptTemplate::from_file(path)?,
            None => ScriptTemplate::default(),
        };

        let renderer = RenderScriptGenerator::new(template, config.script_path());
        let entries_root = config.entries_root();

        Ok(Self {
            store: EntryStore::new(&entries_root, clock, renderer),
            replay: ReplayLoader::new(&entries_root),
            files: StaticFileServer::new(&config.root),
        })
    }
}
