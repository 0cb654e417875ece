//! # Entry Store
//! src/journal/store.rs
//!
//! Persiste cada batch en un archivo fechado por el instante UTC de captura:
//!
//! ```text
//! entries/YYYY/MM/DD/HHMMSS.json
//! ```
//!
//! Después de escribir el archivo regenera siempre el script de render con
//! el mismo batch, así que los dos artefactos cambian juntos.
//!
//! La resolución es de un segundo: dos batches en el mismo segundo UTC caen
//! en el mismo path y el segundo sobrescribe al primero.

use crate::error::StoreError;
use crate::journal::{Batch, Clock, RenderScriptGenerator};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{info, warn};

/// Archivo de entradas recién escrito
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEntry {
    /// Path completo del archivo
    pub path: PathBuf,

    /// Instante de captura usado para derivar el path
    pub captured_at: DateTime<Utc>,
}

/// Path relativo a la raíz de entradas para un instante de captura
///
/// # Ejemplo
/// ```
/// use chrono::{TimeZone, Utc};
/// use journal_server::journal::entry_relative_path;
///
/// let t = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
/// assert_eq!(entry_relative_path(t).to_str(), Some("2024/01/01/120000.json"));
/// ```
pub fn entry_relative_path(captured_at: DateTime<Utc>) -> PathBuf {
    PathBuf::from(captured_at.format("%Y/%m/%d/%H%M%S.json").to_string())
}

/// Almacén de batches bajo la raíz de entradas
pub struct EntryStore {
    entries_root: PathBuf,
    clock: Box<dyn Clock>,
    renderer: RenderScriptGenerator,

    /// Serializa las escrituras: dos requests en el mismo segundo calculan
    /// el mismo path
    write_lock: Mutex<()>,
}

impl EntryStore {
    pub fn new(
        entries_root: impl Into<PathBuf>,
        clock: Box<dyn Clock>,
        renderer: RenderScriptGenerator,
    ) -> Self {
        Self {
            entries_root: entries_root.into(),
            clock,
            renderer,
            write_lock: Mutex::new(()),
        }
    }

    /// Guarda el batch y regenera el script de render
    pub fn store(&self, batch: &Batch) -> Result<StoredEntry, StoreError> {
        // Un panic con el lock tomado no deja estado en memoria que proteger
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let captured_at = self.clock.now();
        let path = self.entries_root.join(entry_relative_path(captured_at));

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        if path.exists() {
            warn!(path = %path.display(), "entry file for this second already exists, overwriting");
        }

        fs::write(&path, batch.as_str()).map_err(|source| StoreError::Write {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), bytes = batch.as_str().len(), "batch stored");

        self.renderer.render(batch)?;

        Ok(StoredEntry { path, captured_at })
    }
}
