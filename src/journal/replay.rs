//! # Replay Loader
//! src/journal/replay.rs
//!
//! Re-envía un batch guardado por el mismo pipeline que una entrada nueva.
//! Replay es "reenviar", no "recuperar": siempre crea un archivo nuevo con
//! el instante del replay y regenera el script de render.

use crate::error::StoreError;
use crate::journal::{Batch, EntryStore, StoredEntry};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Resultado de un replay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayResult {
    /// `false` si el archivo no existe o no se pudo leer
    pub found: bool,

    /// Archivo nuevo creado por el replay
    pub stored: Option<StoredEntry>,
}

impl ReplayResult {
    fn not_found() -> Self {
        Self {
            found: false,
            stored: None,
        }
    }
}

/// Resuelve archivos guardados relativos a la raíz de entradas
#[derive(Debug, Clone)]
pub struct ReplayLoader {
    entries_root: PathBuf,
}

impl ReplayLoader {
    pub fn new(entries_root: impl Into<PathBuf>) -> Self {
        Self {
            entries_root: entries_root.into(),
        }
    }

    /// Re-envía `relative_file` (ej: `2024/01/01/120000.json`) al store
    ///
    /// Un archivo que no se puede resolver, abrir o decodificar cuenta como
    /// no encontrado y no se persiste nada. Las fallas del store se propagan.
    pub fn replay(&self, relative_file: &str, store: &EntryStore) -> Result<ReplayResult, StoreError> {
        let Some(content) = self.load(relative_file) else {
            return Ok(ReplayResult::not_found());
        };

        let stored = store.store(&Batch::from_stored(&content))?;
        info!(
            source = relative_file,
            path = %stored.path.display(),
            "stored batch replayed"
        );

        Ok(ReplayResult {
            found: true,
            stored: Some(stored),
        })
    }

    fn load(&self, relative_file: &str) -> Option<String> {
        let path = match self.resolve(relative_file) {
            Ok(path) => path,
            Err(e) => {
                debug!(file = relative_file, error = %e, "replay source could not be resolved");
                return None;
            }
        };

        match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "replay source could not be read");
                None
            }
        }
    }

    fn resolve(&self, relative_file: &str) -> std::io::Result<PathBuf> {
        fs::canonicalize(self.entries_root.join(relative_file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::{Clock, RenderScriptGenerator, ScriptTemplate};
    use chrono::{DateTime, TimeZone, Utc};
    use tempfile::TempDir;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn setup() -> (TempDir, EntryStore, ReplayLoader) {
        let dir = TempDir::new().unwrap();
        let entries = dir.path().join("entries");
        let renderer = RenderScriptGenerator::new(
            ScriptTemplate::parse("show({json_data});").unwrap(),
            dir.path().join("script.js"),
        );
        let clock = FixedClock(Utc.with_ymd_and_hms(2025, 6, 2, 9, 15, 0).unwrap());
        let store = EntryStore::new(&entries, Box::new(clock), renderer);
        let loader = ReplayLoader::new(&entries);
        (dir, store, loader)
    }

    fn seed(dir: &TempDir, relative: &str, content: &str) {
        let path = dir.path().join("entries").join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_replay_creates_new_file() {
        let (dir, store, loader) = setup();
        let original = "[\n  {\"entryTime\": \"2024-01-01T12:00:00Z\", \"text\": \"hi\"}\n]\n";
        seed(&dir, "2024/01/01/120000.json", original);

        let result = loader.replay("2024/01/01/120000.json", &store).unwrap();

        assert!(result.found);
        let stored = result.stored.unwrap();
        assert_eq!(stored.path, dir.path().join("entries/2025/06/02/091500.json"));
        let expected = "[  {\"entryTime\": \"2024-01-01T12:00:00Z\", \"text\": \"hi\"}]";
        assert_eq!(fs::read_to_string(&stored.path).unwrap(), expected);

        // El original queda intacto
        let source = dir.path().join("entries/2024/01/01/120000.json");
        assert_eq!(fs::read_to_string(source).unwrap(), original);

        let script = fs::read_to_string(dir.path().join("script.js")).unwrap();
        assert_eq!(script, format!("show({});", expected));
    }

    #[test]
    fn test_replay_missing_file() {
        let (dir, store, loader) = setup();

        let result = loader.replay("2024/01/01/000000.json", &store).unwrap();

        assert_eq!(result, ReplayResult::not_found());
        assert!(!dir.path().join("entries").exists());
        assert!(!dir.path().join("script.js").exists());
    }

    #[test]
    fn test_replay_directory_is_not_found() {
        let (dir, store, loader) = setup();
        seed(&dir, "2024/01/01/120000.json", "[]");

        let result = loader.replay("2024/01", &store).unwrap();

        assert!(!result.found);
        assert!(!dir.path().join("script.js").exists());
    }

    #[test]
    fn test_replay_non_utf8_is_not_found() {
        let (dir, store, loader) = setup();
        let path = dir.path().join("entries/bad.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let result = loader.replay("bad.json", &store).unwrap();

        assert!(!result.found);
    }
}
