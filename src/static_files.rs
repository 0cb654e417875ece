//! # Archivos Estáticos
//! src/static_files.rs
//!
//! Sirve cualquier archivo bajo la raíz del servidor por su path relativo.
//! No hay listado de directorios, ni MIME, ni headers de cache.
//!
//! El path NO se sanitiza: `GET /../secreto.txt` lee fuera de la raíz. Esto
//! solo es aceptable en una red local de confianza.

use crate::error::StaticFileError;
use std::fs;
use std::path::PathBuf;

/// Path que nunca se sirve
const EXCLUDED_PATH: &str = ".py";

/// Lector de archivos relativo a una raíz
#[derive(Debug, Clone)]
pub struct StaticFileServer {
    root: PathBuf,
}

impl StaticFileServer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Lee los bytes crudos del archivo en `path` (ej: `/index.html`)
    pub fn read(&self, path: &str) -> Result<Vec<u8>, StaticFileError> {
        if path == EXCLUDED_PATH {
            return Err(StaticFileError::Excluded);
        }

        Ok(fs::read(self.resolve(path))?)
    }

    /// Quita la `/` inicial y une el resto a la raíz
    fn resolve(&self, path: &str) -> PathBuf {
        let relative = path.strip_prefix('/').unwrap_or(path);
        self.root.join(relative)
    }
}
