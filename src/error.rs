//! # Errores del Servidor
//! src/error.rs
//!
//! Tipos de error de cada componente. Los errores de parsing HTTP viven en
//! `http::request::ParseError`.

use std::io;
use std::path::PathBuf;

/// Falla al escribir el script de render
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to write render script {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Falla al persistir un batch
///
/// Incluye las fallas del render porque ambos artefactos cambian juntos.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to create entry directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write entry file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Template de script inválido (se detecta al arrancar)
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("failed to read script template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("script template must contain exactly one {placeholder} placeholder, found {found}")]
    Placeholder {
        placeholder: &'static str,
        found: usize,
    },
}

/// Motivo por el que un archivo estático no se pudo servir
///
/// Todos los casos terminan en el mismo 404; la clasificación queda
/// disponible para logs y tests.
#[derive(Debug, thiserror::Error)]
pub enum StaticFileError {
    /// El path literal `.py` nunca se sirve
    #[error("path is excluded")]
    Excluded,

    #[error("file not found")]
    NotFound,

    #[error("permission denied")]
    PermissionDenied,

    /// Cualquier otra falla (incluye leer un directorio)
    #[error("I/O error: {0}")]
    Io(#[source] io::Error),
}

impl From<io::Error> for StaticFileError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => StaticFileError::NotFound,
            io::ErrorKind::PermissionDenied => StaticFileError::PermissionDenied,
            _ => StaticFileError::Io(err),
        }
    }
}
