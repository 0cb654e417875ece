//! # Generador del Script de Render
//! src/journal/render.rs
//!
//! Cada vez que se guarda un batch se regenera `script.js`: un template fijo
//! con el texto del batch inyectado. El navegador carga ese script para
//! dibujar la tabla de entradas. El servidor nunca lo ejecuta.
//!
//! ## Template
//!
//! Debe contener exactamente un placeholder `{json_data}`. La sustitución es
//! un reemplazo literal, así que el template no necesita escapar llaves y el
//! texto del batch nunca se vuelve a escanear.

use crate::error::{RenderError, TemplateError};
use crate::journal::Batch;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Marcador donde se inyecta el batch
pub const PLACEHOLDER: &str = "{json_data}";

/// Template incluido en el binario
///
/// El batch se inyecta como literal de array de JS: un JSON válido ya es una
/// expresión válida, así que el texto de las entradas nunca se reinterpreta.
pub const DEFAULT_TEMPLATE: &str = r#"(function () {
    const container = document.getElementById("entries");
    while (container.firstChild) {
        container.removeChild(container.firstChild);
    }

    const entries = {json_data};

    const table = document.createElement("table");
    const header = table.insertRow();
    for (const title of ["Entry Time", "Text"]) {
        const th = document.createElement("th");
        th.textContent = title;
        header.appendChild(th);
    }

    for (const entry of entries) {
        const row = table.insertRow();
        row.insertCell().textContent = entry.entryTime;
        row.insertCell().textContent = "- " + entry.text;
    }

    container.appendChild(table);
})();
"#;

/// Template validado con un único placeholder
#[derive(Debug, Clone)]
pub struct ScriptTemplate {
    text: String,
}

impl ScriptTemplate {
    /// Valida un template en memoria
    pub fn parse(text: impl Into<String>) -> Result<Self, TemplateError> {
        let text = text.into();
        let found = text.matches(PLACEHOLDER).count();
        if found != 1 {
            return Err(TemplateError::Placeholder {
                placeholder: PLACEHOLDER,
                found,
            });
        }
        Ok(Self { text })
    }

    /// Carga y valida un template desde disco (una sola vez, al arrancar)
    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let text = fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(text)
    }

    /// Inyecta el batch en el placeholder
    pub fn render(&self, batch: &Batch) -> String {
        self.text.replacen(PLACEHOLDER, batch.as_str(), 1)
    }
}

impl Default for ScriptTemplate {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

/// Escribe el script de render en su ubicación fija
#[derive(Debug, Clone)]
pub struct RenderScriptGenerator {
    template: ScriptTemplate,
    script_path: PathBuf,
}

impl RenderScriptGenerator {
    pub fn new(template: ScriptTemplate, script_path: impl Into<PathBuf>) -> Self {
        Self {
            template,
            script_path: script_path.into(),
        }
    }

    /// Regenera el script con el batch, sobrescribiendo el anterior
    pub fn render(&self, batch: &Batch) -> Result<(), RenderError> {
        let script = self.template.render(batch);
        fs::write(&self.script_path, script).map_err(|source| RenderError::Write {
            path: self.script_path.clone(),
            source,
        })?;

        debug!(path = %self.script_path.display(), bytes = batch.as_str().len(), "render script regenerated");
        Ok(())
    }
}
