//! # Batch
//! src/journal/batch.rs
//!
//! Un batch es el documento JSON que manda el cliente con sus entradas
//! (`[{"entryTime": ..., "timeZone": ..., "text": ...}]`). El servidor nunca
//! lo parsea ni lo valida: se guarda y se inyecta en el script tal cual llega.

/// Texto opaco de un batch de entradas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch(String);

impl Batch {
    /// Batch recibido en `POST /`, sin ninguna transformación
    pub fn from_body(body: &str) -> Self {
        Batch(body.to_string())
    }

    /// Batch leído de un archivo guardado para hacer replay
    ///
    /// Se eliminan todos los `\r` y `\n` para colapsar JSON con formato a una
    /// línea, sin importar si el archivo usa finales de línea LF o CRLF.
    ///
    /// # Ejemplo
    /// ```
    /// use journal_server::journal::Batch;
    ///
    /// let batch = Batch::from_stored("[\n  {\"text\": \"hi\"}\n]\n");
    /// assert_eq!(batch.as_str(), "[  {\"text\": \"hi\"}]");
    /// ```
    pub fn from_stored(content: &str) -> Self {
        Batch(content.replace(['\r', '\n'], ""))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_is_kept_verbatim() {
        let text = "not json at all\n{";
        assert_eq!(Batch::from_body(text).as_str(), text);
    }

    #[test]
    fn test_stored_collapses_crlf_to_one_line() {
        let batch = Batch::from_stored("[\r\n{\"text\":\"hi\"}\r\n]\r\n");
        assert_eq!(batch.as_str(), "[{\"text\":\"hi\"}]");
    }

    #[test]
    fn test_stored_keeps_escaped_newlines() {
        let batch = Batch::from_stored("[\r{\"text\":\"a\\nb\"}\n]");
        assert_eq!(batch.as_str(), "[{\"text\":\"a\\nb\"}]");
    }
}
