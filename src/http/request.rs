//! # Parsing de Requests HTTP
//! src/http/request.rs
//!
//! Parser HTTP/1.0 (acepta también requests HTTP/1.1) escrito desde cero.
//!
//! ## Formato de un Request
//!
//! ```text
//! POST / HTTP/1.1\r\n
//! Host: localhost:8000\r\n
//! Content-Length: 52\r\n
//! \r\n
//! [{"entryTime":"2024-01-01T12:00:00Z","text":"hola"}]
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /path HTTP/1.x`
//! 2. **Headers**: Pares `Name: Value` (uno por línea)
//! 3. **Empty Line**: `\r\n` que separa headers del body
//! 4. **Body**: exactamente `Content-Length` bytes (obligatorio en POST)

use std::io::{ErrorKind, Read};

/// Tamaño de cada lectura del socket
const READ_CHUNK: usize = 8192;

/// Límite para la sección de headers
const MAX_HEAD_SIZE: usize = 64 * 1024;

/// Límite para el body declarado en `Content-Length`
const MAX_BODY_SIZE: usize = 8 * 1024 * 1024;

/// Métodos HTTP soportados
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un archivo
    GET,

    /// POST - Enviar entradas o pedir un replay
    POST,
}

impl Method {
    fn from_str(s: &str) -> Result<Self, ParseError> {
        match s {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            _ => Err(ParseError::UnsupportedMethod(s.to_string())),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
        }
    }
}

/// Representa un request HTTP parseado
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP (GET, POST)
    method: Method,

    /// Path tal como llegó en la request line (sin decodificar)
    path: String,

    /// Headers en orden de llegada
    headers: Vec<(String, String)>,

    /// Body del request (vacío salvo en POST)
    body: Vec<u8>,
}

/// Errores que pueden ocurrir durante la lectura o el parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// La conexión se cerró antes de terminar los headers
    #[error("Incomplete HTTP request")]
    IncompleteRequest,

    /// Formato inválido de la request line
    #[error("Invalid request line format")]
    InvalidRequestLine,

    /// Método HTTP no soportado
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// Versión HTTP incorrecta
    #[error("Invalid HTTP version: {0}")]
    InvalidHttpVersion(String),

    /// Header malformado
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Headers demasiado grandes
    #[error("Request head too large")]
    HeadTooLarge,

    /// Content-Length mayor que `MAX_BODY_SIZE`
    #[error("Request body too large: {0} bytes")]
    BodyTooLarge(usize),

    /// POST sin Content-Length
    #[error("Missing Content-Length header")]
    MissingContentLength,

    /// Content-Length no numérico
    #[error("Invalid Content-Length: {0}")]
    InvalidContentLength(String),

    /// Request vacío (el peer cerró sin enviar nada)
    #[error("Empty request")]
    EmptyRequest,

    /// Error de I/O leyendo el socket
    #[error("I/O error while reading request: {0:?}")]
    Io(ErrorKind),
}

impl Request {
    /// Lee un request completo desde un stream
    ///
    /// Lee hasta encontrar el fin de los headers y después exactamente
    /// `Content-Length` bytes de body.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self, ParseError> {
        let mut buffer = Vec::with_capacity(READ_CHUNK);
        let mut chunk = [0u8; READ_CHUNK];

        let head_end = loop {
            if let Some(pos) = find_head_end(&buffer) {
                break pos;
            }
            if buffer.len() > MAX_HEAD_SIZE {
                return Err(ParseError::HeadTooLarge);
            }

            let n = reader.read(&mut chunk).map_err(|e| ParseError::Io(e.kind()))?;
            if n == 0 {
                return Err(if buffer.iter().all(u8::is_ascii_whitespace) {
                    ParseError::EmptyRequest
                } else {
                    ParseError::IncompleteRequest
                });
            }
            buffer.extend_from_slice(&chunk[..n]);
        };

        let mut request = Self::parse_head(&buffer[..head_end])?;

        let length = request.content_length()?;
        if length > MAX_BODY_SIZE {
            return Err(ParseError::BodyTooLarge(length));
        }

        let mut body = buffer[head_end + 4..].to_vec();
        if body.len() < length {
            let missing = (length - body.len()) as u64;
            reader
                .by_ref()
                .take(missing)
                .read_to_end(&mut body)
                .map_err(|e| ParseError::Io(e.kind()))?;
            if body.len() < length {
                return Err(ParseError::IncompleteRequest);
            }
        } else {
            body.truncate(length);
        }
        request.body = body;

        Ok(request)
    }

    /// Parsea un request HTTP completo desde bytes
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use journal_server::http::Request;
    ///
    /// let raw = b"GET /index.html HTTP/1.0\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.path(), "/index.html");
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let mut reader = buffer;
        Self::read_from(&mut reader)
    }

    /// Parsea request line + headers (sin el `\r\n\r\n` final)
    fn parse_head(head: &[u8]) -> Result<Self, ParseError> {
        let head = std::str::from_utf8(head).map_err(|_| ParseError::InvalidRequestLine)?;
        let mut lines = head.split("\r\n");

        let request_line = lines.next().ok_or(ParseError::IncompleteRequest)?;
        let (method, path) = Self::parse_request_line(request_line)?;
        let headers = Self::parse_headers(lines)?;

        Ok(Request {
            method,
            path,
            headers,
            body: Vec::new(),
        })
    }

    /// Formato: `POST /previous HTTP/1.1`
    ///
    /// La versión se valida pero no se guarda: la respuesta siempre es HTTP/1.0.
    fn parse_request_line(line: &str) -> Result<(Method, String), ParseError> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        // Debe tener exactamente 3 partes: METHOD PATH VERSION
        if parts.len() != 3 {
            return Err(ParseError::InvalidRequestLine);
        }

        let method = Method::from_str(parts[0])?;

        let version = parts[2];
        if version != "HTTP/1.0" && version != "HTTP/1.1" {
            return Err(ParseError::InvalidHttpVersion(version.to_string()));
        }

        Ok((method, parts[1].to_string()))
    }

    fn parse_headers<'a>(
        lines: impl Iterator<Item = &'a str>,
    ) -> Result<Vec<(String, String)>, ParseError> {
        let mut headers = Vec::new();

        for line in lines {
            if line.trim().is_empty() {
                break;
            }

            match line.split_once(':') {
                Some((name, value)) => {
                    headers.push((name.trim().to_string(), value.trim().to_string()));
                }
                None => return Err(ParseError::InvalidHeader(line.to_string())),
            }
        }

        Ok(headers)
    }

    /// Longitud del body declarada por el cliente
    ///
    /// En POST el header es obligatorio; en los demás métodos se asume 0
    /// si no viene.
    fn content_length(&self) -> Result<usize, ParseError> {
        match self.header("Content-Length") {
            Some(value) => value
                .parse()
                .map_err(|_| ParseError::InvalidContentLength(value.to_string())),
            None if self.method == Method::POST => Err(ParseError::MissingContentLength),
            None => Ok(0),
        }
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> Method {
        self.method
    }

    /// Obtiene el path del request
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene un header específico (sin distinguir mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Obtiene el body del request
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Obtiene el body decodificado como UTF-8
    pub fn body_str(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.body)
    }
}

/// Posición del `\r\n\r\n` que termina los headers
fn find_head_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(4).position(|w| w == b"\r\n\r\n")
}
