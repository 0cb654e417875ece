//! # Módulo HTTP
//!
//! Implementación mínima del protocolo HTTP escrita desde cero:
//!
//! - Lectura de requests (request line, headers y body por `Content-Length`)
//! - Construcción de responses HTTP/1.0
//! - Status codes
//!
//! Las respuestas siempre son HTTP/1.0 con `Connection: close`; cada conexión
//! lleva exactamente un request.

pub mod request;   // Lectura y parsing de requests
pub mod response;  // Construcción de responses
pub mod status;    // Códigos de estado HTTP

pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
