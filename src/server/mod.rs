//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones de a una
//! 3. Lee y despacha el request
//! 4. Escribe la respuesta y cierra

pub mod tcp;

pub use tcp::{install_shutdown_handler, local_ip, Server};
