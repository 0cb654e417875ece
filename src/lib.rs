//! # Journal Server
//! src/lib.rs
//!
//! Servidor HTTP/1.0 local que recibe entradas de diario desde el navegador,
//! guarda cada envío en un archivo fechado y regenera `script.js` para que la
//! página muestre el último batch como tabla.
//!
//! ## Arquitectura
//!
//! - `http`: Lectura de requests y construcción de responses
//! - `server`: Loop TCP secuencial (una conexión a la vez)
//! - `router`: Tabla (método, path) → handler
//! - `handlers`: `GET *`, `POST /`, `POST /previous`
//! - `journal`: Entry Store, Render Script Generator y Replay Loader
//! - `static_files`: Lectura de archivos bajo la raíz
//! - `config`: CLI y variables de entorno
//! - `error`: Tipos de error
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use journal_server::config::Config;
//! use journal_server::journal::Journal;
//! use journal_server::server::Server;
//!
//! let config = Config::default();
//! let journal = Journal::from_config(&config).expect("template inválido");
//! let mut server = Server::new(config, journal);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod journal;
pub mod router;
pub mod server;
pub mod static_files;
