//! # Servidor TCP Secuencial
//! src/server/tcp.rs
//!
//! Acepta una conexión, la atiende completa y recién entonces acepta la
//! siguiente. No hay pool de workers: el único estado compartido son los
//! archivos de entradas y el script de render.

use crate::config::Config;
use crate::handlers;
use crate::http::{ParseError, Request, Response, StatusCode};
use crate::journal::Journal;
use crate::router::{self, Router};
use std::io::{self, Write};
use std::net::{IpAddr, SocketAddr, TcpListener, TcpStream, UdpSocket};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Tiempo máximo esperando bytes de un cliente
const READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Servidor HTTP/1.0 de entradas de diario
pub struct Server {
    config: Config,
    router: Router<Journal>,
    journal: Journal,
    listener: Option<TcpListener>,
}

impl Server {
    pub fn new(config: Config, journal: Journal) -> Self {
        Self {
            config,
            router: handlers::journal_router(),
            journal,
            listener: None,
        }
    }

    /// Abre el socket en la dirección configurada
    ///
    /// Separado de `run` para que los tests puedan usar el puerto 0 y conocer
    /// la dirección real antes de entrar al loop.
    pub fn bind(&mut self) -> io::Result<SocketAddr> {
        let listener = TcpListener::bind(self.config.address())?;
        let addr = listener.local_addr()?;
        self.listener = Some(listener);
        Ok(addr)
    }

    /// Loop principal: atiende conexiones una por una, para siempre
    pub fn run(&mut self) -> io::Result<()> {
        if self.listener.is_none() {
            self.bind()?;
        }
        let listener = match &self.listener {
            Some(listener) => listener,
            None => return Err(io::Error::new(io::ErrorKind::NotConnected, "listener not bound")),
        };

        let port = listener.local_addr()?.port();
        let shown_ip = local_ip()
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| self.config.host.clone());
        info!("Server started http://{}:{}", shown_ip, port);

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    if let Err(e) = self.handle_connection(stream) {
                        warn!(error = %e, "connection error");
                    }
                }
                Err(e) => warn!(error = %e, "failed to accept connection"),
            }
        }

        Ok(())
    }

    /// Lee un request, lo despacha y escribe la respuesta
    pub fn handle_connection(&self, mut stream: TcpStream) -> io::Result<()> {
        let start = Instant::now();
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        stream.set_read_timeout(Some(READ_TIMEOUT))?;

        let (response, method, path) = match Request::read_from(&mut stream) {
            Ok(request) => {
                let response = self.router.route(&request, &self.journal);
                (response, request.method().as_str(), request.path().to_string())
            }
            Err(ParseError::EmptyRequest) => {
                debug!(%peer, "connection closed without a request");
                return Ok(());
            }
            Err(e) => {
                debug!(%peer, error = %e, "invalid request");
                (parse_error_response(&e), "-", "-".to_string())
            }
        };

        stream.write_all(&response.to_bytes())?;
        stream.flush()?;

        let status = response.status();
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
        if status.is_server_error() {
            warn!(%peer, method, path = %path, status = status.as_u16(), latency_ms, "request");
        } else {
            info!(%peer, method, path = %path, status = status.as_u16(), latency_ms, "request");
        }

        Ok(())
    }
}

/// Respuesta para un request que no se pudo leer
fn parse_error_response(err: &ParseError) -> Response {
    let status = match err {
        ParseError::UnsupportedMethod(_) => StatusCode::NotImplemented,
        ParseError::MissingContentLength => StatusCode::LengthRequired,
        ParseError::BodyTooLarge(_) => StatusCode::PayloadTooLarge,
        _ => StatusCode::BadRequest,
    };

    let mut response = Response::error(status, &format!("Invalid: {}", err));
    router::add_common_headers(&mut response);
    response
}

/// Registra un handler de Ctrl-C que deja constancia del apagado
///
/// El proceso termina apenas llega la señal, sin esperar escrituras en curso.
/// Solo se puede instalar una vez por proceso.
pub fn install_shutdown_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| {
        info!("Server stopped.");
        std::process::exit(0);
    })
}

/// IP local con la que se alcanza la red (para mostrar una URL usable)
///
/// Conectar un socket UDP no envía paquetes; solo fija la interfaz de salida.
pub fn local_ip() -> Option<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect("8.8.8.8:80").ok()?;
    socket.local_addr().ok().map(|addr| addr.ip())
}
