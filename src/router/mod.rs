//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Mapea (método, path) a handlers.
//!
//! ```text
//! Request → Router → Handler(&Request, &State) → Response
//! ```
//!
//! Orden de búsqueda:
//! 1. Ruta exacta para el método
//! 2. Fallback del método (ej: `GET *` sirve archivos)
//! 3. 404 si el método tiene rutas, 501 si no tiene ninguna
//!
//! Un handler que devuelve `Err` es una falla de persistencia: se registra
//! y se responde 500.

use crate::error::StoreError;
use crate::http::{Method, Request, Response, StatusCode};
use tracing::error;

/// Resultado de un handler
pub type HandlerResult = Result<Response, StoreError>;

/// Un handler recibe el Request y el estado compartido
pub type Handler<S> = fn(&Request, &S) -> HandlerResult;

/// Router que mapea (método, path) a handlers
pub struct Router<S> {
    routes: Vec<(Method, String, Handler<S>)>,
    fallbacks: Vec<(Method, Handler<S>)>,
}

impl<S> Router<S> {
    /// Crea un nuevo router vacío
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            fallbacks: Vec::new(),
        }
    }

    /// Registra una ruta exacta
    pub fn register(&mut self, method: Method, path: &str, handler: Handler<S>) {
        self.routes.push((method, path.to_string(), handler));
    }

    /// Registra el handler para cualquier path de `method` sin ruta exacta
    pub fn fallback(&mut self, method: Method, handler: Handler<S>) {
        self.fallbacks.push((method, handler));
    }

    /// Encuentra y ejecuta el handler apropiado para un request
    pub fn route(&self, request: &Request, state: &S) -> Response {
        let method = request.method();
        let path = request.path();

        let handler = self
            .routes
            .iter()
            .find(|(m, p, _)| *m == method && p == path)
            .map(|(_, _, h)| h)
            .or_else(|| {
                self.fallbacks
                    .iter()
                    .find(|(m, _)| *m == method)
                    .map(|(_, h)| h)
            });

        let mut response = match handler {
            Some(handler) => handler(request, state).unwrap_or_else(|e| {
                error!(method = method.as_str(), path, error = %e, "request failed");
                Response::error(StatusCode::InternalServerError, &e.to_string())
            }),
            None if self.handles(method) => Response::error(
                StatusCode::NotFound,
                &format!("Route not found: {}", path),
            ),
            None => Response::error(
                StatusCode::NotImplemented,
                &format!("Unsupported method: {}", method.as_str()),
            ),
        };

        add_common_headers(&mut response);
        response
    }

    /// ¿Hay algún handler registrado para este método?
    fn handles(&self, method: Method) -> bool {
        self.routes.iter().any(|(m, _, _)| *m == method)
            || self.fallbacks.iter().any(|(m, _)| *m == method)
    }
}

impl<S> Default for Router<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Agrega headers comunes a todas las respuestas
pub fn add_common_headers(response: &mut Response) {
    response.add_header("Server", concat!("journal_server/", env!("CARGO_PKG_VERSION")));
    response.add_header("Connection", "close");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use std::path::PathBuf;

    struct Counter(std::cell::Cell<u32>);

    fn ok_handler(_req: &Request, state: &Counter) -> HandlerResult {
        state.0.set(state.0.get() + 1);
        Ok(Response::text(StatusCode::Ok, "ok"))
    }

    fn fallback_handler(req: &Request, _state: &Counter) -> HandlerResult {
        Ok(Response::text(StatusCode::Ok, req.path()))
    }

    fn failing_handler(_req: &Request, _state: &Counter) -> HandlerResult {
        Err(StoreError::Render(RenderError::Write {
            path: PathBuf::from("script.js"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        }))
    }

    fn request(raw: &[u8]) -> Request {
        Request::parse(raw).unwrap()
    }

    fn router() -> Router<Counter> {
        let mut router = Router::new();
        router.register(Method::POST, "/", ok_handler);
        router.register(Method::POST, "/boom", failing_handler);
        router.fallback(Method::GET, fallback_handler);
        router
    }

    #[test]
    fn test_exact_route_matches_method_and_path() {
        let state = Counter(std::cell::Cell::new(0));
        let response = router().route(&request(b"POST / HTTP/1.0\r\nContent-Length: 0\r\n\r\n"), &state);

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(state.0.get(), 1);
    }

    #[test]
    fn test_fallback_receives_any_path() {
        let state = Counter(std::cell::Cell::new(0));
        let response = router().route(&request(b"GET /a/b.html HTTP/1.0\r\n\r\n"), &state);

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"/a/b.html");
        assert_eq!(state.0.get(), 0);
    }

    #[test]
    fn test_unknown_path_for_known_method() {
        let state = Counter(std::cell::Cell::new(0));
        let response = router().route(&request(b"POST /other HTTP/1.0\r\nContent-Length: 0\r\n\r\n"), &state);

        assert_eq!(response.status(), StatusCode::NotFound);
    }

    #[test]
    fn test_method_without_handlers() {
        let state = Counter(std::cell::Cell::new(0));
        let mut post_only = Router::new();
        post_only.register(Method::POST, "/", ok_handler);

        let response = post_only.route(&request(b"GET / HTTP/1.0\r\n\r\n"), &state);

        assert_eq!(response.status(), StatusCode::NotImplemented);
        assert_eq!(state.0.get(), 0);
    }

    #[test]
    fn test_handler_error_becomes_500() {
        let state = Counter(std::cell::Cell::new(0));
        let response = router().route(&request(b"POST /boom HTTP/1.0\r\nContent-Length: 0\r\n\r\n"), &state);

        assert_eq!(response.status(), StatusCode::InternalServerError);
        assert!(String::from_utf8_lossy(response.body()).contains("disk full"));
    }

    #[test]
    fn test_common_headers() {
        let state = Counter(std::cell::Cell::new(0));
        let response = router().route(&request(b"POST /other HTTP/1.0\r\nContent-Length: 0\r\n\r\n"), &state);

        assert_eq!(response.headers().get("Connection"), Some(&"close".to_string()));
        assert!(response.headers().contains_key("Server"));
    }
}
