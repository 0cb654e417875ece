//! # Handlers del Dispatcher
//! src/handlers.rs
//!
//! | Ruta             | Handler           |
//! |------------------|-------------------|
//! | `GET *`          | [`get_file`]      |
//! | `POST /`         | [`post_entries`]  |
//! | `POST /previous` | [`post_previous`] |

use crate::http::{Method, Request, Response, StatusCode};
use crate::journal::{Batch, Journal};
use crate::router::{HandlerResult, Router};
use serde::Deserialize;
use tracing::debug;

/// Payload de `POST /previous`
#[derive(Debug, Deserialize)]
pub struct ReplayRequest {
    /// Path relativo a la raíz de entradas (ej: `2024/01/01/120000.json`)
    pub file: String,
}

/// Router con todas las rutas del servidor
pub fn journal_router() -> Router<Journal> {
    let mut router = Router::new();
    router.register(Method::POST, "/", post_entries);
    router.register(Method::POST, "/previous", post_previous);
    router.fallback(Method::GET, get_file);
    router
}

/// `GET <path>`: devuelve los bytes del archivo (`/` es `/index.html`)
///
/// Cualquier falla responde 404 con `"<path> - File Not Found"`.
pub fn get_file(req: &Request, journal: &Journal) -> HandlerResult {
    let path = match req.path() {
        "/" => "/index.html",
        other => other,
    };

    match journal.files.read(path) {
        Ok(bytes) => Ok(Response::new(StatusCode::Ok).with_body_bytes(bytes)),
        Err(e) => {
            debug!(path, reason = %e, "static file not served");
            Ok(Response::text(
                StatusCode::NotFound,
                &format!("{} - File Not Found", path),
            ))
        }
    }
}

/// `POST /`: guarda el body tal cual como un batch nuevo
pub fn post_entries(req: &Request, journal: &Journal) -> HandlerResult {
    let body = match req.body_str() {
        Ok(body) => body,
        Err(_) => return Ok(invalid_utf8()),
    };

    journal.store.store(&Batch::from_body(body))?;
    Ok(Response::empty(StatusCode::Ok))
}

/// `POST /previous`: re-envía un archivo guardado
///
/// 404 con body vacío si el archivo no existe.
pub fn post_previous(req: &Request, journal: &Journal) -> HandlerResult {
    let body = match req.body_str() {
        Ok(body) => body,
        Err(_) => return Ok(invalid_utf8()),
    };

    let payload: ReplayRequest = match serde_json::from_str(body) {
        Ok(payload) => payload,
        Err(e) => {
            return Ok(Response::error(
                StatusCode::BadRequest,
                &format!("Invalid replay payload: {}", e),
            ))
        }
    };

    let result = journal.replay.replay(&payload.file, &journal.store)?;
    if result.found {
        Ok(Response::empty(StatusCode::Ok))
    } else {
        debug!(file = %payload.file, "replay source not found");
        Ok(Response::empty(StatusCode::NotFound))
    }
}

fn invalid_utf8() -> Response {
    Response::error(StatusCode::BadRequest, "Request body is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn journal_in(dir: &TempDir) -> Journal {
        let config = Config {
            root: dir.path().to_path_buf(),
            ..Config::default()
        };
        Journal::from_config(&config).unwrap()
    }

    fn post(path: &str, body: &[u8]) -> Request {
        let mut raw = format!("POST {} HTTP/1.1\r\nContent-Length: {}\r\n\r\n", path, body.len()).into_bytes();
        raw.extend_from_slice(body);
        Request::parse(&raw).unwrap()
    }

    fn get(path: &str) -> Request {
        Request::parse(format!("GET {} HTTP/1.1\r\n\r\n", path).as_bytes()).unwrap()
    }

    fn count_files(dir: &Path) -> usize {
        if !dir.exists() {
            return 0;
        }
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .map(|p| if p.is_dir() { count_files(&p) } else { 1 })
            .sum()
    }

    #[test]
    fn test_root_aliases_index() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), "<html></html>").unwrap();
        let journal = journal_in(&dir);

        let root = get_file(&get("/"), &journal).unwrap();
        let index = get_file(&get("/index.html"), &journal).unwrap();

        assert_eq!(root.status(), StatusCode::Ok);
        assert_eq!(root.body(), index.body());
    }

    #[test]
    fn test_missing_index_reports_aliased_path() {
        let dir = TempDir::new().unwrap();
        let journal = journal_in(&dir);

        let response = get_file(&get("/"), &journal).unwrap();

        assert_eq!(response.status(), StatusCode::NotFound);
        assert_eq!(response.body(), b"/index.html - File Not Found");
    }

    #[test]
    fn test_get_missing_file() {
        let dir = TempDir::new().unwrap();
        let journal = journal_in(&dir);

        let response = get_file(&get("/nope.html"), &journal).unwrap();

        assert_eq!(response.status(), StatusCode::NotFound);
        assert_eq!(response.body(), b"/nope.html - File Not Found");
    }

    #[test]
    fn test_post_entries_stores_and_renders() {
        let dir = TempDir::new().unwrap();
        let journal = journal_in(&dir);
        let text = r#"[{"entryTime":"2024-01-01T12:00:00Z","timeZone":"America/New_York","text":"hi"}]"#;

        let response = post_entries(&post("/", text.as_bytes()), &journal).unwrap();

        assert_eq!(response.status(), StatusCode::Ok);
        assert!(response.body().is_empty());
        assert_eq!(count_files(&dir.path().join("entries")), 1);
        let script = fs::read_to_string(dir.path().join("script.js")).unwrap();
        assert!(script.contains(text));
    }

    #[test]
    fn test_post_entries_rejects_non_utf8() {
        let dir = TempDir::new().unwrap();
        let journal = journal_in(&dir);

        let response = post_entries(&post("/", &[0xc3, 0x28]), &journal).unwrap();

        assert_eq!(response.status(), StatusCode::BadRequest);
        assert_eq!(count_files(&dir.path().join("entries")), 0);
    }

    #[test]
    fn test_post_previous_missing_file() {
        let dir = TempDir::new().unwrap();
        let journal = journal_in(&dir);

        let response = post_previous(&post("/previous", br#"{"file": "2024/01/01/120000.json"}"#), &journal).unwrap();

        assert_eq!(response.status(), StatusCode::NotFound);
        assert!(response.body().is_empty());
        assert!(!dir.path().join("script.js").exists());
    }

    #[test]
    fn test_post_previous_requires_file_field() {
        let dir = TempDir::new().unwrap();
        let journal = journal_in(&dir);

        let response = post_previous(&post("/previous", br#"{"name": "x"}"#), &journal).unwrap();

        assert_eq!(response.status(), StatusCode::BadRequest);
    }

    #[test]
    fn test_post_previous_replays() {
        let dir = TempDir::new().unwrap();
        let day = dir.path().join("entries/2024/01/01");
        fs::create_dir_all(&day).unwrap();
        fs::write(day.join("120000.json"), "[\n{\"entryTime\":\"2024-01-01T12:00:00Z\",\"text\":\"hi\"}\n]").unwrap();
        let journal = journal_in(&dir);

        let response = post_previous(&post("/previous", br#"{"file": "2024/01/01/120000.json"}"#), &journal).unwrap();

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(count_files(&dir.path().join("entries")), 2);
        let script = fs::read_to_string(dir.path().join("script.js")).unwrap();
        assert!(script.contains("[{\"entryTime\":\"2024-01-01T12:00:00Z\",\"text\":\"hi\"}]"));
    }

    #[test]
    fn test_router_wires_all_routes() {
        let dir = TempDir::new().unwrap();
        let journal = journal_in(&dir);
        let router = journal_router();

        let get_response = router.route(&get("/missing.css"), &journal);
        let post_response = router.route(&post("/", b"[]"), &journal);
        let previous = router.route(&post("/previous", br#"{"file":"none.json"}"#), &journal);

        assert_eq!(get_response.status(), StatusCode::NotFound);
        assert_eq!(post_response.status(), StatusCode::Ok);
        assert_eq!(previous.status(), StatusCode::NotFound);
    }
}
