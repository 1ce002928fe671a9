//! Inbound HTTP binding.
//!
//! A deliberately small synchronous accept loop: requests are handled
//! one at a time on the accepting thread, which serializes every
//! read-evaluate-write pass over the region table. The ingest core
//! assumes exactly that execution model.

use crate::config::Config;
use crate::core::ingest::IngestLogic;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::notify::{Notifier, WebhookNotifier};
use crate::ui::messages::{info, warning};
use std::io::Cursor;
use std::io::Read;
use tiny_http::{Header, Method, Request, Response, Server};

/// Static availability string for the diagnostic GET endpoint.
pub const AVAILABILITY: &str = "geotrack ingest endpoint is running.";

fn header(name: &str, value: &str) -> Header {
    Header::from_bytes(name.as_bytes(), value.as_bytes()).expect("static header")
}

fn text_response(body: &str, status: u16) -> Response<Cursor<Vec<u8>>> {
    Response::from_string(body)
        .with_status_code(status)
        .with_header(header("Content-Type", "text/plain; charset=utf-8"))
}

fn json_response(body: String) -> Response<Cursor<Vec<u8>>> {
    // The ingest route always answers 200 with a status envelope;
    // callers key off the JSON `status` field.
    Response::from_string(body)
        .with_status_code(200)
        .with_header(header("Content-Type", "application/json"))
}

fn route(
    pool: &mut DbPool,
    notifier: &dyn Notifier,
    request: &mut Request,
) -> Response<Cursor<Vec<u8>>> {
    let method = request.method().clone();
    let url = request.url().to_string();

    match (method, url.as_str()) {
        (Method::Get, "/") | (Method::Get, "/health") => text_response(AVAILABILITY, 200),
        (Method::Post, "/") | (Method::Post, "/ingest") => {
            let mut body = String::new();
            let raw = match request.as_reader().read_to_string(&mut body) {
                Ok(_) if !body.is_empty() => Some(body.as_str()),
                _ => None,
            };

            let outcome = IngestLogic::handle(pool, notifier, raw);
            let body = serde_json::to_string(&outcome)
                .unwrap_or_else(|_| r#"{"status":"error","message":"Internal error"}"#.to_string());
            json_response(body)
        }
        _ => text_response("Not found", 404),
    }
}

/// Bind and run the HTTP loop until the process is killed.
pub fn serve(cfg: &Config, addr_override: Option<&str>) -> AppResult<()> {
    let addr = addr_override.unwrap_or(&cfg.listen_addr);

    let mut pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;

    let notifier = WebhookNotifier::new(&cfg.webhook_url)?;

    let server = Server::http(addr)
        .map_err(|e| AppError::Server(format!("Failed to bind {}: {}", addr, e)))?;

    info(format!("Listening on http://{}", addr));
    info("POST /ingest to record a position, GET / for a health check.");

    for mut request in server.incoming_requests() {
        let response = route(&mut pool, &notifier, &mut request);
        if let Err(e) = request.respond(response) {
            warning(format!("Failed to send response: {}", e));
        }
    }

    Ok(())
}
