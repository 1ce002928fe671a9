//! Unified application error type.
//! All modules (db, core, notify, server, cli) return AppError to keep
//! error handling consistent across the crate.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Store (SQLite)
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Ingest path
    // ---------------------------
    #[error("Request body is missing or empty.")]
    MalformedRequest,

    #[error("{0}")]
    InvalidPayload(String),

    // ---------------------------
    // Outbound delivery
    // ---------------------------
    #[error("Delivery error: {0}")]
    Delivery(String),

    // ---------------------------
    // Server
    // ---------------------------
    #[error("Server error: {0}")]
    Server(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
