pub mod config;
pub mod export;
pub mod ingest;
pub mod init;
pub mod log;
pub mod regions;
pub mod serve;
