use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::ingest::IngestLogic;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::notify::WebhookNotifier;
use std::fs;

/// Handle the `ingest` command: feed one raw body through the same
/// pipeline the HTTP endpoint uses and print the JSON outcome.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Ingest { body, file } = cmd {
        let raw = match (body, file) {
            (_, Some(path)) => Some(fs::read_to_string(path)?),
            (Some(b), None) => Some(b.clone()),
            (None, None) => None,
        };

        let mut pool = DbPool::new(&cfg.database)?;
        init_db(&pool.conn)?;

        let notifier = WebhookNotifier::new(&cfg.webhook_url)?;

        let response = IngestLogic::handle(&mut pool, &notifier, raw.as_deref());

        let json = serde_json::to_string(&response)
            .map_err(|e| AppError::Other(e.to_string()))?;
        println!("{}", json);
    }

    Ok(())
}
