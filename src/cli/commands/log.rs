use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::trace::TraceLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log {
        print,
        positions,
        limit,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        if *print {
            TraceLogic::print_trace(&mut pool)?;
        }

        if *positions {
            TraceLogic::print_positions(&mut pool, *limit)?;
        }
    }

    Ok(())
}
