//! Runs the two passes in order: users first, then transactions.

use crate::config::QueryConfig;
use crate::engine::JoinAggregateEngine;
use crate::error::{EngineError, Result};
use crate::reader::LineReader;
use crate::report::QueryResult;
use crate::users::ActiveUsers;
use log::info;
use std::io::Read;
use std::path::Path;

/// Answers the query over two readers.
///
/// `transactions` is not read at all when there are no active users.
pub fn execute<U: Read, T: Read>(
    users: U,
    transactions: T,
    skip_header: bool,
) -> Result<QueryResult> {
    let active_users = ActiveUsers::from_lines(LineReader::new(users, skip_header))?;
    if active_users.is_empty() {
        info!("No active users, skipping transactions");
        return Ok(QueryResult::empty());
    }

    aggregate(&active_users, LineReader::new(transactions, skip_header))
}

/// Answers the query over the configured files.
///
/// The transactions file is only opened once the user index is complete
/// and non-empty.
pub fn execute_files(config: &QueryConfig) -> Result<QueryResult> {
    let active_users = ActiveUsers::from_lines(open(&config.users, config.skip_header)?)?;
    if active_users.is_empty() {
        info!(
            "No active users in {}, skipping transactions",
            config.users.display()
        );
        return Ok(QueryResult::empty());
    }

    aggregate(
        &active_users,
        open(&config.transactions, config.skip_header)?,
    )
}

fn aggregate<R: Read>(active_users: &ActiveUsers, lines: LineReader<R>) -> Result<QueryResult> {
    let mut engine = JoinAggregateEngine::new(active_users);
    engine.process_lines(lines)?;
    Ok(engine.finish())
}

fn open(path: &Path, skip_header: bool) -> Result<LineReader<std::fs::File>> {
    LineReader::open(path, skip_header).map_err(|source| EngineError::Open {
        path: path.to_path_buf(),
        source,
    })
}
