//! Command-line and environment configuration.

use clap::Parser;
use std::path::PathBuf;

const USERS_FILE: &str = "users.csv";
const TRANSACTIONS_FILE: &str = "transactions.csv";

/// Per-category spend of active users, from two CSV inputs
#[derive(Parser, Debug)]
#[command(name = "category-join")]
#[command(
    about = "Sum non-blocked transactions of active users per category",
    long_about = None
)]
pub struct CliArgs {
    /// Users CSV (`user_id,is_active`)
    #[arg(long = "users", value_name = "PATH", env = "PATH_USERS")]
    pub users: Option<PathBuf>,

    /// Transactions CSV
    #[arg(long = "transactions", value_name = "PATH", env = "PATH_TRANSACTIONS")]
    pub transactions: Option<PathBuf>,

    /// Directory holding users.csv and transactions.csv, used for any path not set explicitly
    #[arg(
        long = "base-dir",
        value_name = "DIR",
        env = "BASE_DIR",
        default_value = "/data"
    )]
    pub base_dir: PathBuf,

    /// Inputs have no header line
    #[arg(long = "no-header")]
    pub no_header: bool,
}

/// Resolved inputs for one query run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    pub users: PathBuf,
    pub transactions: PathBuf,
    pub skip_header: bool,
}

impl QueryConfig {
    /// Inputs with header lines.
    pub fn new(users: impl Into<PathBuf>, transactions: impl Into<PathBuf>) -> Self {
        QueryConfig {
            users: users.into(),
            transactions: transactions.into(),
            skip_header: true,
        }
    }
}

impl CliArgs {
    /// Resolves explicit paths, falling back to files under `base_dir`.
    pub fn query_config(&self) -> QueryConfig {
        QueryConfig {
            users: self
                .users
                .clone()
                .unwrap_or_else(|| self.base_dir.join(USERS_FILE)),
            transactions: self
                .transactions
                .clone()
                .unwrap_or_else(|| self.base_dir.join(TRANSACTIONS_FILE)),
            skip_header: !self.no_header,
        }
    }
}
