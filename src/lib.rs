//! # Category Join
//!
//! A streaming engine that answers one fixed query over two CSV inputs:
//!
//! ```sql
//! SELECT t.transaction_category_id,
//!        SUM(t.transaction_amount) AS sum_amount,
//!        COUNT(DISTINCT t.user_id) AS num_users
//! FROM transactions t
//!          JOIN users u USING (user_id)
//! WHERE t.is_blocked = false
//!   AND u.is_active = true
//! GROUP BY t.transaction_category_id
//! ORDER BY sum_amount DESC;
//! ```
//!
//! ## Design Principles
//!
//! - **Two passes**: the active-user set is built completely before any
//!   transaction is read
//! - **Streaming processing**: transactions are never buffered; memory is
//!   bounded by distinct users per category
//! - **Fail fast**: a single malformed row aborts the run with no output
//! - **Deterministic output**: stable sort, ties keep first-seen order
//!
//! ## Example
//!
//! ```no_run
//! use category_join::execute;
//! use std::io::Cursor;
//!
//! let users = "user_id,is_active\n9f709688-326d-4834-8075-1a477d590af7,1\n";
//! let transactions = "\
//! transaction_id,date,user_id,is_blocked,transaction_amount,transaction_category_id
//! 7035ce25-9e5d-488e-88e3-4d131dde2687,2022-10-16,9f709688-326d-4834-8075-1a477d590af7,0,100,1
//! ";
//! let result = execute(Cursor::new(users), Cursor::new(transactions), true).unwrap();
//! result.write_csv(std::io::stdout()).unwrap();
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod query;
pub mod reader;
pub mod record;
pub mod report;
pub mod users;

pub use config::{CliArgs, QueryConfig};
pub use engine::{CategoryAccumulator, JoinAggregateEngine, ScanSummary};
pub use error::{DataQualityError, EngineError, Result};
pub use query::{execute, execute_files};
pub use reader::{Line, LineReader};
pub use record::{parse_bool, parse_transaction, parse_user, TransactionRecord};
pub use report::{CategoryStats, QueryResult};
pub use users::ActiveUsers;
