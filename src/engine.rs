//! Join-and-aggregate pass over the `transactions` input.
//!
//! Transactions are consumed one line at a time in arrival order. Only
//! per-category state is kept, so memory grows with distinct users per
//! category rather than with the number of transactions.

use crate::error::{EngineError, Result};
use crate::reader::Line;
use crate::record::{parse_transaction, TransactionRecord};
use crate::report::{CategoryStats, QueryResult};
use crate::users::ActiveUsers;
use log::{debug, info};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::io;
use uuid::Uuid;

/// Running totals for one transaction category.
///
/// Consumed by [`CategoryAccumulator::finalize`], so the distinct-user set
/// cannot be touched after the count has been taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryAccumulator {
    category_id: u32,
    sum_amount: u64,
    distinct_users: HashSet<Uuid>,
}

impl CategoryAccumulator {
    /// Creates an empty accumulator for a category.
    pub fn new(category_id: u32) -> Self {
        CategoryAccumulator {
            category_id,
            sum_amount: 0,
            distinct_users: HashSet::new(),
        }
    }

    pub fn category_id(&self) -> u32 {
        self.category_id
    }

    pub fn sum_amount(&self) -> u64 {
        self.sum_amount
    }

    /// Adds one transaction's amount and user.
    pub fn record(&mut self, user_id: Uuid, amount: u64) -> Result<()> {
        self.sum_amount = self
            .sum_amount
            .checked_add(amount)
            .ok_or(EngineError::SumOverflow {
                category: self.category_id,
            })?;
        self.distinct_users.insert(user_id);
        Ok(())
    }

    /// Folds another accumulator for the same category into this one.
    ///
    /// Sums are added and user sets unioned, so a user seen by both sides
    /// is still counted once.
    pub fn merge(&mut self, other: CategoryAccumulator) -> Result<()> {
        debug_assert_eq!(self.category_id, other.category_id);

        self.sum_amount = self
            .sum_amount
            .checked_add(other.sum_amount)
            .ok_or(EngineError::SumOverflow {
                category: self.category_id,
            })?;
        self.distinct_users.extend(other.distinct_users);
        Ok(())
    }

    /// Collapses the distinct-user set into its cardinality.
    pub fn finalize(self) -> CategoryStats {
        CategoryStats {
            transaction_category_id: self.category_id,
            sum_amount: self.sum_amount,
            num_users: self.distinct_users.len() as u64,
        }
    }
}

/// Row counters for the transactions pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub rows: usize,
    pub blocked: usize,
    pub inactive_user: usize,
    pub aggregated: usize,
}

impl fmt::Display for ScanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows, {} blocked, {} without active user, {} aggregated",
            self.rows, self.blocked, self.inactive_user, self.aggregated
        )
    }
}

/// Inner-joins transactions with active users and groups by category.
///
/// Categories are kept in first-seen order; the final sort is stable, so
/// categories with equal sums keep that order in the output.
pub struct JoinAggregateEngine<'a> {
    active_users: &'a ActiveUsers,
    categories: Vec<CategoryAccumulator>,
    positions: HashMap<u32, usize>,
    summary: ScanSummary,
}

impl<'a> JoinAggregateEngine<'a> {
    /// Creates an engine that joins against a completed user index.
    pub fn new(active_users: &'a ActiveUsers) -> Self {
        JoinAggregateEngine {
            active_users,
            categories: Vec::new(),
            positions: HashMap::new(),
            summary: ScanSummary::default(),
        }
    }

    /// Processes every line of the `transactions` input.
    ///
    /// The first malformed row aborts the pass.
    pub fn process_lines<I>(&mut self, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = io::Result<Line>>,
    {
        for line in lines {
            self.process_line(&line?)?;
        }

        let summary = self.summary;
        let categories = self.categories.len();
        info!("Scanned transactions: {summary}, {categories} categories");
        Ok(())
    }

    /// Processes a single transaction line.
    pub fn process_line(&mut self, line: &Line) -> Result<()> {
        self.summary.rows += 1;

        let parsed = line
            .fields()
            .and_then(|fields| parse_transaction(&fields))
            .map_err(|source| EngineError::DataQuality {
                input: "transactions",
                row: line.number,
                source,
            })?;

        let record = match parsed {
            Some(record) => record,
            None => {
                self.summary.blocked += 1;
                debug!("Row {}: blocked transaction, skipping", line.number);
                return Ok(());
            }
        };

        if !self.active_users.contains(&record.user_id) {
            self.summary.inactive_user += 1;
            debug!(
                "Row {}: user {} is not active, skipping transaction {}",
                line.number, record.user_id, record.transaction_id
            );
            return Ok(());
        }

        self.aggregate(&record)?;
        self.summary.aggregated += 1;
        Ok(())
    }

    fn aggregate(&mut self, record: &TransactionRecord) -> Result<()> {
        let category_id = record.transaction_category_id;
        let idx = match self.positions.get(&category_id) {
            Some(&idx) => idx,
            None => {
                self.categories.push(CategoryAccumulator::new(category_id));
                let idx = self.categories.len() - 1;
                self.positions.insert(category_id, idx);
                idx
            }
        };

        self.categories[idx].record(record.user_id, record.transaction_amount)
    }

    pub fn summary(&self) -> ScanSummary {
        self.summary
    }

    /// Finalizes every category and sorts by descending `sum_amount`.
    pub fn finish(self) -> QueryResult {
        QueryResult::from_accumulators(self.categories)
    }
}
