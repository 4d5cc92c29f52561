//! Set of active user ids built from the `users` input.

use crate::error::{EngineError, Result};
use crate::reader::Line;
use crate::record::parse_user;
use log::{debug, info};
use std::collections::HashSet;
use std::io;
use uuid::Uuid;

/// Users eligible to join with transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveUsers {
    ids: HashSet<Uuid>,
}

impl ActiveUsers {
    /// Consumes every line of the `users` input.
    ///
    /// Stops at the first malformed row; there is no best-effort mode.
    pub fn from_lines<I>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = io::Result<Line>>,
    {
        let mut ids = HashSet::new();
        let mut rows = 0usize;

        for line in lines {
            let line = line?;
            rows += 1;

            let parsed = line
                .fields()
                .and_then(|fields| parse_user(&fields))
                .map_err(|source| EngineError::DataQuality {
                    input: "users",
                    row: line.number,
                    source,
                })?;

            match parsed {
                Some(user_id) => {
                    if !ids.insert(user_id) {
                        debug!(
                            "Row {}: user {} listed more than once",
                            line.number, user_id
                        );
                    }
                }
                None => debug!("Row {}: inactive user, skipping", line.number),
            }
        }

        info!("Read {} user rows, {} active users", rows, ids.len());
        Ok(ActiveUsers { ids })
    }

    /// Returns `true` if the user is active.
    pub fn contains(&self, user_id: &Uuid) -> bool {
        self.ids.contains(user_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<Uuid> for ActiveUsers {
    fn from_iter<T: IntoIterator<Item = Uuid>>(iter: T) -> Self {
        ActiveUsers {
            ids: iter.into_iter().collect(),
        }
    }
}
