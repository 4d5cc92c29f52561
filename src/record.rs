//! Row parsing for the `users` and `transactions` inputs.
//!
//! Both parsers are pure: they take a line already split on commas and
//! return `Ok(Some(_))` for an eligible row, `Ok(None)` for a row that is
//! filtered out, and `Err(DataQualityError)` for a malformed row.

use crate::error::DataQualityError;
use chrono::NaiveDate;
use uuid::Uuid;

/// Number of columns in `user_id,is_active`.
pub const USER_COLUMNS: usize = 2;

/// Number of columns in
/// `transaction_id,date,user_id,is_blocked,transaction_amount,transaction_category_id`.
pub const TRANSACTION_COLUMNS: usize = 6;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A non-blocked transaction.
///
/// The `date` column is validated during parsing but not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    pub transaction_id: Uuid,
    pub user_id: Uuid,
    /// Amount in currency minor units
    pub transaction_amount: u64,
    pub transaction_category_id: u32,
}

/// Boolean rule shared by `is_active` and `is_blocked`.
///
/// Only `"true"` and `"1"` (case-insensitive) are true; everything else,
/// including empty or malformed values, is false.
pub fn parse_bool(field: &str) -> bool {
    field.eq_ignore_ascii_case("true") || field == "1"
}

/// Parses a `users` row, returning the user id when the user is active.
pub fn parse_user(fields: &[&str]) -> Result<Option<Uuid>, DataQualityError> {
    if fields.len() < USER_COLUMNS {
        return Err(DataQualityError::WrongColumnCount {
            expected: USER_COLUMNS,
            found: fields.len(),
        });
    }

    if !parse_bool(fields[1]) {
        return Ok(None);
    }

    let user_id = parse_uuid(fields[0], "user_id")?;
    Ok(Some(user_id))
}

/// Parses a `transactions` row, returning the record when it is not blocked.
///
/// Blocked rows are filtered out before any other column is looked at.
pub fn parse_transaction(fields: &[&str]) -> Result<Option<TransactionRecord>, DataQualityError> {
    if fields.len() < TRANSACTION_COLUMNS {
        return Err(DataQualityError::WrongColumnCount {
            expected: TRANSACTION_COLUMNS,
            found: fields.len(),
        });
    }

    if parse_bool(fields[3]) {
        return Ok(None);
    }

    let transaction_id = parse_uuid(fields[0], "transaction_id")?;
    let user_id = parse_uuid(fields[2], "user_id")?;
    let transaction_amount = fields[4]
        .parse::<u64>()
        .map_err(|e| DataQualityError::decode("transaction_amount", e))?;
    let transaction_category_id = fields[5]
        .parse::<u32>()
        .map_err(|e| DataQualityError::decode("transaction_category_id", e))?;
    NaiveDate::parse_from_str(fields[1], DATE_FORMAT)
        .map_err(|e| DataQualityError::decode("date", e))?;

    Ok(Some(TransactionRecord {
        transaction_id,
        user_id,
        transaction_amount,
        transaction_category_id,
    }))
}

fn parse_uuid(field: &str, name: &'static str) -> Result<Uuid, DataQualityError> {
    Uuid::parse_str(field).map_err(|e| DataQualityError::decode(name, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER: &str = "9f709688-326d-4834-8075-1a477d590af7";
    const TX: &str = "7035ce25-9e5d-488e-88e3-4d131dde2687";
    const DATE: &str = "2022-10-16";

    fn tx_row<'a>(
        date: &'a str,
        blocked: &'a str,
        amount: &'a str,
        category: &'a str,
    ) -> Vec<&'a str> {
        vec![TX, date, USER, blocked, amount, category]
    }

    #[test]
    fn test_parse_bool_true_spellings() {
        for value in ["1", "true", "TRUE", "True", "tRuE"] {
            assert!(parse_bool(value), "{value} should be true");
        }
    }

    #[test]
    fn test_parse_bool_everything_else_is_false() {
        for value in ["0", "false", "FALSE", "", "100", "yes", "t", " true", "11"] {
            assert!(!parse_bool(value), "{value:?} should be false");
        }
    }

    #[test]
    fn test_parse_active_user() {
        let user = parse_user(&[USER, "1"]).unwrap();
        assert_eq!(user, Some(Uuid::parse_str(USER).unwrap()));
    }

    #[test]
    fn test_parse_inactive_user_is_filtered() {
        assert_eq!(parse_user(&[USER, "false"]).unwrap(), None);
        assert_eq!(parse_user(&[USER, "0"]).unwrap(), None);
    }

    #[test]
    fn test_inactive_user_id_is_not_decoded() {
        assert_eq!(parse_user(&["not-a-uuid", "0"]).unwrap(), None);
    }

    #[test]
    fn test_parse_user_rejects_short_row() {
        let err = parse_user(&[USER]).unwrap_err();
        assert_eq!(
            err,
            DataQualityError::WrongColumnCount {
                expected: 2,
                found: 1,
            }
        );
    }

    #[test]
    fn test_parse_user_rejects_bad_uuid() {
        let err = parse_user(&["1", "1"]).unwrap_err();
        assert!(matches!(
            err,
            DataQualityError::Decode {
                field: "user_id",
                ..
            }
        ));
    }

    #[test]
    fn test_parse_transaction() {
        let record = parse_transaction(&tx_row("2022-10-16", "False", "7561", "4"))
            .unwrap()
            .unwrap();

        assert_eq!(record.transaction_id, Uuid::parse_str(TX).unwrap());
        assert_eq!(record.user_id, Uuid::parse_str(USER).unwrap());
        assert_eq!(record.transaction_amount, 7561);
        assert_eq!(record.transaction_category_id, 4);
    }

    #[test]
    fn test_blocked_transaction_is_filtered_before_decoding() {
        let row = vec!["junk", "junk", "junk", "TRUE", "junk", "junk"];
        assert_eq!(parse_transaction(&row).unwrap(), None);
    }

    #[test]
    fn test_parse_transaction_rejects_short_row() {
        let err = parse_transaction(&[TX, "2022-10-16", USER, "0", "10"]).unwrap_err();
        assert_eq!(
            err,
            DataQualityError::WrongColumnCount {
                expected: 6,
                found: 5,
            }
        );
    }

    #[test]
    fn test_parse_transaction_reports_failing_field() {
        let cases = [
            (vec!["x", DATE, USER, "0", "10", "1"], "transaction_id"),
            (vec![TX, DATE, "x", "0", "10", "1"], "user_id"),
            (tx_row(DATE, "0", "-5", "1"), "transaction_amount"),
            (tx_row(DATE, "0", "12.50", "1"), "transaction_amount"),
            (tx_row(DATE, "0", "10", "a"), "transaction_category_id"),
            (tx_row("2022-13-01", "0", "10", "1"), "date"),
            (tx_row("16/10/2022", "0", "10", "1"), "date"),
        ];

        for (row, expected) in cases {
            match parse_transaction(&row) {
                Err(DataQualityError::Decode { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected decode error for {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let mut row = tx_row("2022-10-16", "0", "10", "1");
        row.push("extra");
        assert!(parse_transaction(&row).unwrap().is_some());
    }
}
