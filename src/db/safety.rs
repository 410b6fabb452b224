//! Write-path guards shared by repositories

use anyhow::{bail, Result};

use crate::errors::{BusinessError, ErrorCode};

/// A versioned `UPDATE ... WHERE version = ?` that touched no rows lost the race
pub fn ensure_version_matched(rows_affected: u64) -> Result<(), BusinessError> {
    if rows_affected == 0 {
        return Err(BusinessError::from_code(ErrorCode::OptimisticLockFailed));
    }
    Ok(())
}

/// Refuse `UPDATE`/`DELETE` statements that would touch every row
pub fn reject_unbounded_write(sql: &str) -> Result<()> {
    let mut tokens = sql
        .split(|c: char| c.is_whitespace() || c == '(' || c == ')' || c == ';')
        .filter(|token| !token.is_empty())
        .map(str::to_ascii_uppercase);

    let Some(verb) = tokens.next() else {
        return Ok(());
    };
    if verb != "UPDATE" && verb != "DELETE" {
        return Ok(());
    }

    if !tokens.any(|token| token == "WHERE") {
        bail!("refusing full-table {verb} without a WHERE clause");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_matched() {
        assert!(ensure_version_matched(1).is_ok());
        let err = ensure_version_matched(0).unwrap_err();
        assert_eq!(err.code(), ErrorCode::OptimisticLockFailed.code());
        assert_eq!(err.message(), ErrorCode::OptimisticLockFailed.message());
    }

    #[test]
    fn test_unbounded_writes_rejected() {
        assert!(reject_unbounded_write("DELETE FROM users").is_err());
        assert!(reject_unbounded_write("  update users set name = 'x';").is_err());
        let err = reject_unbounded_write("delete from sessions").unwrap_err();
        assert!(err.to_string().contains("DELETE"));
    }

    #[test]
    fn test_bounded_writes_allowed() {
        assert!(reject_unbounded_write("DELETE FROM users WHERE id = $1").is_ok());
        assert!(
            reject_unbounded_write("UPDATE users SET version = version + 1\nwhere id = $1 AND version = $2")
                .is_ok()
        );
    }

    #[test]
    fn test_other_statements_pass() {
        assert!(reject_unbounded_write("SELECT * FROM users").is_ok());
        assert!(reject_unbounded_write("INSERT INTO users (name) VALUES ($1)").is_ok());
        assert!(reject_unbounded_write("").is_ok());
    }
}
