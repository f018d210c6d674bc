use log::debug;

use super::{
    layout::{EMAIL_LENGTH, USERNAME_LENGTH},
    row::Row,
};

/// Database commands/statements
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select,
    Insert(Row),
    Delete,
}

/// Reasons a command line fails to prepare into a [`Statement`].
#[derive(Debug, Clone, PartialEq)]
pub enum PrepareError {
    InvalidSyntax,
    TokenTooLong,
    NullToken,
    NegativeToken,
    Unrecognized,
}

/// Outcome of executing a prepared statement.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecuteResult {
    Success,
    TableFull,
}

impl TryFrom<&str> for Statement {
    type Error = PrepareError;

    fn try_from(input: &str) -> Result<Self, Self::Error> {
        if input.starts_with("insert") {
            prepare_insert(input)
        } else if input == "select" {
            Ok(Statement::Select)
        } else if input == "delete" {
            Ok(Statement::Delete)
        } else {
            Err(PrepareError::Unrecognized)
        }
    }
}

/// Syntax: `insert <id> <username> <email>`; extra tokens are ignored.
fn prepare_insert(input: &str) -> Result<Statement, PrepareError> {
    let tokens: Vec<&str> = input.split(' ').collect();

    if tokens.len() < 4 {
        return Err(PrepareError::InvalidSyntax);
    }

    if tokens.iter().any(|token| token.is_empty()) {
        return Err(PrepareError::NullToken);
    }

    if tokens[2].len() > USERNAME_LENGTH || tokens[3].len() > EMAIL_LENGTH {
        return Err(PrepareError::TokenTooLong);
    }

    let id: i64 = tokens[1]
        .parse()
        .map_err(|_| PrepareError::InvalidSyntax)?;
    if id < 0 {
        return Err(PrepareError::NegativeToken);
    }

    let row = Row::new(id, tokens[2], tokens[3]);
    debug!("prepared insert: {row}");

    Ok(Statement::Insert(row))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepares_a_valid_insert() {
        let statement = Statement::try_from("insert 1 alice a@x").unwrap();

        let Statement::Insert(row) = statement else {
            panic!("expected an insert statement");
        };
        assert_eq!(row.id(), 1);
        assert_eq!(row.username(), "alice");
        assert_eq!(row.email(), "a@x");
    }

    #[test]
    fn prepares_select_and_delete() {
        assert!(matches!(
            Statement::try_from("select"),
            Ok(Statement::Select)
        ));
        assert!(matches!(
            Statement::try_from("delete"),
            Ok(Statement::Delete)
        ));
    }

    #[test]
    fn ignores_tokens_past_the_email() {
        let statement = Statement::try_from("insert 1 u e extra").unwrap();

        assert!(matches!(statement, Statement::Insert(_)));
    }

    #[test]
    fn rejects_too_few_tokens() {
        assert_eq!(
            Statement::try_from("insert 1 u"),
            Err(PrepareError::InvalidSyntax)
        );
    }

    #[test]
    fn rejects_empty_tokens() {
        assert_eq!(
            Statement::try_from("insert 1  u e"),
            Err(PrepareError::NullToken)
        );
    }

    #[test]
    fn rejects_an_overlong_username() {
        let username = "u".repeat(USERNAME_LENGTH + 1);
        assert_eq!(
            Statement::try_from(format!("insert 1 {username} e").as_str()),
            Err(PrepareError::TokenTooLong)
        );
    }

    #[test]
    fn rejects_an_overlong_email() {
        let email = "e".repeat(EMAIL_LENGTH + 1);
        assert_eq!(
            Statement::try_from(format!("insert 1 u {email}").as_str()),
            Err(PrepareError::TokenTooLong)
        );
    }

    #[test]
    fn rejects_a_negative_id() {
        assert_eq!(
            Statement::try_from("insert -5 x y"),
            Err(PrepareError::NegativeToken)
        );
    }

    #[test]
    fn rejects_a_non_numeric_id() {
        assert_eq!(
            Statement::try_from("insert abc u e"),
            Err(PrepareError::InvalidSyntax)
        );
    }

    #[test]
    fn length_is_checked_before_the_id_parses() {
        let username = "u".repeat(USERNAME_LENGTH + 1);
        assert_eq!(
            Statement::try_from(format!("insert abc {username} e").as_str()),
            Err(PrepareError::TokenTooLong)
        );
    }

    #[test]
    fn rejects_unknown_statements() {
        assert_eq!(
            Statement::try_from("update 1 u e"),
            Err(PrepareError::Unrecognized)
        );
    }
}
