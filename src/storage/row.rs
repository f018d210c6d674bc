use std::{borrow::Cow, fmt};

use crate::calculate_offsets;

use super::layout::{
    EMAIL_OFFSET, EMAIL_SIZE, ID_OFFSET, ID_SIZE, USERNAME_OFFSET, USERNAME_SIZE,
};

/// A single tuple of the fixed `(id, username, email)` schema.
///
/// String fields are fixed-width byte arrays carrying at least one trailing
/// zero byte, so a freshly zeroed slot decodes to empty strings and a
/// printer can never run off the end of a field. The codec itself performs
/// no validation; field lengths are enforced at prepare time.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    id: i64,
    username: [u8; USERNAME_SIZE],
    email: [u8; EMAIL_SIZE],
}

impl Row {
    pub fn new(id: i64, username: &str, email: &str) -> Self {
        Self {
            id,
            username: copy_field(username.as_bytes()),
            email: copy_field(email.as_bytes()),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn username(&self) -> Cow<'_, str> {
        field_str(&self.username)
    }

    pub fn email(&self) -> Cow<'_, str> {
        field_str(&self.email)
    }

    /// Encodes the row into a slot of at least `ROW_SIZE` bytes.
    pub fn write_to(&self, slot: &mut [u8]) {
        let (start, end) = calculate_offsets!(ID_OFFSET, ID_SIZE);
        slot[start..end].clone_from_slice(&self.id.to_le_bytes());

        let (start, end) = calculate_offsets!(USERNAME_OFFSET, USERNAME_SIZE);
        slot[start..end].clone_from_slice(&self.username);

        let (start, end) = calculate_offsets!(EMAIL_OFFSET, EMAIL_SIZE);
        slot[start..end].clone_from_slice(&self.email);
    }

    /// Decodes a row from a slot of at least `ROW_SIZE` bytes.
    pub fn read_from(slot: &[u8]) -> Self {
        let (start, end) = calculate_offsets!(ID_OFFSET, ID_SIZE);
        let id = i64::from_le_bytes(slot[start..end].try_into().expect("failed to read row id"));

        let (start, end) = calculate_offsets!(USERNAME_OFFSET, USERNAME_SIZE);
        let username = slot[start..end]
            .try_into()
            .expect("failed to read username field");

        let (start, end) = calculate_offsets!(EMAIL_OFFSET, EMAIL_SIZE);
        let email = slot[start..end]
            .try_into()
            .expect("failed to read email field");

        Self {
            id,
            username,
            email,
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.id, self.username(), self.email())
    }
}

/// Copies string bytes into a zeroed fixed-width field, keeping the
/// terminator slot untouched.
fn copy_field<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    let len = bytes.len().min(N - 1);
    out[..len].copy_from_slice(&bytes[..len]);
    out
}

/// Reads a field up to its first zero byte.
fn field_str(field: &[u8]) -> Cow<'_, str> {
    let end = field.iter().position(|b| *b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::layout::{EMAIL_LENGTH, ROW_SIZE, USERNAME_LENGTH};

    #[test]
    fn round_trips_through_a_slot() {
        let row = Row::new(42, "alice", "alice@example.com");
        let mut slot = [0u8; ROW_SIZE];

        row.write_to(&mut slot);
        let decoded = Row::read_from(&slot);

        assert_eq!(decoded, row);
        assert_eq!(decoded.id(), 42);
        assert_eq!(decoded.username(), "alice");
        assert_eq!(decoded.email(), "alice@example.com");
    }

    #[test]
    fn zero_fills_unused_field_bytes() {
        let row = Row::new(1, "ab", "c@d");
        let mut slot = [0xFFu8; ROW_SIZE];

        row.write_to(&mut slot);

        assert!(slot[USERNAME_OFFSET + 2..USERNAME_OFFSET + USERNAME_SIZE]
            .iter()
            .all(|b| *b == 0));
        assert!(slot[EMAIL_OFFSET + 3..EMAIL_OFFSET + EMAIL_SIZE]
            .iter()
            .all(|b| *b == 0));
    }

    #[test]
    fn zeroed_slot_decodes_to_an_empty_row() {
        let row = Row::read_from(&[0u8; ROW_SIZE]);

        assert_eq!(row.id(), 0);
        assert_eq!(row.username(), "");
        assert_eq!(row.email(), "");
    }

    #[test]
    fn keeps_a_terminator_on_maximum_length_fields() {
        let username = "u".repeat(USERNAME_LENGTH);
        let email = "e".repeat(EMAIL_LENGTH);
        let row = Row::new(7, &username, &email);

        assert_eq!(row.username(), username);
        assert_eq!(row.email(), email);

        let mut slot = [0xFFu8; ROW_SIZE];
        row.write_to(&mut slot);
        assert_eq!(slot[USERNAME_OFFSET + USERNAME_SIZE - 1], 0);
        assert_eq!(slot[EMAIL_OFFSET + EMAIL_SIZE - 1], 0);
    }

    #[test]
    fn display_prints_trimmed_fields() {
        let row = Row::new(3, "bob", "b@y");

        assert_eq!(row.to_string(), "3 bob b@y");
    }
}
