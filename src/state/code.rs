//! Room codes: the short numeric identifiers participants type to join a game.

use std::{fmt, str::FromStr};

use rand::{Rng, rng};
use thiserror::Error;

/// Smallest value a room code can take.
pub const MIN_CODE: u16 = 1000;
/// Largest value a room code can take.
pub const MAX_CODE: u16 = 9999;
/// Number of characters in the rendered code.
pub const CODE_LENGTH: usize = 4;

/// Draw a random room code, rendered as a decimal string.
///
/// The value is uniform in `[1000, 9999]` so the result is always four digits.
/// Nothing here checks for games already using the code; see
/// [`GameRegistry::create`](crate::state::game::GameRegistry::create) for that.
pub fn generate_code() -> String {
    RoomCode::generate().to_string()
}

/// Four digit code identifying an open game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomCode(u16);

impl RoomCode {
    /// Draw a uniformly random code.
    pub fn generate() -> Self {
        Self(rng().random_range(MIN_CODE..=MAX_CODE))
    }

    /// Numeric value of the code.
    pub fn value(self) -> u16 {
        self.0
    }
}

/// Reasons a user-supplied room code is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomCodeError {
    /// Wrong number of characters.
    #[error("room code must be exactly {expected} digits (got {0} characters)", expected = CODE_LENGTH)]
    Length(usize),
    /// Contains something other than ASCII digits.
    #[error("room code must contain only decimal digits")]
    NotNumeric,
    /// Leading zero or otherwise below the range.
    #[error("room code must be between {} and {}", MIN_CODE, MAX_CODE)]
    OutOfRange,
}

impl FromStr for RoomCode {
    type Err = RoomCodeError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let length = trimmed.chars().count();
        if length != CODE_LENGTH {
            return Err(RoomCodeError::Length(length));
        }
        if !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(RoomCodeError::NotNumeric);
        }

        let value = trimmed
            .parse::<u16>()
            .map_err(|_| RoomCodeError::NotNumeric)?;
        Self::try_from(value)
    }
}

impl TryFrom<u16> for RoomCode {
    type Error = RoomCodeError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        if (MIN_CODE..=MAX_CODE).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RoomCodeError::OutOfRange)
        }
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_are_four_digits_in_range() {
        for _ in 0..2_000 {
            let code = generate_code();
            assert_eq!(code.len(), CODE_LENGTH, "unexpected code `{code}`");
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            let value: u16 = code.parse().unwrap();
            assert!((MIN_CODE..=MAX_CODE).contains(&value));
        }
    }

    #[test]
    fn parses_valid_codes() {
        assert_eq!("1000".parse::<RoomCode>().unwrap().value(), 1000);
        assert_eq!("9999".parse::<RoomCode>().unwrap().value(), 9999);
        assert_eq!(" 4321 ".parse::<RoomCode>().unwrap().value(), 4321);
    }

    #[test]
    fn rejects_malformed_codes() {
        assert_eq!("123".parse::<RoomCode>(), Err(RoomCodeError::Length(3)));
        assert_eq!("12345".parse::<RoomCode>(), Err(RoomCodeError::Length(5)));
        assert_eq!("".parse::<RoomCode>(), Err(RoomCodeError::Length(0)));
        assert_eq!("12a4".parse::<RoomCode>(), Err(RoomCodeError::NotNumeric));
        assert_eq!("+123".parse::<RoomCode>(), Err(RoomCodeError::NotNumeric));
        assert_eq!("0999".parse::<RoomCode>(), Err(RoomCodeError::OutOfRange));
    }

    #[test]
    fn error_messages_name_the_expected_shape() {
        assert_eq!(
            RoomCodeError::Length(3).to_string(),
            "room code must be exactly 4 digits (got 3 characters)"
        );
        assert_eq!(
            RoomCodeError::OutOfRange.to_string(),
            "room code must be between 1000 and 9999"
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        let code = RoomCode::generate();
        assert_eq!(code.to_string().parse::<RoomCode>().unwrap(), code);
    }
}
