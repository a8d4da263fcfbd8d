//! Validation helpers for DTOs.

use validator::ValidationError;

use crate::state::RoomCode;

/// Longest display name accepted, in characters.
pub const MAX_NAME_LENGTH: usize = 32;

/// Validates that a room code is four digits between 1000 and 9999.
///
/// # Examples
///
/// ```ignore
/// validate_room_code("4821") // Ok
/// validate_room_code("0999") // Err - below range
/// validate_room_code("48a1") // Err - not numeric
/// ```
pub fn validate_room_code(code: &str) -> Result<(), ValidationError> {
    code.parse::<RoomCode>().map(|_| ()).map_err(|err| {
        let mut validation = ValidationError::new("room_code_format");
        validation.message = Some(err.to_string().into());
        validation
    })
}

/// Validates that a display name is non-blank and at most [`MAX_NAME_LENGTH`] characters once trimmed.
pub fn validate_display_name(name: &str) -> Result<(), ValidationError> {
    let length = name.trim().chars().count();
    if length == 0 {
        let mut err = ValidationError::new("display_name_blank");
        err.message = Some("Display name must not be blank".into());
        return Err(err);
    }

    if length > MAX_NAME_LENGTH {
        let mut err = ValidationError::new("display_name_length");
        err.message = Some(
            format!("Display name must be at most {MAX_NAME_LENGTH} characters (got {length})")
                .into(),
        );
        return Err(err);
    }

    Ok(())
}
