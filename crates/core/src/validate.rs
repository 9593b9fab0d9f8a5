//! The authoritative form-validation rule set.
//!
//! Every rule is a pure function over a string slice; the error's `Display`
//! text is the user-facing message. The server-side handlers are the only
//! consumers that matter for correctness - any client-side mirror of these
//! rules exists purely for UX and is never trusted.

use thiserror::Error;

/// Maximum password length (accounts for hashing input limits).
pub const PASSWORD_MAX: usize = 72;

/// Minimum password length.
pub const PASSWORD_MIN: usize = 8;

/// Validation errors for a person's full name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("Full name is required.")]
    Empty,
    #[error("Full name must be at least 2 characters.")]
    TooShort,
    #[error("Full name must not exceed 100 characters.")]
    TooLong,
    #[error("Use letters, spaces, apostrophes, periods, or hyphens only.")]
    InvalidCharacters,
}

/// Validation errors for a phone number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhoneError {
    #[error("Phone is required.")]
    Empty,
    #[error("Use digits and + ( ) - only.")]
    InvalidCharacters,
    #[error("Phone number must contain 7 to 15 digits.")]
    BadDigitCount,
}

/// Validation errors for a password.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Password is required.")]
    Empty,
    #[error("Password must be at least 8 characters.")]
    TooShort,
    #[error("Password must be 72 characters or fewer.")]
    TooLong,
    #[error("Use uppercase, lowercase, number, and special character.")]
    MissingCharacterClass,
}

/// Validation errors for a contact-form name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactNameError {
    #[error("Please enter your name.")]
    Empty,
    #[error("Name must be at least 2 characters.")]
    TooShort,
    #[error("Name must not exceed 100 characters.")]
    TooLong,
}

/// Validation errors for a contact-form message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    #[error("Please enter your message.")]
    Empty,
    #[error("Message must be at least 10 characters.")]
    TooShort,
    #[error("Message must not exceed 1000 characters.")]
    TooLong,
}

/// Validate a full name: required, 2-100 characters, limited to letters,
/// spaces, apostrophes, periods, and hyphens.
///
/// # Errors
///
/// Returns the first failing [`NameError`] in rule order.
pub fn full_name(value: &str) -> Result<(), NameError> {
    if value.is_empty() {
        return Err(NameError::Empty);
    }
    let len = value.chars().count();
    if len < 2 {
        return Err(NameError::TooShort);
    }
    if len > 100 {
        return Err(NameError::TooLong);
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphabetic() || matches!(c, ' ' | '\'' | '.' | '-'))
    {
        return Err(NameError::InvalidCharacters);
    }
    Ok(())
}

/// Validate a non-empty phone number: charset digits and `+ ( ) -` plus
/// spaces, with 7-15 digits once everything else is stripped.
///
/// # Errors
///
/// Returns the first failing [`PhoneError`] in rule order.
pub fn phone(value: &str) -> Result<(), PhoneError> {
    if value.is_empty() {
        return Err(PhoneError::Empty);
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '(' | ')' | '-' | ' '))
    {
        return Err(PhoneError::InvalidCharacters);
    }
    let digits = digit_count(value);
    if !(7..=15).contains(&digits) {
        return Err(PhoneError::BadDigitCount);
    }
    Ok(())
}

/// Validate a phone number that may be left blank (profile edit, admin
/// forms). Blank input is accepted; anything else goes through [`phone`].
///
/// # Errors
///
/// Returns a [`PhoneError`] for non-blank invalid input.
pub fn optional_phone(value: &str) -> Result<(), PhoneError> {
    if value.is_empty() {
        return Ok(());
    }
    phone(value)
}

/// Validate password strength: 8-72 characters with at least one lowercase
/// letter, one uppercase letter, one digit, and one symbol.
///
/// # Errors
///
/// Returns the first failing [`PasswordError`] in rule order.
pub fn password(value: &str) -> Result<(), PasswordError> {
    if value.is_empty() {
        return Err(PasswordError::Empty);
    }
    let len = value.chars().count();
    if len < PASSWORD_MIN {
        return Err(PasswordError::TooShort);
    }
    if len > PASSWORD_MAX {
        return Err(PasswordError::TooLong);
    }
    let has_lower = value.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    let has_symbol = value.chars().any(|c| !c.is_ascii_alphanumeric());
    if !(has_lower && has_upper && has_digit && has_symbol) {
        return Err(PasswordError::MissingCharacterClass);
    }
    Ok(())
}

/// Validate a contact-form name: required, 2-100 characters, any charset.
///
/// # Errors
///
/// Returns the first failing [`ContactNameError`] in rule order.
pub fn contact_name(value: &str) -> Result<(), ContactNameError> {
    if value.is_empty() {
        return Err(ContactNameError::Empty);
    }
    let len = value.chars().count();
    if len < 2 {
        return Err(ContactNameError::TooShort);
    }
    if len > 100 {
        return Err(ContactNameError::TooLong);
    }
    Ok(())
}

/// Validate a contact-form message: required, 10-1000 characters.
///
/// # Errors
///
/// Returns the first failing [`MessageError`] in rule order.
pub fn message(value: &str) -> Result<(), MessageError> {
    if value.is_empty() {
        return Err(MessageError::Empty);
    }
    let len = value.chars().count();
    if len < 10 {
        return Err(MessageError::TooShort);
    }
    if len > 1000 {
        return Err(MessageError::TooLong);
    }
    Ok(())
}

/// Count the digits in a phone number, ignoring formatting characters.
#[must_use]
pub fn digit_count(value: &str) -> usize {
    value.chars().filter(char::is_ascii_digit).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_rules() {
        assert!(full_name("Mary O'Brien-Smith Jr.").is_ok());
        assert_eq!(full_name(""), Err(NameError::Empty));
        assert_eq!(full_name("J"), Err(NameError::TooShort));
        assert_eq!(full_name(&"a".repeat(101)), Err(NameError::TooLong));
        assert_eq!(full_name("Jane_Doe"), Err(NameError::InvalidCharacters));
        assert_eq!(full_name("Jane2"), Err(NameError::InvalidCharacters));
    }

    #[test]
    fn test_phone_formatted_number_passes() {
        // "(555) 123-4567" normalizes to 10 digits, inside 7-15
        assert!(phone("(555) 123-4567").is_ok());
        assert_eq!(digit_count("(555) 123-4567"), 10);
    }

    #[test]
    fn test_phone_too_few_digits_rejected() {
        // "123" has 3 digits, below the 7-digit floor
        assert_eq!(phone("123"), Err(PhoneError::BadDigitCount));
    }

    #[test]
    fn test_phone_rules() {
        assert!(phone("+1 (800) 555-0199").is_ok());
        assert_eq!(phone(""), Err(PhoneError::Empty));
        assert_eq!(phone("555-CALL"), Err(PhoneError::InvalidCharacters));
        assert_eq!(phone(&"9".repeat(16)), Err(PhoneError::BadDigitCount));
    }

    #[test]
    fn test_optional_phone_accepts_blank() {
        assert!(optional_phone("").is_ok());
        assert_eq!(optional_phone("123"), Err(PhoneError::BadDigitCount));
    }

    #[test]
    fn test_password_all_four_classes_passes() {
        assert!(password("Abcdef1!").is_ok());
    }

    #[test]
    fn test_password_missing_any_class_rejected() {
        // All lowercase: missing upper, digit, and symbol
        assert_eq!(
            password("abcdefgh"),
            Err(PasswordError::MissingCharacterClass)
        );
        // Missing symbol
        assert_eq!(
            password("Abcdefg1"),
            Err(PasswordError::MissingCharacterClass)
        );
        // Missing digit
        assert_eq!(
            password("Abcdefg!"),
            Err(PasswordError::MissingCharacterClass)
        );
        // Missing uppercase
        assert_eq!(
            password("abcdef1!"),
            Err(PasswordError::MissingCharacterClass)
        );
        // Missing lowercase
        assert_eq!(
            password("ABCDEF1!"),
            Err(PasswordError::MissingCharacterClass)
        );
    }

    #[test]
    fn test_password_length_bounds() {
        assert_eq!(password(""), Err(PasswordError::Empty));
        assert_eq!(password("Ab1!xyz"), Err(PasswordError::TooShort));
        let long = format!("Ab1!{}", "x".repeat(69));
        assert_eq!(password(&long), Err(PasswordError::TooLong));
    }

    #[test]
    fn test_contact_name_rules() {
        assert!(contact_name("Sam Lee").is_ok());
        // Contact names are not charset-restricted
        assert!(contact_name("株式会社 Example").is_ok());
        assert_eq!(contact_name(""), Err(ContactNameError::Empty));
        assert_eq!(contact_name("S"), Err(ContactNameError::TooShort));
        assert_eq!(
            contact_name(&"a".repeat(101)),
            Err(ContactNameError::TooLong)
        );
    }

    #[test]
    fn test_message_rules() {
        assert!(message("Do you take reservations?").is_ok());
        assert_eq!(message(""), Err(MessageError::Empty));
        assert_eq!(message("Too short"), Err(MessageError::TooShort));
        assert_eq!(message(&"a".repeat(1001)), Err(MessageError::TooLong));
    }
}
