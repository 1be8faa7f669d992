//! Field validation for record forms.
//!
//! A form is valid when:
//! - both plate parts are 1 to 4 ASCII alphanumerics
//! - the phone number is 1 to 10 ASCII digits
//! - the note is anything (it may be empty)
//!
//! Surrounding whitespace is trimmed and plate parts are upper-cased before
//! the rules are applied.

use crate::model::{NewRecord, Plate, RecordForm};

pub const PLATE_PART_MAX_LEN: usize = 4;
pub const PHONE_MAX_LEN: usize = 10;

/// The form fields, named as they appear in messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Part1,
    Part2,
    PhoneNumber,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Part1 => write!(f, "plate part 1"),
            Field::Part2 => write!(f, "plate part 2"),
            Field::PhoneNumber => write!(f, "phone number"),
        }
    }
}

/// Validates a submitted form and returns the normalized record.
///
/// # Examples
/// ```
/// use platebook::model::RecordForm;
/// use platebook::validation::validate_form;
///
/// let record = validate_form(&RecordForm::new("abc", "1234", "0912345678", "")).unwrap();
/// assert_eq!(record.plate.to_string(), "ABC-1234");
///
/// assert!(validate_form(&RecordForm::new("", "1234", "0912345678", "")).is_err());
/// assert!(validate_form(&RecordForm::new("ABC", "1234", "09-12", "")).is_err());
/// ```
pub fn validate_form(form: &RecordForm) -> Result<NewRecord, ValidationError> {
    let plate = Plate::new(&form.part1, &form.part2);
    validate_plate_part(Field::Part1, &plate.part1)?;
    validate_plate_part(Field::Part2, &plate.part2)?;

    let phone = form.phone_number.trim().to_string();
    validate_phone(&phone)?;

    Ok(NewRecord::new(plate, phone, form.note.trim().to_string()))
}

/// Validates a plate pair given outside of a full form (update/delete targets).
pub fn validate_plate(plate: &Plate) -> Result<(), ValidationError> {
    validate_plate_part(Field::Part1, &plate.part1)?;
    validate_plate_part(Field::Part2, &plate.part2)
}

fn validate_plate_part(field: Field, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    if let Some(ch) = value.chars().find(|c| !c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidCharacter(field, ch));
    }
    if value.chars().count() > PLATE_PART_MAX_LEN {
        return Err(ValidationError::TooLong(field, PLATE_PART_MAX_LEN));
    }
    Ok(())
}

pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let field = Field::PhoneNumber;
    if value.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    if let Some(ch) = value.chars().find(|c| !c.is_ascii_digit()) {
        return Err(ValidationError::InvalidCharacter(field, ch));
    }
    if value.len() > PHONE_MAX_LEN {
        return Err(ValidationError::TooLong(field, PHONE_MAX_LEN));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyField(Field),
    InvalidCharacter(Field, char),
    TooLong(Field, usize),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyField(field) => write!(f, "{} cannot be empty", field),
            ValidationError::InvalidCharacter(field, ch) => {
                write!(f, "{} contains invalid character '{}'", field, ch)
            }
            ValidationError::TooLong(field, max) => {
                write!(f, "{} cannot be longer than {} characters", field, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
