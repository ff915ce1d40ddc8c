//! Validation of user-typed search input, done before anything reaches the
//! filtering functions.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("Proszę podać adres.")]
    EmptyAddress,

    #[error("Proszę podać promień.")]
    EmptyRadius,

    #[error("Promień musi być liczbą dodatnią: '{0}'")]
    InvalidRadius(String),
}

/// Parses a radius typed by the user. It must be a finite number above zero.
///
/// # Examples
///
/// ```
/// use airquality::{parse_radius, InputError};
///
/// assert_eq!(parse_radius(" 12.5 "), Ok(12.5));
/// assert_eq!(parse_radius(""), Err(InputError::EmptyRadius));
/// assert!(parse_radius("-3").is_err());
/// ```
pub fn parse_radius(text: &str) -> Result<f64, InputError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(InputError::EmptyRadius);
    }
    let radius: f64 = text
        .parse()
        .map_err(|_| InputError::InvalidRadius(text.to_string()))?;
    validate_radius(radius)
}

pub fn validate_radius(radius_km: f64) -> Result<f64, InputError> {
    if radius_km.is_finite() && radius_km > 0.0 {
        Ok(radius_km)
    } else {
        Err(InputError::InvalidRadius(radius_km.to_string()))
    }
}

/// Trims the address and rejects it when nothing is left.
pub fn validate_address(address: &str) -> Result<&str, InputError> {
    let address = address.trim();
    if address.is_empty() {
        Err(InputError::EmptyAddress)
    } else {
        Ok(address)
    }
}
