//! Guard-clause argument validators.
//!
//! Each function checks one precondition and either returns the validated
//! value or fails immediately with a [`ValidationError`] naming the offending
//! parameter. The module is stateless by design: there is no validator
//! instance to construct or share, just free functions to call at the top of
//! whatever operation needs the guarantee.
//!
//! Parameter names are passed explicitly by the caller. The crate makes no
//! attempt to infer them from the call-site expression.
//!
//! # Example
//!
//! ```rust
//! use dropkit::ensure;
//!
//! fn connect(host: Option<&str>, port: u32) -> Result<(), dropkit::ValidationError> {
//!     let host = ensure::not_null(host, "host")?;
//!     let host = ensure::not_blank(host, "host")?;
//!     let _port = ensure::in_range(port, "port", 1, 65_535)?;
//!     // ... use host and port
//!     # let _ = host;
//!     Ok(())
//! }
//!
//! assert!(connect(None, 80).is_err());
//! assert!(connect(Some("example.com"), 80).is_ok());
//! ```

use std::any::type_name;
use std::cmp::Ordering;
use std::fmt::Display;

use crate::errors::{ValidationError, ValidationResult};

/// Require a value to be present.
///
/// Returns the contained value, or [`ValidationError::Null`] naming `name`
/// when the option is `None`.
pub fn not_null<T>(value: Option<T>, name: &str) -> ValidationResult<T> {
    value.ok_or_else(|| ValidationError::Null {
        name: name.to_owned(),
    })
}

/// Require a string to have content.
///
/// Returns the string unchanged, or [`ValidationError::Empty`] when it has
/// zero length. Whitespace-only strings pass; use [`not_blank`] to reject
/// those as well.
pub fn not_empty<'a>(value: &'a str, name: &str) -> ValidationResult<&'a str> {
    if value.is_empty() {
        return Err(ValidationError::Empty {
            name: name.to_owned(),
            reason: "cannot be empty".to_owned(),
        });
    }
    Ok(value)
}

/// Require a slice to contain at least one element.
pub fn not_empty_slice<'a, T>(value: &'a [T], name: &str) -> ValidationResult<&'a [T]> {
    if value.is_empty() {
        return Err(ValidationError::Empty {
            name: name.to_owned(),
            reason: "must contain at least one element".to_owned(),
        });
    }
    Ok(value)
}

/// Require a string to contain at least one non-whitespace character.
///
/// Rejects both empty and whitespace-only input, with a reason that
/// distinguishes the two cases.
pub fn not_blank<'a>(value: &'a str, name: &str) -> ValidationResult<&'a str> {
    if value.is_empty() {
        return Err(ValidationError::Empty {
            name: name.to_owned(),
            reason: "cannot be empty".to_owned(),
        });
    }
    if value.chars().all(char::is_whitespace) {
        return Err(ValidationError::Empty {
            name: name.to_owned(),
            reason: "cannot be whitespace".to_owned(),
        });
    }
    Ok(value)
}

/// Require a value to fall inside an inclusive range.
///
/// Returns the value unchanged when `lower <= value <= upper`, otherwise
/// [`ValidationError::OutOfRange`] naming the parameter and both bounds.
/// A value that compares to neither bound (such as a floating-point NaN) is
/// rejected, not waved through.
pub fn in_range<T>(value: T, name: &str, lower: T, upper: T) -> ValidationResult<T>
where
    T: PartialOrd + Display,
{
    // Both comparisons must produce an ordering; an incomparable value fails
    // the bounds check rather than bypassing it.
    let in_bounds = matches!(
        value.partial_cmp(&lower),
        Some(Ordering::Greater | Ordering::Equal)
    ) && matches!(
        value.partial_cmp(&upper),
        Some(Ordering::Less | Ordering::Equal)
    );

    if !in_bounds {
        return Err(ValidationError::OutOfRange {
            name: name.to_owned(),
            value: value.to_string(),
            lower: lower.to_string(),
            upper: upper.to_string(),
        });
    }
    Ok(value)
}

/// Require a raw value to convert into a member of an enumerated type.
///
/// Delegates to the target type's `TryFrom` implementation; a failed
/// conversion becomes [`ValidationError::InvalidEnum`] naming the parameter,
/// the rejected value, and the target type.
pub fn valid_variant<T, R>(raw: R, name: &str) -> ValidationResult<T>
where
    T: TryFrom<R>,
    R: Display,
{
    let rendered = raw.to_string();
    T::try_from(raw).map_err(|_| ValidationError::InvalidEnum {
        name: name.to_owned(),
        value: rendered,
        enum_type: type_name::<T>().to_owned(),
    })
}
