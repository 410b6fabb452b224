use serde::Serialize;

use crate::errors::AppError;

/// One offending field and the message describing why
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Field-level validation for request bodies and bound query types.
///
/// Implementations push every violation, in field order, so that the
/// aggregated message lists them all.
pub trait Validate {
    fn validate(&self, errors: &mut FieldErrors);
}

/// Ordered collection of field errors
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) -> &mut Self {
        self.errors.push(FieldError::new(field, message));
        self
    }

    /// Record `message` for `field` unless `ok` holds
    pub fn check(&mut self, ok: bool, field: &str, message: impl Into<String>) -> &mut Self {
        if !ok {
            self.add(field, message);
        }
        self
    }

    pub fn not_blank(&mut self, field: &str, value: &str) -> &mut Self {
        self.check(!value.trim().is_empty(), field, "must not be blank")
    }

    pub fn max_len(&mut self, field: &str, value: &str, max: usize) -> &mut Self {
        self.check(
            value.chars().count() <= max,
            field,
            format!("length must not exceed {max}"),
        )
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.errors
    }
}

/// Run `Validate` and collect everything it reports
pub fn collect<T: Validate + ?Sized>(value: &T) -> Vec<FieldError> {
    let mut errors = FieldErrors::new();
    value.validate(&mut errors);
    errors.into_vec()
}

/// Constraint checks on individual handler parameters.
///
/// ```ignore
/// let mut constraints = Constraints::new();
/// constraints.check(id > 0, "id must be positive");
/// constraints.finish()?;
/// ```
#[derive(Debug, Default)]
pub struct Constraints {
    violations: Vec<String>,
}

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, ok: bool, message: impl Into<String>) -> &mut Self {
        if !ok {
            self.violations.push(message.into());
        }
        self
    }

    pub fn finish(self) -> Result<(), AppError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(AppError::ConstraintViolation(self.violations))
        }
    }
}
