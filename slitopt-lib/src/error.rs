/// Errors raised by the slit optimiser and the beam geometry formulas.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("missing field: {0}")]
    MissingField(String),
    #[error("field '{field}' is not a number: {value:?}")]
    InvalidNumber { field: String, value: String },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("optimisation failed: {0}")]
    Optimization(String),
    #[error("domain error: {0}")]
    Domain(String),
}

impl Error {
    /// True for the input-validation family (missing, unparseable or
    /// out-of-range inputs).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingField(_) | Self::InvalidNumber { .. } | Self::InvalidInput(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Reject non-finite or non-positive lengths, resolutions and angles.
pub(crate) fn ensure_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!("{name} must be > 0, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive("footprint", 50.0).is_ok());
        assert!(ensure_positive("footprint", 0.0).is_err());
        assert!(ensure_positive("footprint", -1.0).is_err());
        assert!(ensure_positive("footprint", f64::NAN).is_err());
    }

    #[test]
    fn test_validation_family() {
        assert!(Error::MissingField("L12".into()).is_validation());
        assert!(!Error::Domain("asin".into()).is_validation());
        assert!(!Error::Optimization("no".into()).is_validation());
    }
}
