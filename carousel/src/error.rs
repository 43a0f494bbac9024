/// Configuration rejected by [`crate::CarouselOptions::validate`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("`{field}` must be finite and greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f64 },
    #[error("`{field}` must be finite and non-negative (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("`{field}` must lie within [0, 1] (got {value})")]
    OutOfUnitRange { field: &'static str, value: f64 },
    #[error("`{field}` must be at least {min} (got {value})")]
    TooSmall {
        field: &'static str,
        value: i64,
        min: i64,
    },
    #[error("`{field}` gives damping ratio {ratio}, below the minimum {min}")]
    Underdamped {
        field: &'static str,
        ratio: f64,
        min: f64,
    },
}

pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

pub(crate) fn ensure_unit(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { field, value })
    }
}
