use crate::EvalError;

pub fn ensure_finite(v: f64, what: &'static str) -> Result<f64, EvalError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(EvalError::NonFinite { what, value: v })
    }
}

/// Require a strictly positive value, the most common physical precondition.
pub fn ensure_positive(v: f64, what: &str) -> Result<f64, EvalError> {
    ensure_finite(v, "input")?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(EvalError::domain(format!("{what} must be > 0 (got {v})")))
    }
}

/// Require a value in `[0, +inf)`, for rates and fractions that may vanish.
pub fn ensure_non_negative(v: f64, what: &str) -> Result<f64, EvalError> {
    ensure_finite(v, "input")?;
    if v >= 0.0 {
        Ok(v)
    } else {
        Err(EvalError::domain(format!("{what} must be >= 0 (got {v})")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(f64::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_positive_rejects_zero() {
        assert!(ensure_positive(0.0, "resistance").is_err());
        assert!(ensure_positive(0.3, "resistance").is_ok());
    }

    #[test]
    fn ensure_non_negative_allows_zero() {
        assert!(ensure_non_negative(0.0, "excess air").is_ok());
        assert!(ensure_non_negative(-0.1, "excess air").is_err());
    }
}
