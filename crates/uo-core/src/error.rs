use thiserror::Error;

pub type EvalResult<T> = Result<T, EvalError>;

/// Errors raised by formula evaluation.
///
/// Every variant is local to the single evaluation that produced it; there is
/// no cross-request propagation and no retry path.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Input violates a physical precondition.
    #[error("Domain error: {what}")]
    Domain { what: String },

    /// A fit or solve failed to converge or produced no usable answer.
    #[error("Numerical error: {what}")]
    Numerical { what: String },

    /// Optimization constraints cannot be jointly satisfied.
    #[error("Infeasible: {what}")]
    Infeasible { what: String },

    #[error("Missing parameter: {name}")]
    MissingParam { name: String },

    #[error("Parameter {name} = {value} outside valid range [{min}, {max}]")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}

impl EvalError {
    pub fn domain(what: impl Into<String>) -> Self {
        EvalError::Domain { what: what.into() }
    }

    pub fn numerical(what: impl Into<String>) -> Self {
        EvalError::Numerical { what: what.into() }
    }

    pub fn infeasible(what: impl Into<String>) -> Self {
        EvalError::Infeasible { what: what.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = EvalError::domain("saturation temperature must exceed surface temperature");
        assert!(err.to_string().contains("saturation"));

        let err = EvalError::OutOfRange {
            name: "beta".to_string(),
            value: 2.0,
            min: 0.01,
            max: 1.0,
        };
        assert!(err.to_string().contains("beta"));
        assert!(err.to_string().contains("[0.01, 1]"));
    }
}
