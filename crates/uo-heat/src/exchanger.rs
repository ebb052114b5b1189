//! Heat-exchanger sizing: effectiveness-NTU and LMTD methods.

use uo_core::numeric::ensure_positive;
use uo_core::{EvalError, EvalResult, FormulaResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowArrangement {
    Parallel,
    Counter,
}

/// Effectiveness of a two-stream exchanger by the NTU method.
#[derive(Debug, Clone, Copy)]
pub struct NtuEffectiveness {
    pub arrangement: FlowArrangement,
    /// Smaller heat-capacity rate, W/K
    pub c_min: f64,
    /// Larger heat-capacity rate, W/K
    pub c_max: f64,
    /// NTU = UA / C_min
    pub ntu: f64,
}

impl NtuEffectiveness {
    /// Closed-form effectiveness for the configured arrangement.
    pub fn effectiveness(&self) -> EvalResult<f64> {
        ensure_positive(self.c_min, "C_min")?;
        ensure_positive(self.c_max, "C_max")?;
        ensure_positive(self.ntu, "NTU")?;
        if self.c_min > self.c_max {
            return Err(EvalError::domain("C_min must not exceed C_max"));
        }
        let cr = self.c_min / self.c_max;
        Ok(effectiveness_at(self.arrangement, cr, self.ntu))
    }

    pub fn evaluate(&self) -> EvalResult<FormulaResult> {
        let eff = self.effectiveness()?;
        let cr = self.c_min / self.c_max;
        Ok(FormulaResult::new()
            .with("Capacity Ratio", cr, "-")
            .with("Effectiveness", eff, "-"))
    }
}

/// Effectiveness at a given capacity ratio and NTU.
///
/// Counter-flow uses the Cr = 1 limit NTU/(1+NTU) when the general
/// expression degenerates.
pub fn effectiveness_at(arrangement: FlowArrangement, cr: f64, ntu: f64) -> f64 {
    match arrangement {
        FlowArrangement::Parallel => (1.0 - (-ntu * (1.0 + cr)).exp()) / (1.0 + cr),
        FlowArrangement::Counter => {
            if (cr - 1.0).abs() < 1e-12 {
                ntu / (1.0 + ntu)
            } else {
                let e = (-ntu * (1.0 - cr)).exp();
                (1.0 - e) / (1.0 - cr * e)
            }
        }
    }
}

/// Log-mean temperature difference between terminal approaches.
#[derive(Debug, Clone, Copy)]
pub struct Lmtd {
    /// Hot inlet minus cold outlet approach, K
    pub delta_t1: f64,
    /// Hot outlet minus cold inlet approach, K
    pub delta_t2: f64,
}

impl Lmtd {
    pub fn value(&self) -> EvalResult<f64> {
        ensure_positive(self.delta_t1, "terminal temperature difference dT1")?;
        ensure_positive(self.delta_t2, "terminal temperature difference dT2")?;
        if (self.delta_t1 - self.delta_t2).abs() < 1e-12 {
            // Equal approaches: the log-mean limit is the common value
            return Ok(self.delta_t1);
        }
        Ok((self.delta_t1 - self.delta_t2) / (self.delta_t1 / self.delta_t2).ln())
    }

    pub fn evaluate(&self) -> EvalResult<FormulaResult> {
        Ok(FormulaResult::new().with("LMTD", self.value()?, "K"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn counter_flow_unit_capacity_ratio_limit() {
        // Cr = 1: effectiveness = NTU / (1 + NTU) exactly.
        let hx = NtuEffectiveness {
            arrangement: FlowArrangement::Counter,
            c_min: 500.0,
            c_max: 500.0,
            ntu: 2.5,
        };
        assert_relative_eq!(hx.effectiveness().unwrap(), 2.5 / 3.5, epsilon = 1e-12);
    }

    #[test]
    fn counter_flow_matches_closed_form() {
        let cr: f64 = 0.5;
        let ntu: f64 = 2.5;
        let e = (-ntu * (1.0 - cr)).exp();
        let expected = (1.0 - e) / (1.0 - cr * e);

        let hx = NtuEffectiveness {
            arrangement: FlowArrangement::Counter,
            c_min: 500.0,
            c_max: 1000.0,
            ntu,
        };
        assert_relative_eq!(hx.effectiveness().unwrap(), expected, epsilon = 1e-9);
    }

    #[test]
    fn parallel_flow_closed_form() {
        let hx = NtuEffectiveness {
            arrangement: FlowArrangement::Parallel,
            c_min: 500.0,
            c_max: 1000.0,
            ntu: 2.5,
        };
        let cr: f64 = 0.5;
        let expected = (1.0 - (-2.5f64 * 1.5).exp()) / 1.5;
        assert_relative_eq!(hx.effectiveness().unwrap(), expected, epsilon = 1e-12);
        assert!((cr - 0.5).abs() < 1e-12);
    }

    #[test]
    fn capacity_ordering_enforced() {
        let hx = NtuEffectiveness {
            arrangement: FlowArrangement::Counter,
            c_min: 1000.0,
            c_max: 500.0,
            ntu: 1.0,
        };
        assert!(matches!(hx.effectiveness(), Err(EvalError::Domain { .. })));
    }

    #[test]
    fn lmtd_standard_and_degenerate() {
        let lmtd = Lmtd {
            delta_t1: 50.0,
            delta_t2: 30.0,
        };
        let expected = (50.0 - 30.0) / (50.0f64 / 30.0).ln();
        assert_relative_eq!(lmtd.value().unwrap(), expected, epsilon = 1e-12);

        let equal = Lmtd {
            delta_t1: 40.0,
            delta_t2: 40.0,
        };
        assert_relative_eq!(equal.value().unwrap(), 40.0, epsilon = 1e-12);
    }

    #[test]
    fn lmtd_rejects_nonpositive_approach() {
        let lmtd = Lmtd {
            delta_t1: 50.0,
            delta_t2: -5.0,
        };
        assert!(lmtd.value().is_err());
    }
}
