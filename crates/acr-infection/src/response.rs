use serde::{Deserialize, Serialize};

use crate::error::{InfectionError, InfectionResult};

/// Monotone map from cumulative inhaled dose to infection probability.
///
/// Both variants are 0 at zero dose and approach 1 as the dose grows,
/// so the induced per-agent risk is non-decreasing over a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "curve", rename_all = "snake_case")]
pub enum DoseResponse {
    /// `p = 1 - exp(-scale * dose)`.
    ExponentialSaturating { scale: f64 },
    /// `p = dose^n / (half_dose^n + dose^n)`, reaching 0.5 at `half_dose`.
    Hill { half_dose: f64, exponent: f64 },
}

impl DoseResponse {
    /// Exponential curve at the stock cabin scale.
    pub fn exponential_default() -> Self {
        DoseResponse::ExponentialSaturating { scale: 0.1 }
    }

    /// Checks curve parameters once at model construction.
    pub fn validate(&self) -> InfectionResult<()> {
        match *self {
            DoseResponse::ExponentialSaturating { scale } => {
                if !scale.is_finite() || scale <= 0.0 {
                    return Err(InfectionError::InvalidParameter {
                        what: "exponential scale",
                        value: scale,
                    });
                }
            }
            DoseResponse::Hill {
                half_dose,
                exponent,
            } => {
                if !half_dose.is_finite() || half_dose <= 0.0 {
                    return Err(InfectionError::InvalidParameter {
                        what: "hill half_dose",
                        value: half_dose,
                    });
                }
                if !exponent.is_finite() || exponent <= 0.0 {
                    return Err(InfectionError::InvalidParameter {
                        what: "hill exponent",
                        value: exponent,
                    });
                }
            }
        }
        Ok(())
    }

    /// Infection probability for a cumulative dose.
    ///
    /// Callers pass a non-negative dose; the result is clamped into [0, 1]
    /// to absorb last-ulp rounding at the extremes.
    pub fn probability(&self, dose: f64) -> f64 {
        let p = match *self {
            DoseResponse::ExponentialSaturating { scale } => 1.0 - (-scale * dose).exp(),
            DoseResponse::Hill {
                half_dose,
                exponent,
            } => {
                if dose <= 0.0 {
                    0.0
                } else {
                    let r = (dose / half_dose).powf(exponent);
                    r / (1.0 + r)
                }
            }
        };
        p.clamp(0.0, 1.0)
    }
}
