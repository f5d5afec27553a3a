//! Capability level classification from Cpk
//!
//! | Cpk             | Level      |
//! |-----------------|------------|
//! | >= 1.67         | Excellent  |
//! | [1.33, 1.67)    | Good       |
//! | [1.00, 1.33)    | Acceptable |
//! | [0.67, 1.00)    | Marginal   |
//! | < 0.67 (or NaN) | Poor       |
//!
//! A boundary value belongs to the higher band.

use serde::Serialize;

/// Discrete capability level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityLevel {
    Excellent,
    Good,
    Acceptable,
    Marginal,
    Poor,
}

impl CapabilityLevel {
    /// Lower Cpk bound of each band, highest band first
    const BANDS: [(f64, CapabilityLevel); 4] = [
        (1.67, CapabilityLevel::Excellent),
        (1.33, CapabilityLevel::Good),
        (1.00, CapabilityLevel::Acceptable),
        (0.67, CapabilityLevel::Marginal),
    ];

    pub fn from_cpk(cpk: f64) -> Self {
        Self::BANDS
            .iter()
            .find(|(bound, _)| cpk >= *bound)
            .map(|(_, level)| *level)
            .unwrap_or(CapabilityLevel::Poor)
    }

    /// Display colour token
    pub fn color(&self) -> &'static str {
        match self {
            CapabilityLevel::Excellent => "#38A169",
            CapabilityLevel::Good => "#68D391",
            CapabilityLevel::Acceptable => "#F6E05E",
            CapabilityLevel::Marginal => "#F6AD55",
            CapabilityLevel::Poor => "#F56565",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CapabilityLevel::Excellent => "Capability far exceeds requirements",
            CapabilityLevel::Good => "Capability adequately meets requirements",
            CapabilityLevel::Acceptable => {
                "Meets the minimum requirement; monitor for drift"
            }
            CapabilityLevel::Marginal => "Capability insufficient; improvement needed",
            CapabilityLevel::Poor => "Capability critically insufficient",
        }
    }

    /// Whether the level meets the minimum requirement (Cpk >= 1.00)
    pub fn is_adequate(&self) -> bool {
        matches!(
            self,
            CapabilityLevel::Excellent | CapabilityLevel::Good | CapabilityLevel::Acceptable
        )
    }
}

impl std::fmt::Display for CapabilityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CapabilityLevel::Excellent => "Excellent",
            CapabilityLevel::Good => "Good",
            CapabilityLevel::Acceptable => "Acceptable",
            CapabilityLevel::Marginal => "Marginal",
            CapabilityLevel::Poor => "Poor",
        };
        f.write_str(label)
    }
}

/// Level, colour and narrative for one Cpk value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityGrade {
    pub level: CapabilityLevel,
    pub color_token: &'static str,
    pub description: &'static str,
}

/// Colour used when no capability indices are available
pub const UNKNOWN_COLOR: &str = "#718096";

/// Level label and colour for an optional Cpk; "Unknown" without one
pub fn badge(cpk: Option<f64>) -> (String, &'static str) {
    match cpk {
        Some(cpk) => {
            let level = CapabilityLevel::from_cpk(cpk);
            (level.to_string(), level.color())
        }
        None => ("Unknown".to_string(), UNKNOWN_COLOR),
    }
}

/// Classify a Cpk value
pub fn classify(cpk: f64) -> CapabilityGrade {
    let level = CapabilityLevel::from_cpk(cpk);
    CapabilityGrade {
        level,
        color_token: level.color(),
        description: level.description(),
    }
}

/// Improvement direction for an incapable process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// Spread fits the tolerance but the mean sits off-center
    Recenter,
    /// Spread itself exceeds the tolerance band
    ReduceVariation,
}

impl Recommendation {
    pub fn text(&self) -> &'static str {
        match self {
            Recommendation::Recenter => {
                "Process spread fits the tolerance but is off-center; shift the process mean toward the specification midpoint"
            }
            Recommendation::ReduceVariation => {
                "Process variation is too large for the tolerance band; reduce the process standard deviation"
            }
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}

/// Recommendation for a Cp/Cpk pair; none once Cpk reaches 1.00
pub fn recommend(cp: f64, cpk: f64) -> Option<Recommendation> {
    if cpk >= 1.0 {
        None
    } else if cp >= 1.0 {
        Some(Recommendation::Recenter)
    } else {
        Some(Recommendation::ReduceVariation)
    }
}

/// Tag shown next to Cp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CpRating {
    Good,
    Acceptable,
    Insufficient,
}

impl CpRating {
    pub fn color(&self) -> &'static str {
        match self {
            CpRating::Good => "green",
            CpRating::Acceptable => "orange",
            CpRating::Insufficient => "red",
        }
    }
}

impl std::fmt::Display for CpRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CpRating::Good => write!(f, "good"),
            CpRating::Acceptable => write!(f, "acceptable"),
            CpRating::Insufficient => write!(f, "insufficient"),
        }
    }
}

pub fn classify_cp(cp: f64) -> CpRating {
    if cp >= 1.33 {
        CpRating::Good
    } else if cp >= 1.0 {
        CpRating::Acceptable
    } else {
        CpRating::Insufficient
    }
}
