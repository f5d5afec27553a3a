//! Descriptive statistics - overall and per-subgroup summaries
//!
//! Upstream payloads spell a few fields two ways (`minimum`/`min`,
//! `maximum`/`max`, `standardDeviation`/`stdDev`). The canonical type stores
//! each value once; both spellings only exist on the wire.

use serde::{Serialize, Serializer};

/// Summary statistics for a set of measurements
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescriptiveStats {
    /// Number of measurements
    pub count: u64,

    /// Arithmetic mean
    pub mean: f64,

    /// Median
    pub median: f64,

    /// Sample variance
    pub variance: f64,

    /// Standard deviation (wire names: `standardDeviation`, `stdDev`)
    pub std_dev: f64,

    /// Maximum minus minimum
    pub range: f64,

    /// Smallest measurement (wire names: `minimum`, `min`)
    pub minimum: f64,

    /// Largest measurement (wire names: `maximum`, `max`)
    pub maximum: f64,

    /// First quartile
    pub q1: f64,

    /// Third quartile
    pub q3: f64,

    /// Skewness, when the engine reports it
    pub skewness: Option<f64>,

    /// Excess kurtosis, when the engine reports it
    pub kurtosis: Option<f64>,
}

/// Per-subgroup statistics share the overall layout
pub type GroupStats = DescriptiveStats;

impl DescriptiveStats {
    /// True when the summary describes no measurements at all
    pub fn is_empty(&self) -> bool {
        self.count == 0 && self.std_dev == 0.0 && self.range == 0.0
    }

    /// Interquartile range
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Wire form carrying both spellings of every aliased field
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsWire {
    count: u64,
    mean: f64,
    median: f64,
    variance: f64,
    standard_deviation: f64,
    std_dev: f64,
    range: f64,
    minimum: f64,
    min: f64,
    maximum: f64,
    max: f64,
    q1: f64,
    q3: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    skewness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kurtosis: Option<f64>,
}

impl From<&DescriptiveStats> for StatsWire {
    fn from(s: &DescriptiveStats) -> Self {
        Self {
            count: s.count,
            mean: s.mean,
            median: s.median,
            variance: s.variance,
            standard_deviation: s.std_dev,
            std_dev: s.std_dev,
            range: s.range,
            minimum: s.minimum,
            min: s.minimum,
            maximum: s.maximum,
            max: s.maximum,
            q1: s.q1,
            q3: s.q3,
            skewness: s.skewness,
            kurtosis: s.kurtosis,
        }
    }
}

impl Serialize for DescriptiveStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        StatsWire::from(self).serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_emits_both_spellings() {
        let stats = DescriptiveStats {
            count: 125,
            mean: 100.12,
            std_dev: 5.03,
            minimum: 84.52,
            maximum: 115.73,
            range: 31.21,
            ..Default::default()
        };

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["minimum"], json["min"]);
        assert_eq!(json["maximum"], json["max"]);
        assert_eq!(json["standardDeviation"], json["stdDev"]);
        assert_eq!(json["stdDev"], 5.03);
        assert!(json.get("skewness").is_none());
    }

    #[test]
    fn test_iqr() {
        let stats = DescriptiveStats {
            q1: 96.84,
            q3: 103.29,
            ..Default::default()
        };
        assert!((stats.iqr() - 6.45).abs() < 1e-9);
    }

    #[test]
    fn test_default_is_empty() {
        assert!(DescriptiveStats::default().is_empty());
    }
}
