//! Normal distribution sampling for capability and histogram charts

use serde::Serialize;

use crate::entities::DescriptiveStats;

/// Intervals across the capability curve domain
pub const CURVE_STEPS: usize = 200;

/// Intervals across the histogram overlay range
pub const OVERLAY_STEPS: usize = 100;

/// Visual scale applied to overlay densities so they sit on bin heights
pub const OVERLAY_SCALE: f64 = 2.5;

/// One sampled point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
}

/// Closed x-range a curve is sampled over
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurveDomain {
    pub lower: f64,
    pub upper: f64,
}

impl CurveDomain {
    /// Domain of the capability chart: both spec limits with 3σ margin and
    /// at least ±4σ around the mean
    pub fn for_capability(mean: f64, std_dev: f64, lsl: f64, usl: f64) -> Self {
        Self {
            lower: (lsl - 3.0 * std_dev).min(mean - 4.0 * std_dev),
            upper: (usl + 3.0 * std_dev).max(mean + 4.0 * std_dev),
        }
    }
}

/// Normal probability density
pub fn normal_pdf(x: f64, mean: f64, std_dev: f64) -> f64 {
    let z = (x - mean) / std_dev;
    (-0.5 * z * z).exp() / (std_dev * (2.0 * std::f64::consts::PI).sqrt())
}

/// `steps + 1` evenly spaced x values from `lower` to `upper` inclusive
fn grid(lower: f64, upper: f64, steps: usize) -> impl Iterator<Item = f64> {
    let step = (upper - lower) / steps as f64;
    (0..=steps).map(move |i| if i == steps { upper } else { lower + step * i as f64 })
}

fn usable_sigma(std_dev: f64) -> bool {
    std_dev.is_finite() && std_dev > 0.0
}

/// Sample the process distribution over the capability chart domain
///
/// Returns 201 points. Empty when `std_dev` is not a positive finite number.
pub fn sample_normal_curve(mean: f64, std_dev: f64, lsl: f64, usl: f64) -> Vec<CurvePoint> {
    if !usable_sigma(std_dev) || !mean.is_finite() {
        return Vec::new();
    }
    let domain = CurveDomain::for_capability(mean, std_dev, lsl, usl);
    if !domain.lower.is_finite() || !domain.upper.is_finite() {
        return Vec::new();
    }
    grid(domain.lower, domain.upper, CURVE_STEPS)
        .map(|x| CurvePoint {
            x,
            y: normal_pdf(x, mean, std_dev),
        })
        .collect()
}

/// Sample the density over `[min, max]`, scaled to histogram bin heights
///
/// Each density is multiplied by `peak · std_dev · 2.5`. A zero-width range
/// gives a single point.
pub fn sample_overlay_curve(
    mean: f64,
    std_dev: f64,
    min: f64,
    max: f64,
    peak: f64,
) -> Vec<CurvePoint> {
    if !usable_sigma(std_dev) || !min.is_finite() || !max.is_finite() || min > max {
        return Vec::new();
    }
    let scale = peak * std_dev * OVERLAY_SCALE;
    let point = |x: f64| CurvePoint {
        x,
        y: normal_pdf(x, mean, std_dev) * scale,
    };
    if min == max {
        return vec![point(min)];
    }
    grid(min, max, OVERLAY_STEPS).map(point).collect()
}

/// One histogram bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub label: String,
    pub count: f64,
}

/// Label histogram counts
///
/// With statistics the bins split `[minimum, maximum]` evenly and read
/// `start-end`; without, they are numbered from 1.
pub fn histogram_bins(counts: &[f64], stats: Option<&DescriptiveStats>) -> Vec<HistogramBin> {
    let width = stats
        .filter(|_| !counts.is_empty())
        .map(|s| (s.minimum, (s.maximum - s.minimum) / counts.len() as f64));

    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let label = match width {
                Some((min, width)) => {
                    let start = min + width * i as f64;
                    format!("{:.2}-{:.2}", start, start + width)
                }
                None => format!("Bin {}", i + 1),
            };
            HistogramBin { label, count }
        })
        .collect()
}
