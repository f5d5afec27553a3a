//! Terminal visualization using braille graphics
//!
//! Renders distribution curves and control charts with Unicode braille
//! characters so reports can be read without a graphical front end.

use drawille::Canvas;

use crate::charts::{ChartDescriptor, LineAxis, SeriesData};
use crate::curve::CurvePoint;
use crate::entities::{ControlLimits, ControlSeries};

/// Default canvas size for plots, in braille dots
pub const PLOT_WIDTH: u32 = 120;
pub const PLOT_HEIGHT: u32 = 40;

/// Linear map from a data range onto `0..=pixels`
struct Scale {
    min: f64,
    max: f64,
    pixels: u32,
}

impl Scale {
    fn new(min: f64, max: f64, pixels: u32) -> Self {
        let (min, max) = if (max - min).abs() < f64::EPSILON {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };
        Self { min, max, pixels }
    }

    fn map(&self, value: f64) -> u32 {
        let t = ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0);
        (t * self.pixels as f64).round() as u32
    }

    /// Same as `map` but with the origin at the bottom
    fn map_inverted(&self, value: f64) -> u32 {
        self.pixels - self.map(value)
    }
}

fn draw_polyline(canvas: &mut Canvas, points: &[(u32, u32)]) {
    for pair in points.windows(2) {
        let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
        canvas.line(x1, y1, x2, y2);
    }
    if let [(x, y)] = points {
        canvas.set(*x, *y);
    }
}

fn draw_dotted_vertical(canvas: &mut Canvas, x: u32, height: u32) {
    for y in (0..=height).step_by(3) {
        canvas.set(x, y);
    }
}

fn draw_dotted_horizontal(canvas: &mut Canvas, y: u32, width: u32) {
    for x in (0..=width).step_by(3) {
        canvas.set(x, y);
    }
}

/// Render a sampled curve with vertical markers
///
/// `markers` are `(label, x)` pairs drawn as dotted lines and listed under
/// the plot.
///
/// # Example Output
/// ```text
/// ⠀⠀⠀⠀⠀⡇⠀⠀⠀⣠⠔⠒⠢⣄⠀⠀⠀⢸⠀⠀⠀⠀
/// ⠀⠀⠀⠀⠀⡇⣀⠤⠊⠀⠀⠀⠀⠀⠑⠤⣀⢸⠀⠀⠀⠀
///   70.000                     130.000
///   LSL=85.000  Mean=100.000  USL=115.000
/// ```
pub fn render_curve(points: &[CurvePoint], markers: &[(&str, f64)], width: u32, height: u32) -> String {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return "  (no curve data)".to_string();
    };
    let peak = points.iter().map(|p| p.y).fold(0.0_f64, f64::max);

    let x_scale = Scale::new(first.x, last.x, width);
    let y_scale = Scale::new(0.0, peak, height);

    let mut canvas = Canvas::new(width + 1, height + 1);
    let pixels: Vec<(u32, u32)> = points
        .iter()
        .map(|p| (x_scale.map(p.x), y_scale.map_inverted(p.y)))
        .collect();
    draw_polyline(&mut canvas, &pixels);

    for (_, x) in markers {
        if *x >= first.x && *x <= last.x {
            draw_dotted_vertical(&mut canvas, x_scale.map(*x), height);
        }
    }

    let mut output = canvas.frame();
    output.push_str(&format!(
        "\n  {:<12.3}{:>width$.3}",
        first.x,
        last.x,
        width = (width as usize / 2).saturating_sub(12)
    ));
    if !markers.is_empty() {
        let legend: Vec<String> = markers
            .iter()
            .map(|(label, x)| format!("{}={:.3}", label, x))
            .collect();
        output.push_str(&format!("\n  {}", legend.join("  ")));
    }
    output
}

/// Render a control chart series with its UCL/CL/LCL lines
///
/// Out-of-limit points are listed below the plot.
pub fn render_control_series(title: &str, series: &ControlSeries, width: u32, height: u32) -> String {
    if series.is_empty() {
        return format!("{}:\n  (no data)", title);
    }
    let limits = series.limits;
    let lo = series
        .values
        .iter()
        .copied()
        .fold(limits.lcl.min(limits.ucl), f64::min);
    let hi = series
        .values
        .iter()
        .copied()
        .fold(limits.ucl.max(limits.lcl), f64::max);

    let x_scale = Scale::new(0.0, (series.len().max(2) - 1) as f64, width);
    let y_scale = Scale::new(lo, hi, height);

    let mut canvas = Canvas::new(width + 1, height + 1);
    let pixels: Vec<(u32, u32)> = series
        .values
        .iter()
        .enumerate()
        .map(|(i, v)| (x_scale.map(i as f64), y_scale.map_inverted(*v)))
        .collect();
    draw_polyline(&mut canvas, &pixels);

    for limit in [limits.ucl, limits.lcl] {
        draw_dotted_horizontal(&mut canvas, y_scale.map_inverted(limit), width);
    }
    let cl = y_scale.map_inverted(limits.cl);
    for x in 0..=width {
        if x % 6 < 3 {
            canvas.set(x, cl);
        }
    }

    let mut output = format!("{}:\n", title);
    output.push_str(&canvas.frame());
    output.push_str(&format!(
        "\n  UCL={:.3}  CL={:.3}  LCL={:.3}  groups={}",
        limits.ucl,
        limits.cl,
        limits.lcl,
        series.len()
    ));
    output
}

/// Render a chart descriptor's first series
///
/// Curves use their x-axis mark lines as markers; category series are
/// drawn against their horizontal mark lines.
pub fn render_descriptor(chart: &ChartDescriptor, width: u32, height: u32) -> String {
    let Some(series) = chart.series.first() else {
        return format!("{}:\n  (no series)", chart.title);
    };
    match &series.data {
        SeriesData::Xy(points) => {
            let markers: Vec<(&str, f64)> = chart
                .mark_lines()
                .filter(|m| m.axis == LineAxis::X)
                .map(|m| (m.name.as_str(), m.value))
                .collect();
            format!("{}:\n{}", chart.title, render_curve(points, &markers, width, height))
        }
        SeriesData::Category(points) => {
            if chart.mark_lines().next().is_none() {
                return render_bars(&chart.title, points.iter().map(|p| (p.label.as_str(), p.value)));
            }
            let mut limits = ControlLimits::default();
            for line in chart.mark_lines().filter(|m| m.axis == LineAxis::Y) {
                match line.name.as_str() {
                    "UCL" => limits.ucl = line.value,
                    "CL" => limits.cl = line.value,
                    "LCL" => limits.lcl = line.value,
                    _ => {}
                }
            }
            let values = points.iter().map(|p| p.value).collect();
            render_control_series(&chart.title, &ControlSeries::new(values, limits), width, height)
        }
    }
}

/// Horizontal bar rendering for histogram bins
pub fn render_bars<'a>(title: &str, bars: impl Iterator<Item = (&'a str, f64)>) -> String {
    let bars: Vec<(&str, f64)> = bars.collect();
    let peak = bars.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    let label_width = bars.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let mut lines = vec![format!("{}:", title)];
    for (label, value) in &bars {
        let len = if peak > 0.0 {
            ((value / peak) * 40.0).round() as usize
        } else {
            0
        };
        lines.push(format!(
            "  {:>w$} │{} {}",
            label,
            "█".repeat(len),
            value,
            w = label_width
        ));
    }
    lines.join("\n")
}

/// Render the process spread (mean ± 3σ) against the specification limits
pub fn render_range_bar(min: f64, max: f64, lower_limit: f64, upper_limit: f64) -> String {
    let bar_width = 60;

    let full_range = (upper_limit - lower_limit).abs().max(f64::EPSILON);
    let spec_margin = full_range * 0.1;

    let view_min = lower_limit.min(min) - spec_margin;
    let view_max = upper_limit.max(max) + spec_margin;
    let view_range = view_max - view_min;

    let position = |value: f64| -> usize {
        let pos = ((value - view_min) / view_range * bar_width as f64).max(0.0) as usize;
        pos.min(bar_width - 1)
    };
    let pos_lower = position(lower_limit);
    let pos_upper = position(upper_limit);
    let pos_min = position(min);
    let pos_max = position(max);

    let mut bar: Vec<char> = vec!['─'; bar_width];

    bar[pos_lower] = '│';
    bar[pos_upper] = '│';

    for cell in bar.iter_mut().take(pos_max + 1).skip(pos_min) {
        *cell = if *cell == '│' { '╋' } else { '═' };
    }

    bar[pos_min] = if bar[pos_min] == '╋' { '╟' } else { '[' };
    bar[pos_max] = if bar[pos_max] == '╋' { '╢' } else { ']' };

    let bar_str: String = bar.into_iter().collect();

    format!(
        "  LSL={:.3}  USL={:.3}\n  {}\n  -3σ={:.4}  +3σ={:.4}",
        lower_limit, upper_limit, bar_str, min, max
    )
}
