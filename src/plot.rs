//! SVG bar chart of the summary statistics.
//!
//! One chart, three bars (Mean | Median | Mode), each annotated with its
//! value at two decimals.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use crate::model::StatsSummary;

/// Default chart destination used by the viewer's save key.
pub const DEFAULT_PLOT_OUTPUT: &str = "project_plot.svg";

const WIDTH: u32 = 960;
const HEIGHT: u32 = 600;
const MARGIN_LEFT: u32 = 90;
const MARGIN_RIGHT: u32 = 40;
const MARGIN_TOP: u32 = 70;
const MARGIN_BOTTOM: u32 = 70;
const Y_TICKS: u32 = 5;
const BAR_FILL: &str = "#4c72b0";

/// Writing the chart failed.
#[derive(Error, Debug)]
#[error("Failed to save plot to {}: {source}", path.display())]
pub struct PlotError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Renders the chart as a standalone SVG document.
pub fn render_chart_svg(stats: &StatsSummary) -> String {
    let points = stats.chart_points();
    let plot_w = (WIDTH - MARGIN_LEFT - MARGIN_RIGHT) as f64;
    let plot_h = (HEIGHT - MARGIN_TOP - MARGIN_BOTTOM) as f64;
    let base_y = (HEIGHT - MARGIN_BOTTOM) as f64;

    let max_value = points.iter().map(|p| p.value).fold(0.0_f64, f64::max);
    let y_max = nice_ceiling(max_value);
    let scale = |v: f64| v / y_max * plot_h;

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">\n",
        WIDTH, HEIGHT, WIDTH, HEIGHT
    ));
    out.push_str("<rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");
    out.push_str("<g font-family=\"sans-serif\">\n");

    // Title and axis label
    out.push_str(&format!(
        "<text x=\"{}\" y=\"{}\" font-size=\"22\" text-anchor=\"middle\">Mean | Median | Mode</text>\n",
        WIDTH / 2,
        MARGIN_TOP / 2
    ));
    out.push_str(&format!(
        "<text x=\"{}\" y=\"{}\" font-size=\"16\" text-anchor=\"middle\" transform=\"rotate(-90 {} {})\">Length</text>\n",
        MARGIN_LEFT / 3,
        MARGIN_TOP as f64 + plot_h / 2.0,
        MARGIN_LEFT / 3,
        MARGIN_TOP as f64 + plot_h / 2.0
    ));

    // Y axis with ticks
    for i in 0..=Y_TICKS {
        let value = y_max * i as f64 / Y_TICKS as f64;
        let y = base_y - scale(value);
        out.push_str(&format!(
            "<line x1=\"{}\" y1=\"{:.1}\" x2=\"{}\" y2=\"{:.1}\" stroke=\"#dddddd\"/>\n",
            MARGIN_LEFT,
            y,
            WIDTH - MARGIN_RIGHT,
            y
        ));
        out.push_str(&format!(
            "<text x=\"{}\" y=\"{:.1}\" font-size=\"13\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            MARGIN_LEFT - 8,
            y,
            format_tick(value)
        ));
    }
    out.push_str(&format!(
        "<line x1=\"{0}\" y1=\"{1}\" x2=\"{0}\" y2=\"{2}\" stroke=\"black\"/>\n",
        MARGIN_LEFT,
        MARGIN_TOP,
        base_y
    ));
    out.push_str(&format!(
        "<line x1=\"{}\" y1=\"{2}\" x2=\"{}\" y2=\"{2}\" stroke=\"black\"/>\n",
        MARGIN_LEFT,
        WIDTH - MARGIN_RIGHT,
        base_y
    ));

    // Bars
    let slot = plot_w / points.len() as f64;
    let bar_w = slot * 0.6;
    for (i, point) in points.iter().enumerate() {
        let x = MARGIN_LEFT as f64 + slot * i as f64 + (slot - bar_w) / 2.0;
        let h = scale(point.value);
        let center = x + bar_w / 2.0;
        out.push_str(&format!(
            "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\" stroke=\"black\" stroke-width=\"1\"/>\n",
            x,
            base_y - h,
            bar_w,
            h,
            BAR_FILL
        ));
        out.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"15\" font-weight=\"bold\" text-anchor=\"middle\">{:.2}</text>\n",
            center,
            base_y - h - 8.0,
            point.value
        ));
        out.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"16\" text-anchor=\"middle\">{}</text>\n",
            center,
            base_y + 28.0,
            point.label
        ));
    }

    out.push_str("</g>\n</svg>\n");
    out
}

/// Writes the chart to `path`, replacing any existing file.
pub fn export_chart_svg<P: AsRef<Path>>(stats: &StatsSummary, path: P) -> Result<(), PlotError> {
    let path = path.as_ref();
    fs::write(path, render_chart_svg(stats)).map_err(|source| PlotError {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Saved plot to {}", path.display());
    Ok(())
}

/// Rounds up to 1, 2 or 5 times a power of ten, leaving headroom for labels.
fn nice_ceiling(value: f64) -> f64 {
    if value <= 0.0 {
        return 1.0;
    }
    let target = value * 1.1;
    let magnitude = 10f64.powi(target.log10().floor() as i32);
    for step in [1.0, 2.0, 5.0, 10.0] {
        if step * magnitude >= target {
            return step * magnitude;
        }
    }
    10.0 * magnitude
}

fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as u64)
    } else {
        format!("{:.1}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> StatsSummary {
        StatsSummary {
            mean: 13.0 / 3.0,
            median: 4.0,
            mode: 6,
            mode_count: 1,
        }
    }

    #[test]
    fn test_svg_has_bars_and_labels() {
        let svg = render_chart_svg(&stats());
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("Mean | Median | Mode"));
        assert_eq!(svg.matches(&format!("fill=\"{}\"", BAR_FILL)).count(), 3);
        assert!(svg.contains(">4.33<"));
        assert!(svg.contains(">4.00<"));
        assert!(svg.contains(">6.00<"));
        let mean_at = svg.find(">Mean<").unwrap();
        let median_at = svg.find(">Median<").unwrap();
        let mode_at = svg.find(">Mode<").unwrap();
        assert!(mean_at < median_at && median_at < mode_at);
    }

    #[test]
    fn test_nice_ceiling() {
        assert_eq!(nice_ceiling(0.0), 1.0);
        assert_eq!(nice_ceiling(6.0), 10.0);
        assert_eq!(nice_ceiling(4.0), 5.0);
        assert_eq!(nice_ceiling(170.0), 200.0);
        assert_eq!(nice_ceiling(1000.0), 2000.0);
    }

    #[test]
    fn test_export_chart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.svg");
        export_chart_svg(&stats(), &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("</svg>"));
    }

    #[test]
    fn test_export_chart_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("plot.svg");
        let err = export_chart_svg(&stats(), &path).unwrap_err();
        assert_eq!(err.path, path);
    }
}
