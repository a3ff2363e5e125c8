use std::path::Path;

use plotters::prelude::*;
use tracing::debug;

use crate::models::{AggregateStats, Category, ChartPaths, ScoreHistogram};

const CHART_WIDTH: u32 = 900;
const CHART_HEIGHT: u32 = 500;

const SAFE_COLOR: RGBColor = RGBColor(46, 204, 113);
const FRAUD_COLOR: RGBColor = RGBColor(231, 76, 60);
const BUCKET_COLOR: RGBColor = RGBColor(52, 152, 219);

/// Upper bound for a count axis: at least 1, with ~10% headroom
pub fn axis_ceiling(max_count: u64) -> u64 {
    if max_count == 0 {
        1
    } else {
        max_count + (max_count / 10).max(1)
    }
}

/// Bar rectangles `(x0, x1, height, is_fraud)` for the grouped trend chart.
/// Category `i` occupies `[i, i + 1)` with the safe bar left of the fraud bar.
pub fn trend_bars(stats: &AggregateStats) -> Vec<(f64, f64, u64, bool)> {
    let mut bars = Vec::with_capacity(Category::ALL.len() * 2);
    for (category, counts) in stats.iter() {
        let x = category.index() as f64;
        bars.push((x + 0.1, x + 0.45, counts.safe, false));
        bars.push((x + 0.55, x + 0.9, counts.fraud, true));
    }
    bars
}

/// Render both charts into `dir`, creating it when missing
pub fn render_charts(
    dir: &Path,
    stats: &AggregateStats,
    histogram: &ScoreHistogram,
) -> Result<ChartPaths, String> {
    std::fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create chart directory {}: {}", dir.display(), e))?;

    let paths = ChartPaths {
        trend: dir.join("trend.png"),
        histogram: dir.join("histogram.png"),
    };

    render_trend_chart(&paths.trend, stats)?;
    render_histogram_chart(&paths.histogram, histogram)?;

    debug!("Charts written to {}", dir.display());
    Ok(paths)
}

/// Grouped safe/fraud bars per category
pub fn render_trend_chart(path: &Path, stats: &AggregateStats) -> Result<(), String> {
    let bars = trend_bars(stats);
    let y_max = axis_ceiling(bars.iter().map(|b| b.2).max().unwrap_or(0));

    let backend = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT));
    let root = backend.into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| format!("Failed to fill canvas: {}", e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Transactions by Category", ("sans-serif", 32.0).into_font())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..Category::ALL.len() as f64, 0u64..y_max)
        .map_err(|e| format!("Failed to build chart: {}", e))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(Category::ALL.len() * 2)
        .x_label_formatter(&|x| {
            let idx = x.floor() as usize;
            if (x - x.floor() - 0.5).abs() < 0.26 && idx < Category::ALL.len() {
                Category::ALL[idx].to_string()
            } else {
                String::new()
            }
        })
        .y_desc("Transactions")
        .draw()
        .map_err(|e| format!("Failed to draw mesh: {}", e))?;

    chart
        .draw_series(bars.iter().filter(|b| !b.3).map(|&(x0, x1, h, _)| {
            Rectangle::new([(x0, 0), (x1, h)], SAFE_COLOR.filled())
        }))
        .map_err(|e| format!("Failed to draw safe bars: {}", e))?
        .label("Safe")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], SAFE_COLOR.filled()));

    chart
        .draw_series(bars.iter().filter(|b| b.3).map(|&(x0, x1, h, _)| {
            Rectangle::new([(x0, 0), (x1, h)], FRAUD_COLOR.filled())
        }))
        .map_err(|e| format!("Failed to draw fraud bars: {}", e))?
        .label("Fraud")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], FRAUD_COLOR.filled()));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| format!("Failed to draw legend: {}", e))?;

    root.present()
        .map_err(|e| format!("Failed to render chart: {}", e))?;
    Ok(())
}

/// Ten-bucket risk score distribution
pub fn render_histogram_chart(path: &Path, histogram: &ScoreHistogram) -> Result<(), String> {
    let y_max = axis_ceiling(histogram.max());
    let bucket_count = histogram.buckets.len() as u32;

    let backend = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT));
    let root = backend.into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| format!("Failed to fill canvas: {}", e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Risk Score Distribution", ("sans-serif", 32.0).into_font())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d((0u32..bucket_count).into_segmented(), 0u64..y_max)
        .map_err(|e| format!("Failed to build chart: {}", e))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(i) => ScoreHistogram::label(*i as usize),
            _ => String::new(),
        })
        .x_desc("Fraud score")
        .y_desc("Transactions")
        .draw()
        .map_err(|e| format!("Failed to draw mesh: {}", e))?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(BUCKET_COLOR.filled())
                .margin(4)
                .data(
                    histogram
                        .buckets
                        .iter()
                        .enumerate()
                        .map(|(i, &count)| (i as u32, count)),
                ),
        )
        .map_err(|e| format!("Failed to draw histogram: {}", e))?;

    root.present()
        .map_err(|e| format!("Failed to render chart: {}", e))?;
    Ok(())
}
