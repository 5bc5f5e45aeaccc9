//! Line charts drawn with plotters into an SVG file

use crate::core::chart::{ChartBackend, ChartConfig, ChartHandle, LegendPosition, Rgba};
use anyhow::{Context, Result, anyhow, bail};
use plotters::prelude::*;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct SvgChartBackend {
    path: PathBuf,
    width: u32,
    height: u32,
}

impl SvgChartBackend {
    pub fn new<P: Into<PathBuf>>(path: P, width: u32, height: u32) -> Self {
        SvgChartBackend {
            path: path.into(),
            width,
            height,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A chart written to disk. Destroying it removes the file.
#[derive(Debug)]
pub struct SvgChart {
    path: PathBuf,
}

impl ChartHandle for SvgChart {
    fn destroy(self) -> Result<()> {
        debug!("Removing chart {}", self.path.display());
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove chart: {}", self.path.display())),
        }
    }
}

impl ChartBackend for SvgChartBackend {
    type Handle = SvgChart;

    fn construct(&mut self, config: &ChartConfig) -> Result<SvgChart> {
        if config.dataset.data.is_empty() {
            bail!("No data points to chart");
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        draw_line_chart(&self.path, (self.width, self.height), config)?;
        debug!("Chart written to {}", self.path.display());

        Ok(SvgChart {
            path: self.path.clone(),
        })
    }
}

fn to_color(color: Rgba) -> RGBAColor {
    RGBAColor(color.r, color.g, color.b, color.alpha)
}

/// Label for an x coordinate; only whole positions carry one.
fn label_at(labels: &[String], x: f64) -> String {
    let index = x.round();
    if index < 0.0 || (x - index).abs() > 1e-6 {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}

fn y_range(values: &[f64], begin_at_zero: bool) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let span = max - min;
    let padding = if span > f64::EPSILON {
        span * 0.1
    } else {
        (max.abs() * 0.05).max(1.0)
    };
    if begin_at_zero {
        (min.min(0.0), max + padding)
    } else {
        (min - padding, max + padding)
    }
}

fn draw_line_chart(path: &Path, size: (u32, u32), config: &ChartConfig) -> Result<()> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| anyhow!("Failed to fill canvas: {e}"))?;

    let labels = &config.labels;
    let values = &config.dataset.data;
    let options = &config.options;
    let (y_min, y_max) = y_range(values, options.y_begin_at_zero);
    let x_max = values.len() as f64 - 0.5;

    let mut chart = ChartBuilder::on(&root)
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..x_max, y_min..y_max)
        .map_err(|e| anyhow!("Failed to build chart: {e}"))?;

    chart
        .configure_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|x| label_at(labels, *x))
        .y_label_formatter(&|y| options.format_tick(*y))
        .draw()
        .map_err(|e| anyhow!("Failed to draw mesh: {e}"))?;

    let border = to_color(config.dataset.border_color);
    let background = to_color(config.dataset.background_color);
    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v))
        .collect();

    chart
        .draw_series(AreaSeries::new(
            points.iter().copied(),
            y_min,
            background.filled(),
        ))
        .map_err(|e| anyhow!("Failed to draw area: {e}"))?;

    chart
        .draw_series(LineSeries::new(
            points.iter().copied(),
            border.stroke_width(config.dataset.border_width),
        ))
        .map_err(|e| anyhow!("Failed to draw line: {e}"))?
        .label(config.dataset.label.as_str())
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], border.stroke_width(2))
        });

    let radius = config.dataset.point_radius;
    chart
        .draw_series(
            points
                .iter()
                .map(|&point| Circle::new(point, radius, border.filled())),
        )
        .map_err(|e| anyhow!("Failed to draw points: {e}"))?;

    let position = match options.legend_position {
        LegendPosition::Top => SeriesLabelPosition::UpperMiddle,
        LegendPosition::Bottom => SeriesLabelPosition::LowerMiddle,
    };
    chart
        .configure_series_labels()
        .position(position)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| anyhow!("Failed to draw legend: {e}"))?;

    root.present()
        .map_err(|e| anyhow!("Failed to render chart: {e}"))?;
    Ok(())
}
