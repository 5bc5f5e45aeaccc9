//! Chart data preparation and the single live chart slot

use crate::core::currency::Currency;
use crate::core::series::{CHART_POINTS, ExchangeSeriesPoint};
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

/// Labels and values in chronological order, index aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    /// Builds the series from points ordered most recent first. Only the
    /// first `CHART_POINTS` points are used.
    pub fn from_points(points: &[ExchangeSeriesPoint]) -> Self {
        let (labels, values) = points
            .iter()
            .take(CHART_POINTS)
            .rev()
            .map(|p| (format_label(p.date), p.value))
            .unzip();
        ChartSeries { labels, values }
    }
}

/// `YEAR-MONTH-DAY` without zero padding, e.g. `2024-1-10`.
pub fn format_label(date: NaiveDate) -> String {
    format!("{}-{}-{}", date.year(), date.month(), date.day())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartType {
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, alpha: f64) -> Self {
        Rgba { r, g, b, alpha }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: Rgba,
    pub background_color: Rgba,
    pub border_width: u32,
    pub point_radius: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub y_begin_at_zero: bool,
    pub y_tick_decimals: usize,
    pub legend_position: LegendPosition,
    pub tooltip_prefix: String,
}

impl ChartOptions {
    pub fn format_tick(&self, value: f64) -> String {
        format!("{:.*}", self.y_tick_decimals, value)
    }

    pub fn format_tooltip(&self, value: f64) -> String {
        format!("{}: {:.1}", self.tooltip_prefix, value)
    }
}

/// Everything handed to a `ChartBackend` to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub chart_type: ChartType,
    pub labels: Vec<String>,
    pub dataset: Dataset,
    pub options: ChartOptions,
}

impl ChartConfig {
    pub fn line(series: ChartSeries, currency: Currency) -> Self {
        let name = currency.name();
        ChartConfig {
            chart_type: ChartType::Line,
            labels: series.labels,
            dataset: Dataset {
                label: format!("Valor {name} últimos {CHART_POINTS} días"),
                data: series.values,
                border_color: Rgba::new(0xff, 0x40, 0x81, 1.0),
                background_color: Rgba::new(0xff, 0x40, 0x81, 0.1),
                border_width: 2,
                point_radius: 3,
            },
            options: ChartOptions {
                y_begin_at_zero: false,
                y_tick_decimals: 1,
                legend_position: LegendPosition::Top,
                tooltip_prefix: name.to_string(),
            },
        }
    }
}

/// A live chart bound to some drawing surface.
pub trait ChartHandle: Send {
    /// Releases whatever the chart holds on its surface.
    fn destroy(self) -> Result<()>;
}

pub trait ChartBackend: Send {
    type Handle: ChartHandle;

    fn construct(&mut self, config: &ChartConfig) -> Result<Self::Handle>;
}

/// Owns at most one live chart and replaces it on every render.
pub struct ChartRenderer<B: ChartBackend> {
    backend: B,
    current: Option<B::Handle>,
}

impl<B: ChartBackend> ChartRenderer<B> {
    pub fn new(backend: B) -> Self {
        ChartRenderer {
            backend,
            current: None,
        }
    }

    /// Draws `points` (most recent first) as a line chart, destroying the
    /// previous chart first. On failure the slot is left empty.
    pub fn render(
        &mut self,
        points: &[ExchangeSeriesPoint],
        currency: Currency,
    ) -> Result<ChartConfig> {
        let config = ChartConfig::line(ChartSeries::from_points(points), currency);

        self.clear();
        let handle = self.backend.construct(&config)?;
        debug!(points = config.labels.len(), %currency, "Chart constructed");
        self.current = Some(handle);
        Ok(config)
    }

    /// Destroys the live chart, if any.
    pub fn clear(&mut self) {
        if let Some(previous) = self.current.take() {
            debug!("Clearing chart");
            if let Err(e) = previous.destroy() {
                warn!(error = %e, "Failed to destroy chart");
            }
        }
    }
}
