//! Display surface driven by the conversion service

use crate::core::chart::ChartConfig;

/// Result area, error area and chart container of the converter.
pub trait ConverterView: Send + Sync {
    fn clear_messages(&self);
    fn show_loading(&self);
    fn show_result(&self, text: &str);
    fn show_error(&self, text: &str);
    fn show_chart(&self, chart: &ChartConfig);
    fn hide_chart(&self);
}
