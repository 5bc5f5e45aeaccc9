//! Rate series abstractions and core types

use crate::core::currency::Currency;
use crate::core::error::ConversionError;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Number of points shown on the chart.
pub const CHART_POINTS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeSeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Source of indicator series, most recent point first.
#[async_trait]
pub trait RateSeriesProvider: Send + Sync {
    async fn fetch_series(
        &self,
        currency: Currency,
    ) -> Result<Vec<ExchangeSeriesPoint>, ConversionError>;
}
