//! Core business logic abstractions

pub mod chart;
pub mod config;
pub mod conversion;
pub mod currency;
pub mod error;
pub mod log;
pub mod series;
pub mod service;
pub mod validator;
pub mod view;

// Re-export main types for cleaner imports
pub use chart::{ChartBackend, ChartConfig, ChartHandle, ChartRenderer, ChartSeries};
pub use conversion::ConversionResult;
pub use currency::Currency;
pub use error::ConversionError;
pub use series::{ExchangeSeriesPoint, RateSeriesProvider};
pub use service::{ConversionOutcome, ConversionService};
pub use validator::ConversionRequest;
pub use view::ConverterView;
