//! The conversion formula and its display form

use crate::core::currency::Currency;
use crate::core::error::ConversionError;
use crate::core::series::ExchangeSeriesPoint;
use crate::core::validator::ConversionRequest;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionResult {
    pub converted_amount: f64,
    pub currency: Currency,
    pub currency_symbol: &'static str,
}

impl Display for ConversionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Resultado: {}{:.2}",
            self.currency_symbol, self.converted_amount
        )
    }
}

/// Divides the amount by the latest rate, `series[0]`.
///
/// Series values are local units per foreign unit, so the amount is read as
/// local units.
pub fn convert(
    request: &ConversionRequest,
    series: &[ExchangeSeriesPoint],
) -> Result<ConversionResult, ConversionError> {
    let latest = series.first().ok_or_else(ConversionError::rate_unavailable)?;
    if !latest.value.is_finite() || latest.value <= 0.0 {
        return Err(ConversionError::MalformedResponse(format!(
            "Tipo de cambio inválido: {}",
            latest.value
        )));
    }

    Ok(ConversionResult {
        converted_amount: request.amount / latest.value,
        currency: request.currency,
        currency_symbol: request.currency.symbol(),
    })
}
