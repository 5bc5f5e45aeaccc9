//! Input validation, run before anything touches the network

use crate::core::currency::Currency;
use crate::core::error::ConversionError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionRequest {
    pub amount: f64,
    pub currency: Currency,
}

/// Turns the raw amount text and currency selection into a request.
///
/// The amount is checked first, so a bad amount with no currency reports the
/// amount.
pub fn validate(amount: &str, currency: &str) -> Result<ConversionRequest, ConversionError> {
    let amount = parse_amount(amount)?;

    let currency = currency.trim();
    if currency.is_empty() {
        return Err(ConversionError::MissingCurrency);
    }
    let currency = currency.parse::<Currency>()?;

    Ok(ConversionRequest { amount, currency })
}

fn parse_amount(text: &str) -> Result<f64, ConversionError> {
    let amount = text
        .trim()
        .parse::<f64>()
        .map_err(|_| ConversionError::InvalidAmount)?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ConversionError::InvalidAmount);
    }
    Ok(amount)
}
