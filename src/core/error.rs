//! Failures a conversion can end in

use thiserror::Error;

pub const RATE_UNAVAILABLE: &str = "No se pudo obtener el tipo de cambio.";
pub const GENERIC_FAILURE: &str = "Ocurrió un error al procesar la solicitud.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("Por favor, ingrese un monto válido.")]
    InvalidAmount,
    #[error("Por favor, seleccione una moneda.")]
    MissingCurrency,
    #[error("Moneda no soportada: {0}")]
    UnsupportedCurrency(String),
    #[error("{0}")]
    NetworkFailure(String),
    #[error("{0}")]
    MalformedResponse(String),
    #[error("No se pudo dibujar el gráfico: {0}")]
    RenderFailure(String),
}

impl ConversionError {
    /// Response without a usable `serie`.
    pub fn rate_unavailable() -> Self {
        ConversionError::MalformedResponse(RATE_UNAVAILABLE.to_string())
    }

    /// Raised before any request is issued.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ConversionError::InvalidAmount
                | ConversionError::MissingCurrency
                | ConversionError::UnsupportedCurrency(_)
        )
    }

    /// Text for the error area. Validation errors are shown as is, everything
    /// else is prefixed with `Error: `.
    pub fn user_message(&self) -> String {
        if self.is_validation() {
            return self.to_string();
        }
        let description = self.to_string();
        if description.trim().is_empty() {
            format!("Error: {GENERIC_FAILURE}")
        } else {
            format!("Error: {description}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_have_no_prefix() {
        assert_eq!(
            ConversionError::InvalidAmount.user_message(),
            "Por favor, ingrese un monto válido."
        );
        assert_eq!(
            ConversionError::MissingCurrency.user_message(),
            "Por favor, seleccione una moneda."
        );
    }

    #[test]
    fn test_fetch_failures_are_prefixed() {
        assert_eq!(
            ConversionError::rate_unavailable().user_message(),
            "Error: No se pudo obtener el tipo de cambio."
        );
        assert_eq!(
            ConversionError::NetworkFailure("connection refused".into()).user_message(),
            "Error: connection refused"
        );
    }

    #[test]
    fn test_empty_description_falls_back_to_generic() {
        assert_eq!(
            ConversionError::NetworkFailure(String::new()).user_message(),
            "Error: Ocurrió un error al procesar la solicitud."
        );
    }
}
