use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::config::MindicadorProviderConfig;
use crate::core::currency::Currency;
use crate::core::error::ConversionError;
use crate::core::series::{ExchangeSeriesPoint, RateSeriesProvider};

/// Rate series from the mindicador.cl indicator API.
pub struct MindicadorProvider {
    base_url: String,
    client: reqwest::Client,
}

impl MindicadorProvider {
    pub fn new(config: &MindicadorProviderConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("cambio/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(MindicadorProvider {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[derive(Debug, Deserialize)]
struct IndicatorResponse {
    #[serde(default)]
    serie: Option<Vec<SeriesEntry>>,
}

#[derive(Debug, Deserialize)]
struct SeriesEntry {
    fecha: String,
    valor: f64,
}

/// Calendar date of a `fecha` value. Timestamps are read in UTC.
fn parse_fecha(fecha: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(fecha)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .or_else(|_| NaiveDate::parse_from_str(fecha, "%Y-%m-%d"))
        .ok()
}

fn into_points(entries: Vec<SeriesEntry>) -> Result<Vec<ExchangeSeriesPoint>, ConversionError> {
    entries
        .into_iter()
        .map(|entry| {
            let date = parse_fecha(&entry.fecha).ok_or_else(|| {
                ConversionError::MalformedResponse(format!("Fecha inválida: {}", entry.fecha))
            })?;
            Ok(ExchangeSeriesPoint {
                date,
                value: entry.valor,
            })
        })
        .collect()
}

#[async_trait]
impl RateSeriesProvider for MindicadorProvider {
    #[instrument(
        name = "MindicadorFetch",
        skip(self),
        fields(currency = %currency)
    )]
    async fn fetch_series(
        &self,
        currency: Currency,
    ) -> Result<Vec<ExchangeSeriesPoint>, ConversionError> {
        let url = format!("{}/{}", self.base_url, currency.code());
        debug!("Requesting rate series from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ConversionError::NetworkFailure(format!("Request error: {e}")))?;

        if !response.status().is_success() {
            return Err(ConversionError::NetworkFailure(format!(
                "HTTP error: {} for {}",
                response.status(),
                currency
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ConversionError::NetworkFailure(format!("Request error: {e}")))?;

        let data: Option<IndicatorResponse> = serde_json::from_str(&text).map_err(|e| {
            ConversionError::MalformedResponse(format!(
                "Failed to parse JSON response for {currency}: {e}"
            ))
        })?;

        let entries = data
            .and_then(|d| d.serie)
            .filter(|serie| !serie.is_empty())
            .ok_or_else(ConversionError::rate_unavailable)?;
        debug!(points = entries.len(), "Received rate series");

        into_points(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_mock_server(code: &str, status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        let request_path = format!("/{code}");

        Mock::given(method("GET"))
            .and(path(request_path))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .expect(1)
            .mount(&mock_server)
            .await;

        mock_server
    }

    fn provider(base_url: &str) -> MindicadorProvider {
        MindicadorProvider::new(&MindicadorProviderConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_successful_series_fetch() {
        let mock_response = r#"{
            "version": "1.7.0",
            "codigo": "dolar",
            "nombre": "Dólar observado",
            "unidad_medida": "Pesos",
            "serie": [
                {"fecha": "2024-01-10T03:00:00.000Z", "valor": 900.5},
                {"fecha": "2024-01-09T03:00:00.000Z", "valor": 899.25},
                {"fecha": "2024-01-08", "valor": 898}
            ]
        }"#;

        let mock_server = create_mock_server("dolar", 200, mock_response).await;
        let series = provider(&mock_server.uri())
            .fetch_series(Currency::Dolar)
            .await
            .unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert_eq!(series[0].value, 900.5);
        assert_eq!(series[2].date, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
        assert_eq!(series[2].value, 898.0);
    }

    #[tokio::test]
    async fn test_base_url_with_trailing_slash() {
        let mock_response =
            r#"{"serie": [{"fecha": "2024-03-01T03:00:00.000Z", "valor": 36700.1}]}"#;
        let mock_server = create_mock_server("uf", 200, mock_response).await;

        let series = provider(&format!("{}/", mock_server.uri()))
            .fetch_series(Currency::Uf)
            .await
            .unwrap();
        assert_eq!(series.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_series() {
        let mock_server = create_mock_server("uf", 200, r#"{"serie": []}"#).await;
        let result = provider(&mock_server.uri()).fetch_series(Currency::Uf).await;
        assert_eq!(result, Err(ConversionError::rate_unavailable()));
    }

    #[tokio::test]
    async fn test_missing_series_field() {
        let mock_server = create_mock_server("euro", 200, r#"{"codigo": "euro"}"#).await;
        let result = provider(&mock_server.uri()).fetch_series(Currency::Euro).await;
        assert_eq!(result, Err(ConversionError::rate_unavailable()));
    }

    #[tokio::test]
    async fn test_null_body() {
        let mock_server = create_mock_server("utm", 200, "null").await;
        let result = provider(&mock_server.uri()).fetch_series(Currency::Utm).await;
        assert_eq!(result, Err(ConversionError::rate_unavailable()));
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let mock_server = create_mock_server("dolar", 200, "<html>oops</html>").await;
        let result = provider(&mock_server.uri()).fetch_series(Currency::Dolar).await;
        match result {
            Err(ConversionError::MalformedResponse(msg)) => {
                assert!(msg.contains("Failed to parse JSON response for dolar"))
            }
            other => panic!("Expected a malformed response, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_fecha() {
        let body = r#"{"serie": [{"fecha": "ayer", "valor": 1.0}]}"#;
        let mock_server = create_mock_server("ipc", 200, body).await;
        let result = provider(&mock_server.uri()).fetch_series(Currency::Ipc).await;
        assert_eq!(
            result,
            Err(ConversionError::MalformedResponse("Fecha inválida: ayer".to_string()))
        );
    }

    #[tokio::test]
    async fn test_non_numeric_valor() {
        let body = r#"{"serie": [{"fecha": "2024-01-10T03:00:00.000Z", "valor": "n/a"}]}"#;
        let mock_server = create_mock_server("dolar", 200, body).await;
        let result = provider(&mock_server.uri()).fetch_series(Currency::Dolar).await;
        match result {
            Err(ConversionError::MalformedResponse(msg)) => {
                assert!(msg.contains("Failed to parse JSON response for dolar"))
            }
            other => panic!("Expected a malformed response, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_api_error_response() {
        let mock_server = create_mock_server("euro", 500, "").await;
        let result = provider(&mock_server.uri()).fetch_series(Currency::Euro).await;
        assert_eq!(
            result,
            Err(ConversionError::NetworkFailure(
                "HTTP error: 500 Internal Server Error for euro".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        // Nothing listens on the discard port.
        let result = provider("http://127.0.0.1:9")
            .fetch_series(Currency::Dolar)
            .await;
        assert!(matches!(result, Err(ConversionError::NetworkFailure(_))));
    }

    #[test]
    fn test_parse_fecha_formats() {
        let jan10 = NaiveDate::from_ymd_opt(2024, 1, 10);
        assert_eq!(parse_fecha("2024-01-10T03:00:00.000Z"), jan10);
        assert_eq!(parse_fecha("2024-01-10T23:30:00-03:00"), NaiveDate::from_ymd_opt(2024, 1, 11));
        assert_eq!(parse_fecha("2024-01-10"), jan10);
        assert_eq!(parse_fecha("10/01/2024"), None);
    }
}
