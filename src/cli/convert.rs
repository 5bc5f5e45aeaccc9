use crate::core::{
    ChartBackend, ConversionOutcome, ConversionService, ConverterView, RateSeriesProvider,
};
use anyhow::Result;
use tracing::debug;

/// Runs a single conversion. Failures are shown by the view and are not
/// treated as application errors.
pub async fn run<P, V, B>(
    service: &ConversionService<P, V, B>,
    amount: &str,
    currency: &str,
) -> Result<()>
where
    P: RateSeriesProvider,
    V: ConverterView,
    B: ChartBackend,
{
    match service.convert(amount, currency).await {
        Ok(ConversionOutcome::Completed(result)) => {
            debug!(converted = result.converted_amount, "Conversion completed")
        }
        Ok(ConversionOutcome::Superseded) => debug!("Conversion superseded"),
        Err(e) => debug!(error = %e, "Conversion failed"),
    }
    Ok(())
}
