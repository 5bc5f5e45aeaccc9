//! Drives one conversion from raw input to result text and chart

use crate::core::chart::{ChartBackend, ChartRenderer};
use crate::core::conversion::{self, ConversionResult};
use crate::core::error::ConversionError;
use crate::core::series::{CHART_POINTS, RateSeriesProvider};
use crate::core::validator::validate;
use crate::core::view::ConverterView;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq)]
pub enum ConversionOutcome {
    Completed(ConversionResult),
    /// A newer conversion started while this one was waiting on the network;
    /// nothing was displayed.
    Superseded,
}

pub struct ConversionService<P, V, B>
where
    B: ChartBackend,
{
    provider: P,
    view: V,
    renderer: Mutex<ChartRenderer<B>>,
    sequence: AtomicU64,
}

impl<P, V, B> ConversionService<P, V, B>
where
    P: RateSeriesProvider,
    V: ConverterView,
    B: ChartBackend,
{
    pub fn new(provider: P, view: V, backend: B) -> Self {
        ConversionService {
            provider,
            view,
            renderer: Mutex::new(ChartRenderer::new(backend)),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Validates the input, fetches the series and updates the view.
    ///
    /// Only the most recently started call may touch the view once the
    /// network phase resumes; older ones return `Superseded`.
    #[instrument(name = "Convert", skip(self))]
    pub async fn convert(
        &self,
        amount: &str,
        currency: &str,
    ) -> Result<ConversionOutcome, ConversionError> {
        let ticket = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        self.view.clear_messages();

        let request = match validate(amount, currency) {
            Ok(request) => request,
            Err(e) => {
                debug!(error = %e, "Rejected input");
                let mut renderer = self.renderer.lock().await;
                if self.sequence.load(Ordering::SeqCst) == ticket {
                    self.display_failure(&mut renderer, &e);
                }
                return Err(e);
            }
        };

        self.view.show_loading();
        let fetched = self.provider.fetch_series(request.currency).await;

        // Staleness check and display updates happen under the chart lock so
        // two completions cannot interleave.
        let mut renderer = self.renderer.lock().await;
        if self.sequence.load(Ordering::SeqCst) != ticket {
            debug!(ticket, "Discarding superseded response");
            return Ok(ConversionOutcome::Superseded);
        }

        let converted = fetched.and_then(|series| {
            conversion::convert(&request, &series).map(|result| (result, series))
        });
        let (result, series) = match converted {
            Ok(converted) => converted,
            Err(e) => {
                debug!(error = %e, "Conversion failed");
                self.display_failure(&mut renderer, &e);
                return Err(e);
            }
        };

        self.view.show_result(&result.to_string());

        let window = &series[..series.len().min(CHART_POINTS)];
        match renderer.render(window, request.currency) {
            Ok(config) => self.view.show_chart(&config),
            Err(e) => {
                let e = ConversionError::RenderFailure(e.to_string());
                self.display_failure(&mut renderer, &e);
                return Err(e);
            }
        }

        Ok(ConversionOutcome::Completed(result))
    }

    /// Shows the error and drops the chart of any earlier conversion.
    fn display_failure(&self, renderer: &mut ChartRenderer<B>, error: &ConversionError) {
        renderer.clear();
        self.view.show_error(&error.user_message());
        self.view.hide_chart();
    }
}
