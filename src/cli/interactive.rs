use super::ui;
use crate::core::{ChartBackend, ConversionService, ConverterView, Currency, RateSeriesProvider};
use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tracing::debug;

const EXIT_WORDS: [&str; 3] = ["salir", "q", "exit"];

fn is_exit(line: &str) -> bool {
    EXIT_WORDS.contains(&line.trim().to_lowercase().as_str())
}

fn currency_prompt() -> String {
    let codes: Vec<&str> = Currency::ALL.iter().map(|c| c.code()).collect();
    format!("Moneda ({}): ", codes.join(", "))
}

async fn prompt<R>(lines: &mut Lines<R>, label: &str) -> Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    print!("{}", ui::style_text(label, ui::StyleType::Prompt));
    std::io::stdout().flush()?;
    Ok(lines.next_line().await?)
}

/// Prompts for conversions on stdin until `salir` or end of input.
pub async fn run<P, V, B>(service: &ConversionService<P, V, B>) -> Result<()>
where
    P: RateSeriesProvider,
    V: ConverterView,
    B: ChartBackend,
{
    let attempts = run_with_input(service, BufReader::new(tokio::io::stdin())).await?;
    debug!(attempts, "Leaving interactive mode");
    Ok(())
}

/// Same loop over any line source; returns how many conversions were tried.
pub async fn run_with_input<P, V, B, R>(
    service: &ConversionService<P, V, B>,
    input: R,
) -> Result<usize>
where
    P: RateSeriesProvider,
    V: ConverterView,
    B: ChartBackend,
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut attempts = 0;
    let currency_label = currency_prompt();

    println!(
        "{}",
        ui::style_text("Conversor de divisas", ui::StyleType::Title)
    );
    println!(
        "{}",
        ui::style_text("Escriba 'salir' para terminar.", ui::StyleType::Subtle)
    );

    loop {
        let Some(amount) = prompt(&mut lines, "Monto: ").await? else {
            break;
        };
        if is_exit(&amount) {
            break;
        }
        let Some(currency) = prompt(&mut lines, &currency_label).await? else {
            break;
        };
        if is_exit(&currency) {
            break;
        }

        attempts += 1;
        if let Err(e) = service.convert(&amount, &currency).await {
            debug!(error = %e, attempts, "Conversion failed, waiting for next input");
        }
        ui::print_separator();
    }

    println!();
    Ok(attempts)
}
