use super::ui;
use crate::core::chart::ChartConfig;
use crate::core::view::ConverterView;
use comfy_table::Cell;
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::debug;

/// Prints results, errors and the chart's data to the terminal.
pub struct TerminalView {
    spinner: Mutex<Option<ProgressBar>>,
    chart_location: Option<PathBuf>,
}

impl TerminalView {
    pub fn new(chart_location: Option<PathBuf>) -> Self {
        TerminalView {
            spinner: Mutex::new(None),
            chart_location,
        }
    }

    fn stop_spinner(&self) {
        if let Some(spinner) = self.spinner.lock().ok().and_then(|mut s| s.take()) {
            spinner.finish_and_clear();
        }
    }

    pub fn chart_table(chart: &ChartConfig) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![ui::header_cell("Fecha"), ui::header_cell("Valor")]);

        for (label, value) in chart.labels.iter().zip(&chart.dataset.data) {
            table.add_row(vec![
                Cell::new(label),
                ui::number_cell(chart.options.format_tooltip(*value)),
            ]);
        }
        table.to_string()
    }
}

impl ConverterView for TerminalView {
    fn clear_messages(&self) {
        self.stop_spinner();
    }

    fn show_loading(&self) {
        let spinner = ui::new_spinner("Cargando...");
        let previous = self
            .spinner
            .lock()
            .ok()
            .and_then(|mut slot| slot.replace(spinner));
        if let Some(previous) = previous {
            previous.finish_and_clear();
        }
    }

    fn show_result(&self, text: &str) {
        self.stop_spinner();
        println!("{}", ui::style_text(text, ui::StyleType::Result));
    }

    fn show_error(&self, text: &str) {
        self.stop_spinner();
        eprintln!("{}", ui::style_text(text, ui::StyleType::Error));
    }

    fn show_chart(&self, chart: &ChartConfig) {
        println!(
            "\n{}",
            ui::style_text(&chart.dataset.label, ui::StyleType::Title)
        );
        println!("{}", Self::chart_table(chart));
        if let Some(path) = &self.chart_location {
            println!(
                "{}",
                ui::style_text(
                    &format!("Gráfico guardado en {}", path.display()),
                    ui::StyleType::Subtle
                )
            );
        }
    }

    fn hide_chart(&self) {
        // The chart file itself is removed by the renderer.
        debug!("Chart hidden");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chart::ChartSeries;

    #[test]
    fn test_chart_table_lists_points_in_order() {
        let series = ChartSeries {
            labels: vec!["2024-1-9".to_string(), "2024-1-10".to_string()],
            values: vec![899.94, 900.0],
        };
        let chart = ChartConfig::line(series, crate::core::Currency::Dolar);

        let table = TerminalView::chart_table(&chart);
        let first = table.find("2024-1-9").unwrap();
        let second = table.find("2024-1-10").unwrap();
        assert!(first < second);
        assert!(table.contains("Dólar: 899.9"));
        assert!(table.contains("Dólar: 900.0"));
        assert!(table.contains("Fecha"));
    }
}
