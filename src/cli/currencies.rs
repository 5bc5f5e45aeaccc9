use super::ui;
use crate::core::Currency;
use comfy_table::Cell;

/// Table of every supported code with its display name and symbol.
pub fn currencies_table() -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Código"),
        ui::header_cell("Nombre"),
        ui::header_cell("Símbolo"),
    ]);

    for currency in Currency::ALL {
        table.add_row(vec![
            Cell::new(currency.code()),
            Cell::new(currency.name()),
            Cell::new(currency.symbol().trim_end()),
        ]);
    }
    table.to_string()
}

pub fn run() {
    println!("{}", currencies_table());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lists_every_code() {
        let table = currencies_table();
        for currency in Currency::ALL {
            assert!(table.contains(currency.code()), "missing {currency}");
        }
        assert!(table.contains("Dólar"));
        assert!(table.contains("€"));
    }
}
