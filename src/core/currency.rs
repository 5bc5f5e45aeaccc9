//! Indicator codes and their display lookups

use crate::core::error::ConversionError;
use std::fmt::Display;
use std::str::FromStr;

/// Indicators served by the rate-series endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Dolar,
    Euro,
    Uf,
    Utm,
    DolarIntercambio,
    Ivp,
    Ipc,
    Imacec,
    Tpm,
    LibraCobre,
    TasaDesempleo,
    Bitcoin,
}

impl Currency {
    pub const ALL: [Currency; 12] = [
        Currency::Dolar,
        Currency::Euro,
        Currency::Uf,
        Currency::Utm,
        Currency::DolarIntercambio,
        Currency::Ivp,
        Currency::Ipc,
        Currency::Imacec,
        Currency::Tpm,
        Currency::LibraCobre,
        Currency::TasaDesempleo,
        Currency::Bitcoin,
    ];

    /// Code used in the endpoint path.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Dolar => "dolar",
            Currency::Euro => "euro",
            Currency::Uf => "uf",
            Currency::Utm => "utm",
            Currency::DolarIntercambio => "dolar_intercambio",
            Currency::Ivp => "ivp",
            Currency::Ipc => "ipc",
            Currency::Imacec => "imacec",
            Currency::Tpm => "tpm",
            Currency::LibraCobre => "libra_cobre",
            Currency::TasaDesempleo => "tasa_desempleo",
            Currency::Bitcoin => "bitcoin",
        }
    }

    /// Prefix shown before a converted amount. Includes its own trailing
    /// space where one is wanted.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Dolar => "$",
            Currency::Euro => "€",
            Currency::Uf => "UF ",
            Currency::Utm => "UTM ",
            Currency::DolarIntercambio
            | Currency::Ivp
            | Currency::Ipc
            | Currency::Imacec
            | Currency::Tpm
            | Currency::LibraCobre
            | Currency::TasaDesempleo
            | Currency::Bitcoin => "",
        }
    }

    /// Human readable name used in chart titles.
    pub fn name(&self) -> &'static str {
        match self {
            Currency::Dolar => "Dólar",
            Currency::Euro => "Euro",
            Currency::Uf => "UF",
            Currency::Utm => "UTM",
            Currency::DolarIntercambio
            | Currency::Ivp
            | Currency::Ipc
            | Currency::Imacec
            | Currency::Tpm
            | Currency::LibraCobre
            | Currency::TasaDesempleo
            | Currency::Bitcoin => self.code(),
        }
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_lowercase();
        Currency::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or(ConversionError::UnsupportedCurrency(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_symbols() {
        assert_eq!(Currency::Dolar.symbol(), "$");
        assert_eq!(Currency::Euro.symbol(), "€");
        assert_eq!(Currency::Uf.symbol(), "UF ");
        assert_eq!(Currency::Utm.symbol(), "UTM ");
        assert_eq!(Currency::Bitcoin.symbol(), "");
    }

    #[test]
    fn test_primary_names() {
        assert_eq!(Currency::Dolar.name(), "Dólar");
        assert_eq!(Currency::Euro.name(), "Euro");
        assert_eq!(Currency::Uf.name(), "UF");
        assert_eq!(Currency::Utm.name(), "UTM");
        assert_eq!(Currency::LibraCobre.name(), "libra_cobre");
    }

    #[test]
    fn test_code_round_trips_for_every_currency() {
        for currency in Currency::ALL {
            assert_eq!(currency.code().parse::<Currency>(), Ok(currency));
        }
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trimmed() {
        assert_eq!(" DOLAR ".parse::<Currency>(), Ok(Currency::Dolar));
        assert_eq!("Euro".parse::<Currency>(), Ok(Currency::Euro));
    }

    #[test]
    fn test_parse_unknown_code() {
        assert_eq!(
            "peso".parse::<Currency>(),
            Err(ConversionError::UnsupportedCurrency("peso".to_string()))
        );
    }
}
