use crate::core::AmountFormatter;
use crate::types::Amount;
use iso_currency::Currency;
use num_format::{Locale, ToFormattedString as _};

/// Currency display driven by a locale and an ISO 4217 currency
///
/// Units are grouped with the locale's thousands separator, the locale's
/// decimal mark precedes the sub-units, and the currency symbol trails the
/// number (`1.234,50 €` for `de` / `EUR`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrencyFormat {
    locale: Locale,
    currency: Currency,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            locale: Locale::de,
            currency: Currency::EUR,
        }
    }
}

impl CurrencyFormat {
    pub fn new(locale: Locale, currency: Currency) -> Self {
        Self { locale, currency }
    }

    /// Build a formatter from a locale name (`de`, `en`, ...) and a currency
    /// code (`EUR`, `USD`, ...)
    pub fn from_codes(locale: &str, currency: &str) -> Result<Self, String> {
        let locale =
            Locale::from_name(locale).map_err(|e| format!("Unknown locale '{}': {}", locale, e))?;
        let currency = Currency::from_code(&currency.to_uppercase())
            .ok_or_else(|| format!("Unknown currency code '{}'", currency))?;
        Ok(Self { locale, currency })
    }

    /// Standard number of decimal places of the currency (JPY = 0, EUR = 2)
    fn decimal_places(&self) -> u16 {
        self.currency.exponent().unwrap_or(0)
    }
}

impl AmountFormatter for CurrencyFormat {
    fn format(&self, amount: Amount) -> String {
        if self.decimal_places() == 0 {
            // No minor unit to show: round half up to whole units
            let units = amount
                .units()
                .saturating_add(u64::from(amount.sub_units() >= 50));
            return format!(
                "{} {}",
                units.to_formatted_string(&self.locale),
                self.currency.symbol()
            );
        }
        format!(
            "{}{}{:02} {}",
            amount.units().to_formatted_string(&self.locale),
            self.locale.decimal(),
            amount.sub_units(),
            self.currency.symbol()
        )
    }
}
