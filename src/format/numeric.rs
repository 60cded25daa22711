use crate::core::AmountFormatter;
use crate::types::Amount;

/// Target of the plain numeric rendering of an amount
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumericFormat {
    /// Comma decimal mark, as shown in the app (`12,05`)
    #[default]
    Decimal,

    /// Dot decimal mark, as expected by the payment gateway (`12.05`)
    Payment,
}

impl NumericFormat {
    /// The decimal mark placed between units and sub-units
    pub fn separator(&self) -> char {
        match self {
            NumericFormat::Decimal => ',',
            NumericFormat::Payment => '.',
        }
    }
}

impl AmountFormatter for NumericFormat {
    fn format(&self, amount: Amount) -> String {
        amount.to_numeric_string(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatter_delegates_to_amount() {
        assert_eq!(NumericFormat::Payment.format(Amount::new(1234, 5)), "1234.05");
        assert_eq!(NumericFormat::Decimal.format(Amount::ZERO), "0,00");
    }
}
