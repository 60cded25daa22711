//! Display formatting for amounts
//!
//! - `numeric` - Plain two-digit numeric text (`12,05` / `12.05`)
//! - `currency` - Locale grouping and currency symbol (`1.234,50 €`)
//!
//! Both implement [`AmountFormatter`](crate::core::AmountFormatter) so that
//! output writers stay unaware of which one the caller picked.

pub mod currency;
pub mod numeric;

pub use currency::CurrencyFormat;
pub use numeric::NumericFormat;
