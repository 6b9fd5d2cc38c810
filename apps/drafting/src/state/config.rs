//! # Configuration State
//!
//! Display settings loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TRIPDESK_*`)
//! 2. Defaults (this file)
//!
//! Back-office connection settings live in `tripdesk_lookup::LookupConfig`;
//! only the base URL is mirrored here so the UI can show it.
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use serde::{Deserialize, Serialize};
use tripdesk_core::Money;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Agency name (invoice header)
    pub agency_name: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Back-office API the session talks to
    pub api_base_url: String,
}

impl Default for ConfigState {
    /// Returns default configuration suitable for development.
    fn default() -> Self {
        ConfigState {
            agency_name: "Tripdesk Travels".to_string(),
            currency_code: "BDT".to_string(),
            currency_symbol: "৳".to_string(),
            currency_decimals: 2,
            api_base_url: "http://localhost:8080/api".to_string(),
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `TRIPDESK_AGENCY_NAME`: Override agency name
    /// - `TRIPDESK_CURRENCY_CODE`: Override currency code
    /// - `TRIPDESK_CURRENCY_SYMBOL`: Override currency symbol
    pub fn from_env(api_base_url: impl Into<String>) -> Self {
        let mut config = ConfigState {
            api_base_url: api_base_url.into(),
            ..ConfigState::default()
        };

        if let Ok(name) = std::env::var("TRIPDESK_AGENCY_NAME") {
            config.agency_name = name;
        }

        if let Ok(code) = std::env::var("TRIPDESK_CURRENCY_CODE") {
            config.currency_code = code;
        }

        if let Ok(symbol) = std::env::var("TRIPDESK_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        config
    }

    /// Formats an amount as a currency string.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_money(Money::from_minor(123456)), "৳1,234.56");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        let minor = amount.minor_units();
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = (minor / divisor).unsigned_abs();
        let frac = (minor % divisor).unsigned_abs();

        let digits = whole.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }

        format!(
            "{}{}{}",
            if minor < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    grouped,
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                grouped
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money_positive() {
        let config = ConfigState::default();
        assert_eq!(config.format_money(Money::from_minor(1234)), "৳12.34");
        assert_eq!(config.format_money(Money::from_minor(100)), "৳1.00");
        assert_eq!(config.format_money(Money::from_minor(1)), "৳0.01");
        assert_eq!(config.format_money(Money::zero()), "৳0.00");
    }

    #[test]
    fn test_format_money_groups_thousands() {
        let config = ConfigState::default();
        assert_eq!(config.format_money(Money::from_minor(123_456)), "৳1,234.56");
        assert_eq!(config.format_money(Money::from_major(1_000_000)), "৳1,000,000.00");
    }

    #[test]
    fn test_format_money_negative() {
        let config = ConfigState::default();
        assert_eq!(config.format_money(Money::from_minor(-1234)), "-৳12.34");
    }

    #[test]
    fn test_format_money_no_decimals() {
        let config = ConfigState {
            currency_decimals: 0,
            currency_symbol: "¥".to_string(),
            ..ConfigState::default()
        };
        assert_eq!(config.format_money(Money::from_minor(1500)), "¥1,500");
    }
}
