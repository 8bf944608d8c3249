use serde::{Deserialize, Serialize};

use travelfund_core::DomainError;

/// Currency the fund is kept in. Display-only: no conversion happens anywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Jpy,
    Aud,
    Cad,
    Chf,
    Cny,
    Inr,
    Thb,
    Sgd,
    Idr,
    Myr,
    Krw,
    Vnd,
    Php,
    Mxn,
    Brl,
    Nzd,
    Hkd,
}

impl Currency {
    pub const ALL: [Currency; 20] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Jpy,
        Currency::Aud,
        Currency::Cad,
        Currency::Chf,
        Currency::Cny,
        Currency::Inr,
        Currency::Thb,
        Currency::Sgd,
        Currency::Idr,
        Currency::Myr,
        Currency::Krw,
        Currency::Vnd,
        Currency::Php,
        Currency::Mxn,
        Currency::Brl,
        Currency::Nzd,
        Currency::Hkd,
    ];

    /// ISO 4217 code.
    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Aud => "AUD",
            Currency::Cad => "CAD",
            Currency::Chf => "CHF",
            Currency::Cny => "CNY",
            Currency::Inr => "INR",
            Currency::Thb => "THB",
            Currency::Sgd => "SGD",
            Currency::Idr => "IDR",
            Currency::Myr => "MYR",
            Currency::Krw => "KRW",
            Currency::Vnd => "VND",
            Currency::Php => "PHP",
            Currency::Mxn => "MXN",
            Currency::Brl => "BRL",
            Currency::Nzd => "NZD",
            Currency::Hkd => "HKD",
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl core::str::FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Currency::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::validation(format!("unsupported currency: {s}")))
    }
}
