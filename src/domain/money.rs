use {std::fmt, thiserror::Error};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MoneyError {
    #[error("amount must be a finite, non-negative number, got: {0}")]
    InvalidAmount(f64),

    #[error("amount does not fit in minor units: {0}")]
    Overflow(f64),

    #[error("currency must be a three-letter ISO 4217 code, got: {0}")]
    InvalidCurrency(String),
}

/// Amount in the currency's minor unit (cents for EUR, yen for JPY).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoneyAmount(i64);

impl MoneyAmount {
    pub fn new(minor: i64) -> Result<Self, MoneyError> {
        if minor < 0 {
            return Err(MoneyError::InvalidAmount(minor as f64));
        }
        Ok(Self(minor))
    }

    /// Converts a major-unit decimal (`12.34`) into minor units, rounding
    /// half away from zero at the currency's precision.
    pub fn from_major(major: f64, currency: &Currency) -> Result<Self, MoneyError> {
        if !major.is_finite() || major < 0.0 {
            return Err(MoneyError::InvalidAmount(major));
        }
        let scaled = (major * 10f64.powi(currency.exponent() as i32)).round();
        if scaled >= i64::MAX as f64 {
            return Err(MoneyError::Overflow(major));
        }
        Ok(Self(scaled as i64))
    }

    pub fn minor(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for MoneyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ISO 4217 currency code, upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Currency(String);

const ZERO_DECIMAL: &[&str] = &[
    "BIF", "CLP", "DJF", "GNF", "ISK", "JPY", "KMF", "KRW", "PYG", "RWF", "UGX", "UYI", "VND",
    "VUV", "XAF", "XOF", "XPF",
];
const THREE_DECIMAL: &[&str] = &["BHD", "IQD", "JOD", "KWD", "LYD", "OMR", "TND"];

impl Currency {
    pub fn new(code: &str) -> Result<Self, MoneyError> {
        let code = code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(MoneyError::InvalidCurrency(code.to_string()));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of minor-unit digits.
    pub fn exponent(&self) -> u32 {
        if ZERO_DECIMAL.contains(&self.0.as_str()) {
            0
        } else if THREE_DECIMAL.contains(&self.0.as_str()) {
            3
        } else {
            2
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Money {
    amount: MoneyAmount,
    currency: Currency,
}

impl Money {
    pub fn new(amount: MoneyAmount, currency: Currency) -> Self {
        Self { amount, currency }
    }

    pub fn from_major(major: f64, currency: Currency) -> Result<Self, MoneyError> {
        let amount = MoneyAmount::from_major(major, &currency)?;
        Ok(Self { amount, currency })
    }

    pub fn amount(&self) -> MoneyAmount {
        self.amount
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Major-unit decimal string with exactly the currency's precision,
    /// e.g. `"42.00"` for EUR or `"500"` for JPY.
    pub fn decimal_string(&self) -> String {
        let exp = self.currency.exponent();
        let minor = self.amount.minor();
        if exp == 0 {
            return minor.to_string();
        }
        let unit = 10i64.pow(exp);
        format!(
            "{}.{:0width$}",
            minor / unit,
            minor % unit,
            width = exp as usize
        )
    }
}
