use super::domain::JobRecord;
use super::variant::CurrencyStyle;
use serde::Serialize;

const TEN_THOUSAND: f64 = 10_000.0;

/// How every amount in one rendered report is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompensationMode {
    /// Monthly salary shown in units of 万 with one decimal.
    Monthly,
    /// Hourly wage shown as a plain integer.
    Hourly,
}

impl CompensationMode {
    pub const fn from_full_time(is_full_time: bool) -> Self {
        if is_full_time {
            Self::Monthly
        } else {
            Self::Hourly
        }
    }
}

/// Formats amounts for a single report pass. Built once from the derived mode so a
/// pass cannot mix monthly and hourly figures.
#[derive(Debug, Clone, Copy)]
pub struct CompensationFormatter<'a> {
    mode: CompensationMode,
    style: &'a CurrencyStyle,
}

impl<'a> CompensationFormatter<'a> {
    pub fn new(mode: CompensationMode, style: &'a CurrencyStyle) -> Self {
        Self { mode, style }
    }

    pub fn mode(&self) -> CompensationMode {
        self.mode
    }

    /// Statistics figure: `¥25.0万` or `¥1200/時間`.
    pub fn figure(&self, value: f64) -> String {
        match self.mode {
            CompensationMode::Monthly => format!(
                "{}{}{}",
                self.style.glyph,
                ten_thousands(value),
                self.style.ten_thousand
            ),
            CompensationMode::Hourly => format!(
                "{}{}{}",
                self.style.glyph,
                plain(value),
                self.style.per_hour
            ),
        }
    }

    /// Compensation line on a job card: `¥25.0万/月` or `¥1200/時間`.
    pub fn pay(&self, record: &JobRecord) -> String {
        match self.mode {
            CompensationMode::Monthly => format!(
                "{}{}{}{}",
                self.style.glyph,
                record
                    .salary
                    .map(ten_thousands)
                    .unwrap_or_else(|| "-".to_string()),
                self.style.ten_thousand,
                self.style.per_month
            ),
            CompensationMode::Hourly => format!(
                "{}{}{}",
                self.style.glyph,
                record
                    .hourly_wage
                    .map(plain)
                    .unwrap_or_else(|| "-".to_string()),
                self.style.per_hour
            ),
        }
    }
}

/// One decimal of 万. A quotient that is exactly halfway between two tenths rounds away
/// from zero (28.25 -> 28.3); everything else rounds its exact binary value, so 23.15,
/// stored just below the tie, gives 23.1.
fn ten_thousands(value: f64) -> String {
    let units = value / TEN_THOUSAND;
    let twentieths = units * 20.0;
    let exact_tie = twentieths.fract() == 0.0
        && units.mul_add(20.0, -twentieths) == 0.0
        && twentieths % 2.0 != 0.0;
    if exact_tie {
        format!("{:.1}", (units * 10.0).round() / 10.0)
    } else {
        format!("{units:.1}")
    }
}

/// Integral amounts print without a fractional part; anything else falls back to the
/// float's own `Display` so odd input still renders.
fn plain(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
