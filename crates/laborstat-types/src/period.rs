//! Provider period codes in calendar order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::Frequency;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// The sub-annual period an observation refers to.
///
/// Periods order by the calendar month they end in, so `M2` sorts before
/// `M10` and a quarter sorts right after its last month. Annual values sort
/// after December.
///
/// Parsing only yields provider periods. The variants stay public for
/// matching, so prefer [`Period::month`], [`Period::quarter`],
/// [`Period::half`] and [`Period::annual_average`] when building one from
/// a number that has not been checked. Out-of-range values still order
/// consistently with equality but have no provider code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Period {
    /// Calendar month, 1-12 (`M01`..`M12`).
    Month(u8),
    /// Calendar quarter, 1-4 (`Q01`..`Q04`).
    Quarter(u8),
    /// Half-year, 1-2 (`S01`, `S02`).
    Half(u8),
    /// Annual observation of an annual series (`A01`).
    Annual,
    /// Annual average of a sub-annual series, tagged with the frequency it
    /// averages: `M13` for monthly, `Q05` for quarterly, `S03` for
    /// semiannual series.
    AnnualAverage(Frequency),
}

impl Period {
    /// Returns the month period, or `None` outside 1-12.
    #[must_use]
    pub const fn month(month: u8) -> Option<Self> {
        if matches!(month, 1..=12) { Some(Self::Month(month)) } else { None }
    }

    /// Returns the quarter period, or `None` outside 1-4.
    #[must_use]
    pub const fn quarter(quarter: u8) -> Option<Self> {
        if matches!(quarter, 1..=4) { Some(Self::Quarter(quarter)) } else { None }
    }

    /// Returns the half-year period, or `None` outside 1-2.
    #[must_use]
    pub const fn half(half: u8) -> Option<Self> {
        if matches!(half, 1..=2) { Some(Self::Half(half)) } else { None }
    }

    /// Returns the annual average of a sub-annual series, or `None` for
    /// [`Frequency::Annual`] whose yearly value is [`Period::Annual`].
    #[must_use]
    pub const fn annual_average(basis: Frequency) -> Option<Self> {
        match basis {
            Frequency::Annual => None,
            _ => Some(Self::AnnualAverage(basis)),
        }
    }

    /// Returns true if the period has a provider code.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        match self {
            Self::Month(m) => matches!(*m, 1..=12),
            Self::Quarter(q) => matches!(*q, 1..=4),
            Self::Half(h) => matches!(*h, 1..=2),
            Self::Annual => true,
            Self::AnnualAverage(basis) => !matches!(basis, Frequency::Annual),
        }
    }

    /// Returns the canonical provider code, e.g. `M03` or `Q02`.
    #[must_use]
    pub fn code(&self) -> String {
        match self {
            Self::Month(m) => format!("M{m:02}"),
            Self::Quarter(q) => format!("Q{q:02}"),
            Self::Half(h) => format!("S{h:02}"),
            Self::Annual | Self::AnnualAverage(Frequency::Annual) => "A01".to_string(),
            Self::AnnualAverage(Frequency::Monthly) => "M13".to_string(),
            Self::AnnualAverage(Frequency::Quarterly) => "Q05".to_string(),
            Self::AnnualAverage(Frequency::Semiannual) => "S03".to_string(),
        }
    }

    /// Returns the first calendar month (1-12) covered by the period.
    #[must_use]
    pub const fn start_month(&self) -> u32 {
        match self {
            Self::Month(m) => *m as u32,
            Self::Quarter(q) => (*q as u32).saturating_sub(1) * 3 + 1,
            Self::Half(h) => (*h as u32).saturating_sub(1) * 6 + 1,
            Self::Annual | Self::AnnualAverage(_) => 1,
        }
    }

    /// Returns a human-readable label, e.g. `March` or `Q2`.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Month(m) => MONTH_NAMES
                .get(usize::from(*m).wrapping_sub(1))
                .map_or_else(|| format!("M{m:02}"), |name| (*name).to_string()),
            Self::Quarter(q) => format!("Q{q}"),
            Self::Half(h) => format!("H{h}"),
            Self::Annual => "Annual".to_string(),
            Self::AnnualAverage(_) => "Annual Average".to_string(),
        }
    }

    /// Returns true for annual values, including annual averages.
    #[must_use]
    pub const fn is_annual(&self) -> bool {
        matches!(self, Self::Annual | Self::AnnualAverage(_))
    }

    /// Returns the sampling frequency the period belongs to, or `None` for
    /// annual averages of sub-annual series.
    #[must_use]
    pub const fn frequency(&self) -> Option<Frequency> {
        match self {
            Self::Month(_) => Some(Frequency::Monthly),
            Self::Quarter(_) => Some(Frequency::Quarterly),
            Self::Half(_) => Some(Frequency::Semiannual),
            Self::Annual => Some(Frequency::Annual),
            Self::AnnualAverage(_) => None,
        }
    }

    /// Returns the position of the period within its year, counted from 0 in
    /// steps of its frequency, or `None` for annual averages.
    #[must_use]
    pub const fn index_in_year(&self) -> Option<u32> {
        match self {
            Self::Month(m) => Some((*m as u32).saturating_sub(1)),
            Self::Quarter(q) => Some((*q as u32).saturating_sub(1)),
            Self::Half(h) => Some((*h as u32).saturating_sub(1)),
            Self::Annual => Some(0),
            Self::AnnualAverage(_) => None,
        }
    }

    /// (end month, granularity rank, payload). Distinct periods never share
    /// a key, so ordering agrees with equality.
    const fn calendar_key(&self) -> (u16, u8, u8) {
        match self {
            Self::Month(m) => (*m as u16, 0, *m),
            Self::Quarter(q) => (*q as u16 * 3, 1, *q),
            Self::Half(h) => (*h as u16 * 6, 2, *h),
            Self::Annual => (13, 3, 0),
            Self::AnnualAverage(basis) => (
                13,
                4,
                match basis {
                    Frequency::Monthly => 0,
                    Frequency::Quarterly => 1,
                    Frequency::Semiannual => 2,
                    Frequency::Annual => 3,
                },
            ),
        }
    }

    fn from_code(prefix: char, number: u8) -> Option<Self> {
        match (prefix, number) {
            ('M', 1..=12) => Some(Self::Month(number)),
            ('M', 13) => Some(Self::AnnualAverage(Frequency::Monthly)),
            ('Q', 1..=4) => Some(Self::Quarter(number)),
            ('Q', 5) => Some(Self::AnnualAverage(Frequency::Quarterly)),
            ('S', 1..=2) => Some(Self::Half(number)),
            ('S', 3) => Some(Self::AnnualAverage(Frequency::Semiannual)),
            ('A', 1) => Some(Self::Annual),
            _ => None,
        }
    }

    fn from_month_name(name: &str) -> Option<Self> {
        if name.len() < 3 {
            return None;
        }
        let name = name.to_lowercase();
        let name = if name == "sept" { "sep" } else { name.as_str() };
        MONTH_NAMES
            .iter()
            .position(|month| {
                let month = month.to_lowercase();
                month == name || (name.len() == 3 && month.starts_with(name))
            })
            .map(|index| Self::Month(index as u8 + 1))
    }
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> Ordering {
        self.calendar_key().cmp(&other.calendar_key())
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let parsed = match chars.next().map(|c| c.to_ascii_uppercase()) {
            Some(prefix @ ('M' | 'Q' | 'S' | 'A')) if chars.as_str().len() <= 2 => chars
                .as_str()
                .parse::<u8>()
                .ok()
                .and_then(|number| Self::from_code(prefix, number)),
            _ => None,
        };

        parsed
            .or_else(|| Self::from_month_name(trimmed))
            .or_else(|| trimmed.eq_ignore_ascii_case("annual").then_some(Self::Annual))
            .ok_or_else(|| PeriodParseError(s.to_string()))
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.code()
    }
}

impl TryFrom<String> for Period {
    type Error = PeriodParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Error returned when parsing an invalid period code or label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodParseError(String);

impl std::fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid period '{}', expected a code like M01, Q02, S01, A01 or a month name",
            self.0
        )
    }
}

impl std::error::Error for PeriodParseError {}
