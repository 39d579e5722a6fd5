use std::fmt;
use std::str::FromStr;

use crate::error::PinnacleError;

/// The temporal bucket a report aggregates by: calendar month or quarter.
/// Exactly one grain is active per report at query/render time; callers
/// that have not picked one get `GrainNotSelected` rather than a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeGrain {
    Monthly,
    Quarterly,
}

impl TimeGrain {
    /// The calendar-dimension column this grain groups by.
    pub fn column(self) -> &'static str {
        match self {
            TimeGrain::Monthly => "month",
            TimeGrain::Quarterly => "qtr",
        }
    }

    /// The one header cell that differs between the monthly and
    /// quarterly variants of a report.
    pub fn header_label(self) -> &'static str {
        match self {
            TimeGrain::Monthly => "Month",
            TimeGrain::Quarterly => "Quarter",
        }
    }

    /// Chart axis label combining the period and year: "03/2023" for
    /// monthly, "Q2/2023" for quarterly. Rows ordered year-then-grain
    /// produce labels in ascending chronological order.
    pub fn axis_label(self, period: i64, year: i64) -> String {
        match self {
            TimeGrain::Monthly => format!("{period:02}/{year}"),
            TimeGrain::Quarterly => format!("Q{period}/{year}"),
        }
    }
}

impl fmt::Display for TimeGrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeGrain::Monthly => write!(f, "monthly"),
            TimeGrain::Quarterly => write!(f, "quarterly"),
        }
    }
}

impl FromStr for TimeGrain {
    type Err = PinnacleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" | "month" | "m" => Ok(TimeGrain::Monthly),
            "quarterly" | "quarter" | "q" => Ok(TimeGrain::Quarterly),
            other => Err(PinnacleError::Other(format!(
                "Unknown grain '{other}' — expected 'monthly' or 'quarterly'"
            ))),
        }
    }
}
