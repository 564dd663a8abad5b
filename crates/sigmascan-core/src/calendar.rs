//! Calendar diagnostics for observation series.
//!
//! The analyzer's window is positional, so a missing day silently widens the
//! time span a window covers. These checks surface such irregularities
//! without changing how a series is scored.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{Observation, TradingDate};

/// Irregularity between two adjacent observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalendarIssue {
    /// Consecutive observations more than one day apart.
    Gap {
        after: TradingDate,
        before: TradingDate,
        missing_days: i64,
    },
    /// Same date as the previous observation.
    Duplicate { index: usize, date: TradingDate },
    /// Earlier date than the previous observation.
    OutOfOrder {
        index: usize,
        previous: TradingDate,
        current: TradingDate,
    },
}

impl Display for CalendarIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gap {
                after,
                before,
                missing_days,
            } => write!(
                f,
                "{missing_days} missing day(s) between {after} and {before}; window spans the gap"
            ),
            Self::Duplicate { index, date } => {
                write!(f, "observation {index} repeats date {date}")
            }
            Self::OutOfOrder {
                index,
                previous,
                current,
            } => write!(
                f,
                "observation {index} dated {current} precedes previous date {previous}"
            ),
        }
    }
}

/// Check adjacent observations for gaps, repeats and reversals.
pub fn inspect_calendar(observations: &[Observation]) -> Vec<CalendarIssue> {
    let issues: Vec<CalendarIssue> = observations
        .windows(2)
        .enumerate()
        .filter_map(|(offset, pair)| {
            let previous = pair[0].date();
            let current = pair[1].date();
            let index = offset + 1;
            match previous.days_until(current) {
                1 => None,
                0 => Some(CalendarIssue::Duplicate {
                    index,
                    date: current,
                }),
                days if days < 0 => Some(CalendarIssue::OutOfOrder {
                    index,
                    previous,
                    current,
                }),
                days => Some(CalendarIssue::Gap {
                    after: previous,
                    before: current,
                    missing_days: days - 1,
                }),
            }
        })
        .collect();

    if !issues.is_empty() {
        warn!(issues = issues.len(), "series is not a contiguous daily calendar");
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(date: &str) -> Observation {
        Observation::new(TradingDate::parse(date).expect("valid"), 1.0, 1.0, 1.0)
            .expect("valid observation")
    }

    #[test]
    fn contiguous_series_has_no_issues() {
        let series = [at("2024-02-28"), at("2024-02-29"), at("2024-03-01")];
        assert!(inspect_calendar(&series).is_empty());
    }

    #[test]
    fn reports_gap_duplicate_and_reversal() {
        let series = [
            at("2024-01-01"),
            at("2024-01-04"),
            at("2024-01-04"),
            at("2024-01-02"),
        ];

        let issues = inspect_calendar(&series);
        assert_eq!(issues.len(), 3);
        assert!(matches!(issues[0], CalendarIssue::Gap { missing_days: 2, .. }));
        assert!(matches!(issues[1], CalendarIssue::Duplicate { index: 2, .. }));
        assert!(matches!(issues[2], CalendarIssue::OutOfOrder { index: 3, .. }));
    }

    #[test]
    fn renders_gap_as_warning_text() {
        let issues = inspect_calendar(&[at("2024-01-01"), at("2024-01-03")]);
        assert_eq!(
            issues[0].to_string(),
            "1 missing day(s) between 2024-01-01 and 2024-01-03; window spans the gap"
        );
    }
}
