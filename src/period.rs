use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc};
use tracing::debug;

use crate::models::{DateRange, PeriodPair, Review};

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// First to last day of the month containing `day`.
    pub fn month_of(day: NaiveDate) -> Self {
        let from = day.with_day(1).unwrap_or(day);
        let to = from
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(day);
        Self { from, to }
    }

    pub fn current_month() -> Self {
        Self::month_of(Utc::now().date_naive())
    }

    /// The same span one calendar month earlier. Days past the end of the
    /// shorter month clamp to its last day.
    pub fn previous_month(&self) -> Self {
        let shift = |day: NaiveDate| {
            day.checked_sub_months(Months::new(1))
                .unwrap_or(day - Duration::days(30))
        };
        Self {
            from: shift(self.from),
            to: shift(self.to),
        }
    }

    /// Whole-day membership: the `to` day counts through its last second.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        let day = at.date_naive();
        day >= self.from && day <= self.to
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.from, self.to)
    }
}

/// Resolves the ranges a command works over. Without explicit dates the
/// current calendar month is compared with the one before it; without an
/// explicit comparison range the current range is shifted back a month.
pub fn resolve_ranges(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    compare: Option<(NaiveDate, NaiveDate)>,
) -> (DateRange, DateRange) {
    let default = DateRange::current_month();
    let current = DateRange::new(from.unwrap_or(default.from), to.unwrap_or(default.to));
    let previous = compare
        .map(|(from, to)| DateRange::new(from, to))
        .unwrap_or_else(|| current.previous_month());
    (current, previous)
}

/// Splits records into the two periods by submission time. A record lands
/// in every range it falls in; records without a usable timestamp are
/// dropped.
pub fn bucket(records: Vec<Review>, current: &DateRange, previous: &DateRange) -> PeriodPair {
    let mut pair = PeriodPair::default();
    let mut undated = 0usize;

    for record in records {
        let Some(at) = record.submitted_on() else {
            undated += 1;
            continue;
        };
        let in_current = current.contains(at);
        let in_previous = previous.contains(at);
        match (in_current, in_previous) {
            (true, true) => {
                pair.previous_period.push(record.clone());
                pair.current_period.push(record);
            }
            (true, false) => pair.current_period.push(record),
            (false, true) => pair.previous_period.push(record),
            (false, false) => {}
        }
    }

    if undated > 0 {
        debug!(undated, "dropped records without a submission timestamp");
    }
    pair
}
