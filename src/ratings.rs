use crate::compare::{change_between, round_to, share};
use crate::fields;
use crate::models::{CommunicationRating, DepartmentScore, PeriodPair, Review, StatCard};

/// Mean of a numeric field across a period. Missing or unparseable values
/// count as zero, so they pull the average down instead of being skipped.
pub fn average(reviews: &[Review], field: &str) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let total: f64 = reviews.iter().map(|review| review.number(field)).sum();
    total / reviews.len() as f64
}

fn five_point_percent(reviews: &[Review], field: &str) -> f64 {
    (average(reviews, field) / 5.0 * 100.0).round()
}

fn ten_point_percent(reviews: &[Review], field: &str) -> f64 {
    (average(reviews, field) * 10.0).round()
}

/// Builds a percentage card. The change is taken between the two already
/// scaled and rounded values, which is what the card displays.
fn percent_card(data: &PeriodPair, metric: impl Fn(&[Review]) -> f64) -> StatCard {
    let current = metric(&data.current_period);
    let previous = metric(&data.previous_period);
    StatCard {
        value: format!("{current:.0}%"),
        change: change_between(previous, current),
    }
}

fn count_card(data: &PeriodPair) -> StatCard {
    let current = data.current_period.len();
    let previous = data.previous_period.len();
    StatCard {
        value: current.to_string(),
        change: change_between(previous as f64, current as f64),
    }
}

/// Total guests checked in, over check-in records.
pub fn guest_stats(check_ins: &PeriodPair) -> StatCard {
    count_card(check_ins)
}

pub fn submission_stats(data: &PeriodPair) -> StatCard {
    count_card(data)
}

pub fn room_rating(data: &PeriodPair) -> StatCard {
    percent_card(data, |reviews| five_point_percent(reviews, fields::ACCOMMODATION))
}

pub fn facility_rating(data: &PeriodPair) -> StatCard {
    percent_card(data, |reviews| five_point_percent(reviews, fields::FACILITIES))
}

pub fn food_rating(data: &PeriodPair) -> StatCard {
    percent_card(data, |reviews| five_point_percent(reviews, fields::FOOD))
}

pub fn housekeeping_rating(data: &PeriodPair) -> StatCard {
    percent_card(data, |reviews| five_point_percent(reviews, fields::HOUSEKEEPING))
}

pub fn staff_rating(data: &PeriodPair) -> StatCard {
    percent_card(data, |reviews| five_point_percent(reviews, fields::STAFF))
}

pub fn guide_rating(data: &PeriodPair) -> StatCard {
    percent_card(data, |reviews| five_point_percent(reviews, fields::GUIDE_RATING))
}

/// Average Overall Trip Score (OTS), from the 0-10 trip experience field.
pub fn ots_score(data: &PeriodPair) -> StatCard {
    percent_card(data, |reviews| {
        ten_point_percent(reviews, fields::OVERALL_TRIP_EXPERIENCE)
    })
}

/// Average Wildlife Experience Score (WES), from the 0-10 wildlife field.
pub fn wes_score(data: &PeriodPair) -> StatCard {
    percent_card(data, |reviews| {
        ten_point_percent(reviews, fields::OVERALL_WILDLIFE_EXPERIENCE)
    })
}

fn composite_percent(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let total: f64 = reviews
        .iter()
        .flat_map(|review| {
            fields::DEPARTMENTS
                .iter()
                .map(move |(_, field)| review.number(field))
        })
        .sum();
    let max_score = reviews.len() as f64 * fields::DEPARTMENTS.len() as f64 * 5.0;
    (total / max_score * 100.0).round()
}

/// Composite of the five department ratings against their combined maximum.
pub fn overall_rating(data: &PeriodPair) -> StatCard {
    percent_card(data, composite_percent)
}

fn recommend_percent(reviews: &[Review]) -> f64 {
    let yes = reviews
        .iter()
        .filter(|review| review.flag(fields::WOULD_RECOMMEND))
        .count();
    share(yes, reviews.len()).round()
}

/// Would-Recommend Score (WRS): share of guests answering yes.
pub fn recommend_rate(data: &PeriodPair) -> StatCard {
    percent_card(data, recommend_percent)
}

pub fn department_performance(data: &PeriodPair) -> Vec<DepartmentScore> {
    let score = |reviews: &[Review], field: &str| {
        round_to(average(reviews, field) / 5.0 * 100.0, 1)
    };

    fields::DEPARTMENTS
        .iter()
        .map(|(name, field)| DepartmentScore {
            name: name.to_string(),
            current: score(&data.current_period, field),
            previous: score(&data.previous_period, field),
        })
        .collect()
}

pub fn communication_ratings(data: &PeriodPair) -> Vec<CommunicationRating> {
    vec![
        CommunicationRating {
            name: "Current Period".to_string(),
            value: round_to(average(&data.current_period, fields::COMMUNICATION), 2),
            count: data.current_period.len(),
        },
        CommunicationRating {
            name: "Previous Period".to_string(),
            value: round_to(average(&data.previous_period, fields::COMMUNICATION), 2),
            count: data.previous_period.len(),
        },
    ]
}
