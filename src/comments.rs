use std::cmp::Ordering;

use crate::fields;
use crate::models::{
    parse_timestamp, CommentEntry, PeriodPair, Review, ReviewPage, ReviewSummary, Sentiment,
};

fn extract(
    reviews: &[Review],
    comment_field: &str,
    sentiment_field: &str,
    with_date: bool,
) -> Vec<CommentEntry> {
    reviews
        .iter()
        .filter_map(|review| {
            let comment = review.text(comment_field)?;
            Some(CommentEntry {
                name: review.guest_name(),
                sentiment: Sentiment::from_label(review.text(sentiment_field).as_deref()),
                comment,
                date: if with_date {
                    review.text(fields::SUBMITTED_ON)
                } else {
                    None
                },
            })
        })
        .collect()
}

/// Wildlife-experience comments from the current period.
pub fn activity_comments(data: &PeriodPair) -> Vec<CommentEntry> {
    extract(
        &data.current_period,
        fields::WILDLIFE_COMMENT,
        fields::WILDLIFE_SENTIMENT,
        false,
    )
}

/// Hospitality comments from the current period, newest first.
pub fn facility_comments(data: &PeriodPair) -> Vec<CommentEntry> {
    let mut comments = extract(
        &data.current_period,
        fields::HOSPITALITY_COMMENT,
        fields::HOSPITALITY_SENTIMENT,
        true,
    );
    comments.sort_by(|a, b| newest_first(a.date.as_deref(), b.date.as_deref()));
    comments
}

/// General comments from the current period.
pub fn guest_comments(data: &PeriodPair) -> Vec<CommentEntry> {
    extract(
        &data.current_period,
        fields::GENERAL_COMMENT,
        fields::OVERALL_SENTIMENT,
        true,
    )
}

/// Descending by timestamp; entries without a parseable date go last.
fn newest_first(a: Option<&str>, b: Option<&str>) -> Ordering {
    let a = a.and_then(parse_timestamp);
    let b = b.and_then(parse_timestamp);
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub const REVIEWS_PER_PAGE: usize = 10;

/// One page of the current period's reviews, newest first. Pages are
/// 1-based; out-of-range pages clamp to the nearest valid one.
pub fn recent_reviews(reviews: &[Review], page: usize, per_page: usize) -> ReviewPage {
    let per_page = per_page.max(1);
    let mut ordered: Vec<&Review> = reviews.iter().collect();
    ordered.sort_by(|a, b| {
        newest_first(
            a.text(fields::SUBMITTED_ON).as_deref(),
            b.text(fields::SUBMITTED_ON).as_deref(),
        )
    });

    let total_items = ordered.len();
    let total_pages = total_items.div_ceil(per_page);
    let current_page = page.clamp(1, total_pages.max(1));
    let data = ordered
        .into_iter()
        .skip((current_page - 1) * per_page)
        .take(per_page)
        .map(|review| ReviewSummary {
            id: review.id.clone(),
            name: review.guest_name(),
            submitted_on: review.text(fields::SUBMITTED_ON),
            ots: review.number(fields::OVERALL_TRIP_EXPERIENCE),
            wes: review.number(fields::OVERALL_WILDLIFE_EXPERIENCE),
            recommend: review.flag(fields::WOULD_RECOMMEND),
        })
        .collect();

    ReviewPage {
        data,
        current_page,
        total_pages,
        total_items,
        items_per_page: per_page,
    }
}
