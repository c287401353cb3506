use serde::Serialize;

use crate::breakdown;
use crate::comments;
use crate::models::{
    ActivityCount, CommentEntry, CommunicationRating, DepartmentScore, GuestNationality,
    GuidePerformance, MarketingSource, PeriodPair, ReviewPage, SentimentShare, SightingCount,
    StaffMention, StatCard, TravelAgent,
};
use crate::ratings;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlineStats {
    /// Absent when no check-in records were supplied.
    pub guests: Option<StatCard>,
    pub submissions: StatCard,
    pub ots: StatCard,
    pub wrs: StatCard,
    pub wes: StatCard,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityStats {
    pub room: StatCard,
    pub facilities: StatCard,
    pub food: StatCard,
    pub housekeeping: StatCard,
    pub staff: StatCard,
    pub overall: StatCard,
    pub guide: StatCard,
}

/// Every chart and stat card for one pair of periods.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub headline: HeadlineStats,
    pub facilities: FacilityStats,
    pub department_performance: Vec<DepartmentScore>,
    pub sentiment_ratio: Vec<SentimentShare>,
    pub marketing_sources: Vec<MarketingSource>,
    pub communication_ratings: Vec<CommunicationRating>,
    pub top_travel_agents: Vec<TravelAgent>,
    pub guest_nationalities: Vec<GuestNationality>,
    pub activity_counts: Vec<ActivityCount>,
    pub wildlife_sightings: Vec<SightingCount>,
    pub staff_mentions: Vec<StaffMention>,
    pub guide_performance: Vec<GuidePerformance>,
    pub activity_comments: Vec<CommentEntry>,
    pub facility_comments: Vec<CommentEntry>,
    pub guest_comments: Vec<CommentEntry>,
    pub recent_reviews: ReviewPage,
}

impl Dashboard {
    pub fn build(reviews: &PeriodPair, check_ins: Option<&PeriodPair>) -> Self {
        let sightings = breakdown::wildlife_sightings(reviews);

        Self {
            headline: HeadlineStats {
                guests: check_ins.map(ratings::guest_stats),
                submissions: ratings::submission_stats(reviews),
                ots: ratings::ots_score(reviews),
                wrs: ratings::recommend_rate(reviews),
                wes: ratings::wes_score(reviews),
            },
            facilities: FacilityStats {
                room: ratings::room_rating(reviews),
                facilities: ratings::facility_rating(reviews),
                food: ratings::food_rating(reviews),
                housekeeping: ratings::housekeeping_rating(reviews),
                staff: ratings::staff_rating(reviews),
                overall: ratings::overall_rating(reviews),
                guide: ratings::guide_rating(reviews),
            },
            department_performance: ratings::department_performance(reviews),
            sentiment_ratio: breakdown::sentiment_ratio(reviews),
            marketing_sources: breakdown::marketing_sources(reviews),
            communication_ratings: ratings::communication_ratings(reviews),
            top_travel_agents: breakdown::top_travel_agents(reviews),
            guest_nationalities: breakdown::guest_nationalities(reviews),
            activity_counts: breakdown::activity_counts(reviews),
            wildlife_sightings: breakdown::consolidate_sightings(&sightings),
            staff_mentions: breakdown::staff_mentions(reviews),
            guide_performance: breakdown::guide_performance(reviews),
            activity_comments: comments::activity_comments(reviews),
            facility_comments: comments::facility_comments(reviews),
            guest_comments: comments::guest_comments(reviews),
            recent_reviews: comments::recent_reviews(
                &reviews.current_period,
                1,
                comments::REVIEWS_PER_PAGE,
            ),
        }
    }
}
