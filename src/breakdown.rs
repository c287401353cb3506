use std::collections::HashMap;

use crate::compare::{round_to, share};
use crate::fields;
use crate::geo;
use crate::models::{
    ActivityCount, GuestNationality, GuidePerformance, MarketingSource, PeriodPair, Review,
    SentimentShare, SightingCount, StaffMention, TravelAgent,
};
use crate::ratings::average;

/// Label counts that remember the order labels were first seen in.
#[derive(Debug, Clone, Default)]
pub struct Tally {
    order: Vec<String>,
    counts: HashMap<String, usize>,
}

impl Tally {
    pub fn add(&mut self, label: &str) {
        match self.counts.get_mut(label) {
            Some(count) => *count += 1,
            None => {
                self.order.push(label.to_string());
                self.counts.insert(label.to_string(), 1);
            }
        }
    }

    pub fn get(&self, label: &str) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Counts in first-seen order, largest first; ties keep that order.
    pub fn ranked(&self) -> Vec<(String, usize)> {
        let mut entries: Vec<(String, usize)> = self
            .order
            .iter()
            .map(|label| (label.clone(), self.get(label)))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

/// Counts every comma-separated token of a multi-value field.
pub fn tally_tokens(reviews: &[Review], field: &str) -> Tally {
    let mut tally = Tally::default();
    for review in reviews {
        for token in review.tokens(field) {
            tally.add(&token);
        }
    }
    tally
}

/// Counts one label per record for a single-value field.
fn tally_values(reviews: &[Review], field: &str, fallback: Option<&str>) -> Tally {
    let mut tally = Tally::default();
    for review in reviews {
        let value = review.text(field).map(|raw| raw.trim().to_string());
        match (value.as_deref(), fallback) {
            (Some(label), _) if !label.is_empty() => tally.add(label),
            (_, Some(fallback)) => tally.add(fallback),
            _ => {}
        }
    }
    tally
}

/// Labels seen in either period: current first, then previous-only ones.
fn union_labels(current: &Tally, previous: &Tally) -> Vec<String> {
    let mut labels: Vec<String> = current.labels().map(str::to_string).collect();
    labels.extend(
        previous
            .labels()
            .filter(|label| current.get(label) == 0)
            .map(str::to_string),
    );
    labels
}

/// Group-count-compare: joins both periods' counts per label and sorts by
/// the current count, descending. The sort is stable.
fn compare_counts<T>(
    current: &Tally,
    previous: &Tally,
    build: impl Fn(String, usize, usize) -> T,
    key: impl Fn(&T) -> usize,
) -> Vec<T> {
    let mut entries: Vec<T> = union_labels(current, previous)
        .into_iter()
        .map(|label| {
            let now = current.get(&label);
            let before = previous.get(&label);
            build(label, now, before)
        })
        .collect();
    entries.sort_by(|a, b| key(b).cmp(&key(a)));
    entries
}

/// Share of guests per marketing channel. Records without an answer count
/// under "Other".
pub fn marketing_sources(data: &PeriodPair) -> Vec<MarketingSource> {
    let current = tally_values(&data.current_period, fields::MARKETING_SOURCE, Some("Other"));
    let previous = tally_values(&data.previous_period, fields::MARKETING_SOURCE, Some("Other"));
    let current_total = current.total();
    let previous_total = previous.total();

    let mut sources: Vec<MarketingSource> = union_labels(&current, &previous)
        .into_iter()
        .map(|name| {
            let count = current.get(&name);
            let previous_count = previous.get(&name);
            MarketingSource {
                value: share(count, current_total),
                previous_value: share(previous_count, previous_total),
                count,
                previous_count,
                name,
            }
        })
        .collect();
    sources.sort_by(|a, b| b.value.total_cmp(&a.value));
    sources
}

#[derive(Debug, Default, Clone, Copy)]
struct SentimentTotals {
    positive: usize,
    negative: usize,
    tagged: usize,
}

impl SentimentTotals {
    fn collect(reviews: &[Review]) -> Self {
        let mut totals = Self::default();
        let tagged_fields = [
            fields::WILDLIFE_SENTIMENT,
            fields::HOSPITALITY_SENTIMENT,
            fields::OVERALL_SENTIMENT,
        ];
        for review in reviews {
            for field in tagged_fields {
                let Some(label) = review.text(field) else {
                    continue;
                };
                totals.tagged += 1;
                match label.as_str() {
                    "Positive" => totals.positive += 1,
                    "Negative" => totals.negative += 1,
                    _ => {}
                }
            }
        }
        totals
    }

    fn percent(&self, count: usize) -> i64 {
        share(count, self.tagged).round() as i64
    }
}

/// Positive and negative share of all sentiment-tagged comments. Each of the
/// three comment sentiments on a review is a separate observation.
pub fn sentiment_ratio(data: &PeriodPair) -> Vec<SentimentShare> {
    let current = SentimentTotals::collect(&data.current_period);
    if current.tagged == 0 {
        return Vec::new();
    }
    let previous = SentimentTotals::collect(&data.previous_period);

    vec![
        SentimentShare {
            name: "Positive".to_string(),
            value: current.percent(current.positive),
            previous_value: previous.percent(previous.positive),
        },
        SentimentShare {
            name: "Negative".to_string(),
            value: current.percent(current.negative),
            previous_value: previous.percent(previous.negative),
        },
    ]
}

pub fn activity_counts(data: &PeriodPair) -> Vec<ActivityCount> {
    let current = tally_tokens(&data.current_period, fields::ACTIVITIES);
    let previous = tally_tokens(&data.previous_period, fields::ACTIVITIES);
    compare_counts(
        &current,
        &previous,
        |name, count, previous_count| ActivityCount {
            name,
            count,
            previous_count,
        },
        |entry: &ActivityCount| entry.count,
    )
}

pub fn wildlife_sightings(data: &PeriodPair) -> Vec<SightingCount> {
    let current = tally_tokens(&data.current_period, fields::KEY_SIGHTINGS);
    let previous = tally_tokens(&data.previous_period, fields::KEY_SIGHTINGS);
    compare_counts(
        &current,
        &previous,
        |name, value, previous_value| SightingCount {
            name,
            value,
            previous_value,
        },
        |entry: &SightingCount| entry.value,
    )
}

/// Species shown individually on the sightings chart; everything else is
/// folded into "Other".
pub const HEADLINE_SPECIES: [&str; 5] = ["Lion", "Cheetah", "Leopard", "Elephant", "Buffalo"];

/// Re-buckets a sightings breakdown into the headline species plus "Other",
/// in that fixed order, dropping buckets with no current sightings.
pub fn consolidate_sightings(sightings: &[SightingCount]) -> Vec<SightingCount> {
    let mut buckets: Vec<SightingCount> = HEADLINE_SPECIES
        .iter()
        .chain(std::iter::once(&"Other"))
        .map(|name| SightingCount {
            name: name.to_string(),
            value: 0,
            previous_value: 0,
        })
        .collect();
    let other = buckets.len() - 1;

    for sighting in sightings {
        let slot = HEADLINE_SPECIES
            .iter()
            .position(|species| *species == sighting.name)
            .unwrap_or(other);
        buckets[slot].value += sighting.value;
        buckets[slot].previous_value += sighting.previous_value;
    }

    buckets.retain(|bucket| bucket.value > 0);
    buckets
}

pub fn staff_mentions(data: &PeriodPair) -> Vec<StaffMention> {
    let current = tally_tokens(&data.current_period, fields::STANDOUT_STAFF);
    let previous = tally_tokens(&data.previous_period, fields::STANDOUT_STAFF);
    compare_counts(
        &current,
        &previous,
        |name, mentions, previous_mentions| StaffMention {
            name,
            mentions,
            previous_mentions,
        },
        |entry: &StaffMention| entry.mentions,
    )
}

fn trips_by_guide(reviews: &[Review]) -> (Tally, HashMap<String, Vec<Review>>) {
    let mut tally = Tally::default();
    let mut grouped: HashMap<String, Vec<Review>> = HashMap::new();
    for review in reviews {
        let Some(guide) = review.text(fields::GUIDE_NAME) else {
            continue;
        };
        let guide = guide.trim().to_string();
        if guide.is_empty() {
            continue;
        }
        tally.add(&guide);
        grouped.entry(guide).or_default().push(review.clone());
    }
    (tally, grouped)
}

/// Trips taken and mean 0-5 rating per guide, busiest guides first.
pub fn guide_performance(data: &PeriodPair) -> Vec<GuidePerformance> {
    let (current, current_trips) = trips_by_guide(&data.current_period);
    let (previous, previous_trips) = trips_by_guide(&data.previous_period);
    let rating = |grouped: &HashMap<String, Vec<Review>>, guide: &str| {
        grouped
            .get(guide)
            .map(|reviews| round_to(average(reviews, fields::GUIDE_RATING), 1))
            .unwrap_or(0.0)
    };

    compare_counts(
        &current,
        &previous,
        |name, trips, previous_trips_count| GuidePerformance {
            rating: rating(&current_trips, &name),
            previous_rating: rating(&previous_trips, &name),
            trips,
            previous_trips: previous_trips_count,
            name,
        },
        |entry: &GuidePerformance| entry.trips,
    )
}

pub const TOP_AGENT_LIMIT: usize = 5;

/// Bookings per travel agent in the current period, top five only.
pub fn top_travel_agents(data: &PeriodPair) -> Vec<TravelAgent> {
    tally_values(&data.current_period, fields::TRAVEL_AGENT, None)
        .ranked()
        .into_iter()
        .take(TOP_AGENT_LIMIT)
        .map(|(name, bookings)| TravelAgent { name, bookings })
        .collect()
}

/// Guests per nationality in the current period, placed on the map by the
/// country table. Countries missing from the table are left out.
pub fn guest_nationalities(data: &PeriodPair) -> Vec<GuestNationality> {
    tally_values(&data.current_period, fields::NATIONALITY, None)
        .ranked()
        .into_iter()
        .filter_map(|(country, count)| {
            geo::coordinates(&country).map(|coordinates| GuestNationality {
                country,
                count,
                coordinates,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn pair(current: Vec<Value>, previous: Vec<Value>) -> PeriodPair {
        let parse = |values: Vec<Value>| {
            values
                .into_iter()
                .map(|value| serde_json::from_value(value).expect("valid review fixture"))
                .collect()
        };
        PeriodPair::new(parse(current), parse(previous))
    }

    fn sighting(name: &str, value: usize, previous_value: usize) -> SightingCount {
        SightingCount {
            name: name.to_string(),
            value,
            previous_value,
        }
    }

    #[test]
    fn empty_periods_give_empty_breakdowns() {
        let empty = PeriodPair::default();
        assert!(marketing_sources(&empty).is_empty());
        assert!(sentiment_ratio(&empty).is_empty());
        assert!(activity_counts(&empty).is_empty());
        assert!(wildlife_sightings(&empty).is_empty());
        assert!(staff_mentions(&empty).is_empty());
        assert!(guide_performance(&empty).is_empty());
        assert!(top_travel_agents(&empty).is_empty());
        assert!(guest_nationalities(&empty).is_empty());
        assert!(consolidate_sightings(&[]).is_empty());
    }

    #[test]
    fn sightings_split_and_rank() {
        let data = pair(
            vec![
                json!({ "Key Sightings": "Lion, Elephant" }),
                json!({ "Key Sightings": "Lion" }),
            ],
            vec![],
        );
        assert_eq!(
            wildlife_sightings(&data),
            vec![sighting("Lion", 2, 0), sighting("Elephant", 1, 0)]
        );
    }

    #[test]
    fn token_counts_sum_to_emitted_tokens() {
        let data = pair(
            vec![
                json!({ "What activities did you do?": "Game Drive, Mokoro, , Guided Walk" }),
                json!({ "What activities did you do?": "Game Drive,Boat Trip" }),
                json!({ "What activities did you do?": "" }),
                json!({}),
            ],
            vec![json!({ "What activities did you do?": "Mokoro" })],
        );
        let counts = activity_counts(&data);
        let total: usize = counts.iter().map(|entry| entry.count).sum();
        assert_eq!(total, 5);
        assert_eq!(counts[0].name, "Game Drive");
        assert_eq!(counts[0].count, 2);
        let mokoro = counts.iter().find(|entry| entry.name == "Mokoro");
        assert_eq!(mokoro.map(|entry| entry.previous_count), Some(1));
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let data = pair(
            vec![json!({ "Did anyone in particular standout?": "Tom, Eve, Sipho" })],
            vec![json!({ "Did anyone in particular standout?": "Lucky, Eve" })],
        );
        let names: Vec<String> = staff_mentions(&data)
            .into_iter()
            .map(|mention| mention.name)
            .collect();
        assert_eq!(names, vec!["Tom", "Eve", "Sipho", "Lucky"]);
    }

    #[test]
    fn previous_only_labels_are_kept_with_zero_current() {
        let data = pair(
            vec![json!({ "Did anyone in particular standout?": "Eve" })],
            vec![json!({ "Did anyone in particular standout?": "Tom, Tom" })],
        );
        assert_eq!(
            staff_mentions(&data),
            vec![
                StaffMention {
                    name: "Eve".to_string(),
                    mentions: 1,
                    previous_mentions: 0,
                },
                StaffMention {
                    name: "Tom".to_string(),
                    mentions: 0,
                    previous_mentions: 2,
                },
            ]
        );
    }

    #[test]
    fn marketing_sources_are_shares_of_period_total() {
        let data = pair(
            vec![
                json!({ "How did you hear about Taludi?": "Travel Agent" }),
                json!({ "How did you hear about Taludi?": "Travel Agent" }),
                json!({ "How did you hear about Taludi?": "Instagram" }),
                json!({}),
            ],
            vec![json!({ "How did you hear about Taludi?": "Instagram" })],
        );
        let sources = marketing_sources(&data);
        assert_eq!(sources.len(), 3);
        assert_eq!(sources[0].name, "Travel Agent");
        assert_eq!(sources[0].value, 50.0);
        assert_eq!(sources[0].count, 2);
        assert_eq!(sources[0].previous_value, 0.0);
        assert_eq!(sources[1].name, "Instagram");
        assert_eq!(sources[1].previous_value, 100.0);
        assert_eq!(sources[2].name, "Other");
        assert_eq!(sources[2].value, 25.0);
    }

    #[test]
    fn marketing_sources_with_empty_current_period() {
        let data = pair(vec![], vec![json!({ "How did you hear about Taludi?": "Google" })]);
        let sources = marketing_sources(&data);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].value, 0.0);
        assert_eq!(sources[0].previous_value, 100.0);
    }

    #[test]
    fn single_positive_wildlife_sentiment() {
        let data = pair(vec![json!({ "Wildlife Comment Sentiment": "Positive" })], vec![]);
        assert_eq!(
            sentiment_ratio(&data),
            vec![
                SentimentShare {
                    name: "Positive".to_string(),
                    value: 100,
                    previous_value: 0,
                },
                SentimentShare {
                    name: "Negative".to_string(),
                    value: 0,
                    previous_value: 0,
                },
            ]
        );
    }

    #[test]
    fn sentiment_counts_observations_not_reviews() {
        let data = pair(
            vec![
                json!({
                    "Wildlife Comment Sentiment": "Positive",
                    "Hospitality Comment Sentiment": "Negative",
                    "Overall Comment Sentiment": "Positive"
                }),
                json!({ "Overall Comment Sentiment": "Mixed" }),
            ],
            vec![
                json!({ "Overall Comment Sentiment": "Negative" }),
                json!({ "Overall Comment Sentiment": "Positive" }),
                json!({ "Overall Comment Sentiment": "Positive" }),
            ],
        );
        let ratio = sentiment_ratio(&data);
        assert_eq!(ratio[0].value, 50);
        assert_eq!(ratio[1].value, 25);
        assert_eq!(ratio[0].previous_value, 67);
        assert_eq!(ratio[1].previous_value, 33);
    }

    #[test]
    fn sentiment_needs_current_observations() {
        let data = pair(vec![json!({})], vec![json!({ "Overall Comment Sentiment": "Positive" })]);
        assert!(sentiment_ratio(&data).is_empty());
    }

    #[test]
    fn travel_agents_limited_to_top_five() {
        let agents = ["SGP", "STA", "SGP", "Thompsons", "A", "B", "C", "SGP", "STA"];
        let current: Vec<Value> = agents
            .iter()
            .map(|agent| json!({ "Name of Travel Agent": agent }))
            .chain(std::iter::once(json!({ "Name of Travel Agent": "" })))
            .collect();
        let data = pair(current, vec![json!({ "Name of Travel Agent": "Old Agent" })]);
        let top = top_travel_agents(&data);
        assert_eq!(top.len(), 5);
        assert_eq!(
            top[0],
            TravelAgent {
                name: "SGP".to_string(),
                bookings: 3,
            }
        );
        assert_eq!(top[1].bookings, 2);
        assert_eq!(top[2].name, "Thompsons");
        assert!(top.iter().all(|agent| agent.name != "Old Agent"));
    }

    #[test]
    fn unmapped_nationalities_are_dropped() {
        let data = pair(
            vec![
                json!({ "Nationality": "South Africa" }),
                json!({ "Nationality": "Atlantis" }),
                json!({ "Nationality": "South Africa" }),
            ],
            vec![],
        );
        assert_eq!(
            guest_nationalities(&data),
            vec![GuestNationality {
                country: "South Africa".to_string(),
                count: 2,
                coordinates: [22.9375, -30.5595],
            }]
        );
    }

    #[test]
    fn guide_performance_pairs_trips_with_ratings() {
        let data = pair(
            vec![
                json!({ "Who was your guide?": "Amos", "Your Guide": 5 }),
                json!({ "Who was your guide?": "KG", "Your Guide": 4 }),
                json!({ "Who was your guide?": "KG", "Your Guide": 5 }),
                json!({ "Your Guide": 2 }),
            ],
            vec![json!({ "Who was your guide?": "Amos", "Your Guide": 3 })],
        );
        let guides = guide_performance(&data);
        assert_eq!(guides.len(), 2);
        assert_eq!(guides[0].name, "KG");
        assert_eq!(guides[0].trips, 2);
        assert_eq!(guides[0].rating, 4.5);
        assert_eq!(guides[1].name, "Amos");
        assert_eq!(guides[1].previous_trips, 1);
        assert_eq!(guides[1].previous_rating, 3.0);
    }

    #[test]
    fn consolidation_folds_minor_species_into_other() {
        let breakdown = vec![
            sighting("Elephant", 4, 2),
            sighting("Wild Dog", 2, 1),
            sighting("Lion", 3, 0),
            sighting("Hippo", 1, 3),
            sighting("Cheetah", 0, 5),
        ];
        assert_eq!(
            consolidate_sightings(&breakdown),
            vec![
                sighting("Lion", 3, 0),
                sighting("Elephant", 4, 2),
                sighting("Other", 3, 4),
            ]
        );
    }
}
