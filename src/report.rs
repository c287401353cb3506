use std::fmt::Write;

use crate::compare::{change_between, round_to};
use crate::dashboard::Dashboard;
use crate::models::{CommentEntry, DateRange, StatCard};

const COMMENTS_PER_SECTION: usize = 5;

/// A 0-10 score shown as a whole percentage, e.g. 9 becomes `90%`.
pub fn score_percent(score: f64) -> String {
    format!("{:.0}%", round_to(score * 10.0, 0))
}

fn stat_line(output: &mut String, label: &str, stat: &StatCard) {
    let _ = writeln!(output, "- {}: {} ({})", label, stat.value, stat.change);
}

fn comment_section(output: &mut String, title: &str, comments: &[CommentEntry]) {
    let _ = writeln!(output);
    let _ = writeln!(output, "### {title}");

    if comments.is_empty() {
        let _ = writeln!(output, "No comments in this period.");
        return;
    }

    for comment in comments.iter().take(COMMENTS_PER_SECTION) {
        match &comment.date {
            Some(date) => {
                let _ = writeln!(
                    output,
                    "- [{}] {} ({}): {}",
                    comment.sentiment.as_str(),
                    comment.name,
                    date,
                    comment.comment
                );
            }
            None => {
                let _ = writeln!(
                    output,
                    "- [{}] {}: {}",
                    comment.sentiment.as_str(),
                    comment.name,
                    comment.comment
                );
            }
        }
    }
    if comments.len() > COMMENTS_PER_SECTION {
        let _ = writeln!(
            output,
            "- ...and {} more",
            comments.len() - COMMENTS_PER_SECTION
        );
    }
}

pub fn render_summary(dashboard: &Dashboard) -> String {
    let mut output = String::new();
    let headline = &dashboard.headline;

    if let Some(guests) = &headline.guests {
        stat_line(&mut output, "Total Guests Check In", guests);
    }
    stat_line(&mut output, "Total Submissions", &headline.submissions);
    stat_line(&mut output, "Average OTS", &headline.ots);
    stat_line(&mut output, "Average WRS", &headline.wrs);
    stat_line(&mut output, "Average WES", &headline.wes);

    let facilities = &dashboard.facilities;
    stat_line(&mut output, "Average Room Rating", &facilities.room);
    stat_line(&mut output, "Average Facility Rating", &facilities.facilities);
    stat_line(&mut output, "Average Food Rating", &facilities.food);
    stat_line(&mut output, "Average Housekeeping Rating", &facilities.housekeeping);
    stat_line(&mut output, "Average Staff Rating", &facilities.staff);
    stat_line(&mut output, "Average Guide Rating", &facilities.guide);
    stat_line(&mut output, "Overall Score", &facilities.overall);

    output
}

pub fn render(dashboard: &Dashboard, current: &DateRange, previous: &DateRange) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Guest Review Report");
    let _ = writeln!(output, "Period {current}, compared with {previous}");
    let _ = writeln!(output);
    let _ = writeln!(output, "## Headline");
    output.push_str(&render_summary(dashboard));

    let _ = writeln!(output);
    let _ = writeln!(output, "## Department Performance");
    for department in &dashboard.department_performance {
        let _ = writeln!(
            output,
            "- {}: {:.1}% (previous {:.1}%, {})",
            department.name,
            department.current,
            department.previous,
            change_between(department.previous, department.current)
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Sentiment");
    if dashboard.sentiment_ratio.is_empty() {
        let _ = writeln!(output, "No sentiment-tagged comments in this period.");
    } else {
        for share in &dashboard.sentiment_ratio {
            let _ = writeln!(
                output,
                "- {}: {}% (previous {}%)",
                share.name, share.value, share.previous_value
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Marketing Sources");
    if dashboard.marketing_sources.is_empty() {
        let _ = writeln!(output, "No marketing answers in this period.");
    } else {
        for source in &dashboard.marketing_sources {
            let _ = writeln!(
                output,
                "- {}: {:.1}% ({} guests, previous {:.1}%)",
                source.name, source.value, source.count, source.previous_value
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Communication");
    for rating in &dashboard.communication_ratings {
        let _ = writeln!(
            output,
            "- {}: {:.2} across {} reviews",
            rating.name, rating.value, rating.count
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Activities");
    if dashboard.activity_counts.is_empty() {
        let _ = writeln!(output, "No activities recorded in this period.");
    } else {
        for activity in &dashboard.activity_counts {
            let _ = writeln!(
                output,
                "- {}: {} ({})",
                activity.name,
                activity.count,
                change_between(activity.previous_count as f64, activity.count as f64)
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Wildlife Sightings");
    if dashboard.wildlife_sightings.is_empty() {
        let _ = writeln!(output, "No sightings recorded in this period.");
    } else {
        for sighting in &dashboard.wildlife_sightings {
            let _ = writeln!(
                output,
                "- {}: {} ({})",
                sighting.name,
                sighting.value,
                change_between(sighting.previous_value as f64, sighting.value as f64)
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Guides");
    if dashboard.guide_performance.is_empty() {
        let _ = writeln!(output, "No guided trips in this period.");
    } else {
        for guide in &dashboard.guide_performance {
            let _ = writeln!(
                output,
                "- {}: {} trips, rating {:.1}/5 (previous {} trips, {:.1}/5)",
                guide.name, guide.trips, guide.rating, guide.previous_trips, guide.previous_rating
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Staff Mentions");
    if dashboard.staff_mentions.is_empty() {
        let _ = writeln!(output, "No staff mentioned in this period.");
    } else {
        for mention in &dashboard.staff_mentions {
            let _ = writeln!(
                output,
                "- {}: {} ({})",
                mention.name,
                mention.mentions,
                change_between(mention.previous_mentions as f64, mention.mentions as f64)
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Top Travel Agents");
    if dashboard.top_travel_agents.is_empty() {
        let _ = writeln!(output, "No agent bookings in this period.");
    } else {
        for agent in &dashboard.top_travel_agents {
            let _ = writeln!(output, "- {}: {} bookings", agent.name, agent.bookings);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Guest Nationality");
    if dashboard.guest_nationalities.is_empty() {
        let _ = writeln!(output, "No mapped nationalities in this period.");
    } else {
        for nationality in &dashboard.guest_nationalities {
            let [longitude, latitude] = nationality.coordinates;
            let _ = writeln!(
                output,
                "- {}: {} guests ({longitude:.2}, {latitude:.2})",
                nationality.country, nationality.count
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Comments");
    comment_section(&mut output, "Wildlife", &dashboard.activity_comments);
    comment_section(&mut output, "Facilities & Staff", &dashboard.facility_comments);
    comment_section(&mut output, "General", &dashboard.guest_comments);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recent Reviews");
    let page = &dashboard.recent_reviews;
    if page.data.is_empty() {
        let _ = writeln!(output, "No reviews submitted in this period.");
    } else {
        let _ = writeln!(output, "| Guest | Submitted | OTS | WES | Recommend |");
        let _ = writeln!(output, "|---|---|---|---|---|");
        for review in &page.data {
            let _ = writeln!(
                output,
                "| {} | {} | {} | {} | {} |",
                review.name,
                review.submitted_on.as_deref().unwrap_or("-"),
                score_percent(review.ots),
                score_percent(review.wes),
                if review.recommend { "Yes" } else { "No" }
            );
        }
        let _ = writeln!(
            output,
            "Showing {} of {} reviews.",
            page.data.len(),
            page.total_items
        );
    }

    output
}
