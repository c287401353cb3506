//! Column names of the review and check-in tables.
//!
//! These strings are the only binding to the backend, so they are spelled
//! exactly as the columns are, including the question marks and the two
//! different spellings of the lodge name.

pub const SUBMITTED_ON: &str = "Submitted On (UTC)";
pub const FULL_NAME: &str = "Full Name";
pub const NATIONALITY: &str = "Nationality";

pub const OVERALL_TRIP_EXPERIENCE: &str = "Overall Trip Experience";
pub const OVERALL_WILDLIFE_EXPERIENCE: &str = "Overall Wildlife Experience";
pub const WOULD_RECOMMEND: &str = "Would you recommend Tuludi to your friends?";

pub const ACCOMMODATION: &str = "Your Accommodation";
pub const FACILITIES: &str = "The Camp Facilities";
pub const FOOD: &str = "The Food";
pub const HOUSEKEEPING: &str = "Housekeeping";
pub const STAFF: &str = "Our Staff";
pub const COMMUNICATION: &str = "Communication";

pub const GUIDE_NAME: &str = "Who was your guide?";
pub const GUIDE_RATING: &str = "Your Guide";

pub const MARKETING_SOURCE: &str = "How did you hear about Taludi?";
pub const TRAVEL_AGENT: &str = "Name of Travel Agent";

pub const KEY_SIGHTINGS: &str = "Key Sightings";
pub const ACTIVITIES: &str = "What activities did you do?";
pub const STANDOUT_STAFF: &str = "Did anyone in particular standout?";

pub const WILDLIFE_COMMENT: &str =
    "Any Further Comments or Recommendations about our wildlife experience?";
pub const HOSPITALITY_COMMENT: &str =
    "Any Further Comments or Recommendations about our hospitality?";
pub const GENERAL_COMMENT: &str = "Any Further Comments or Recommendations?";

pub const WILDLIFE_SENTIMENT: &str = "Wildlife Comment Sentiment";
pub const HOSPITALITY_SENTIMENT: &str = "Hospitality Comment Sentiment";
pub const OVERALL_SENTIMENT: &str = "Overall Comment Sentiment";

/// The five department ratings that make up the composite score, paired
/// with their display names.
pub const DEPARTMENTS: [(&str, &str); 5] = [
    ("Accommodation", ACCOMMODATION),
    ("Facilities", FACILITIES),
    ("Food", FOOD),
    ("Housekeeping", HOUSEKEEPING),
    ("Staff", STAFF),
];
