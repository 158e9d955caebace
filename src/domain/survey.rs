// src/domain/survey.rs

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::choices::{InterestSource, RecommendationLikelihood};

/// One respondent's feedback record, exactly as the backend stores it.
///
/// `id` is assigned by the backend on create and is never generated here.
/// A fresh draft (`Survey::default()`) has no id, empty strings and all
/// flags cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    // Respondent
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub street_address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub zip: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub telephone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    /// Calendar date, `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub date_of_survey: String,

    // What they liked most about campus
    #[serde(default, deserialize_with = "null_as_default")]
    pub liked_students: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub liked_location: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub liked_campus: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub liked_atmosphere: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub liked_dorm_rooms: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub liked_sports: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub interest_source: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommendation_likelihood: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub additional_comments: String,
}

/// Display order of the "liked items" summary.
const LIKED_LABELS: [&str; 6] = [
    "Students",
    "Location",
    "Campus",
    "Atmosphere",
    "Dorm Rooms",
    "Sports",
];

impl Survey {
    /// Flags in the fixed [`LIKED_LABELS`] order.
    fn liked_flags(&self) -> [bool; 6] {
        [
            self.liked_students,
            self.liked_location,
            self.liked_campus,
            self.liked_atmosphere,
            self.liked_dorm_rooms,
            self.liked_sports,
        ]
    }

    /// Comma-joined labels of every liked item, or `"None"`.
    ///
    /// The order is always Students, Location, Campus, Atmosphere,
    /// Dorm Rooms, Sports regardless of the order the flags were set in.
    pub fn liked_items(&self) -> String {
        let liked: Vec<&str> = LIKED_LABELS
            .iter()
            .zip(self.liked_flags())
            .filter_map(|(label, on)| on.then_some(*label))
            .collect();

        if liked.is_empty() {
            "None".to_string()
        } else {
            liked.join(", ")
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Typed view of `date_of_survey`; `None` when empty or not `YYYY-MM-DD`.
    pub fn survey_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date_of_survey.trim(), "%Y-%m-%d").ok()
    }

    pub fn interest(&self) -> Option<InterestSource> {
        self.interest_source.parse().ok()
    }

    pub fn recommendation(&self) -> Option<RecommendationLikelihood> {
        self.recommendation_likelihood.parse().ok()
    }

    /// Same record without its backend identity.
    pub fn without_id(&self) -> Survey {
        Survey {
            id: None,
            ..self.clone()
        }
    }
}

/// The backend keeps flags and comments in nullable columns.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
