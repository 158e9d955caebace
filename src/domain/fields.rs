// src/domain/fields.rs

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::domain::survey::Survey;

/// Every user-editable field of a [`Survey`], in form order.
///
/// `Display`/`FromStr` use the exact JSON field names, which are also the
/// keys of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    StreetAddress,
    City,
    State,
    Zip,
    Telephone,
    Email,
    DateOfSurvey,
    LikedStudents,
    LikedLocation,
    LikedCampus,
    LikedAtmosphere,
    LikedDormRooms,
    LikedSports,
    InterestSource,
    RecommendationLikelihood,
    AdditionalComments,
}

impl Field {
    pub const ALL: [Field; 18] = [
        Field::FirstName,
        Field::LastName,
        Field::StreetAddress,
        Field::City,
        Field::State,
        Field::Zip,
        Field::Telephone,
        Field::Email,
        Field::DateOfSurvey,
        Field::LikedStudents,
        Field::LikedLocation,
        Field::LikedCampus,
        Field::LikedAtmosphere,
        Field::LikedDormRooms,
        Field::LikedSports,
        Field::InterestSource,
        Field::RecommendationLikelihood,
        Field::AdditionalComments,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::StreetAddress => "streetAddress",
            Field::City => "city",
            Field::State => "state",
            Field::Zip => "zip",
            Field::Telephone => "telephone",
            Field::Email => "email",
            Field::DateOfSurvey => "dateOfSurvey",
            Field::LikedStudents => "likedStudents",
            Field::LikedLocation => "likedLocation",
            Field::LikedCampus => "likedCampus",
            Field::LikedAtmosphere => "likedAtmosphere",
            Field::LikedDormRooms => "likedDormRooms",
            Field::LikedSports => "likedSports",
            Field::InterestSource => "interestSource",
            Field::RecommendationLikelihood => "recommendationLikelihood",
            Field::AdditionalComments => "additionalComments",
        }
    }

    /// Checkbox fields carry a boolean, everything else raw text.
    pub fn is_flag(self) -> bool {
        matches!(
            self,
            Field::LikedStudents
                | Field::LikedLocation
                | Field::LikedCampus
                | Field::LikedAtmosphere
                | Field::LikedDormRooms
                | Field::LikedSports
        )
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown survey field: {0:?}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// A single edit coming from the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldKindMismatch {
    #[error("{0} is a checkbox and takes true/false")]
    ExpectedFlag(Field),
    #[error("{0} takes text, not a checkbox value")]
    ExpectedText(Field),
}

impl Survey {
    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        let slot = match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::StreetAddress => &mut self.street_address,
            Field::City => &mut self.city,
            Field::State => &mut self.state,
            Field::Zip => &mut self.zip,
            Field::Telephone => &mut self.telephone,
            Field::Email => &mut self.email,
            Field::DateOfSurvey => &mut self.date_of_survey,
            Field::InterestSource => &mut self.interest_source,
            Field::RecommendationLikelihood => &mut self.recommendation_likelihood,
            Field::AdditionalComments => &mut self.additional_comments,
            _ => return None,
        };
        Some(slot)
    }

    fn flag_mut(&mut self, field: Field) -> Option<&mut bool> {
        let slot = match field {
            Field::LikedStudents => &mut self.liked_students,
            Field::LikedLocation => &mut self.liked_location,
            Field::LikedCampus => &mut self.liked_campus,
            Field::LikedAtmosphere => &mut self.liked_atmosphere,
            Field::LikedDormRooms => &mut self.liked_dorm_rooms,
            Field::LikedSports => &mut self.liked_sports,
            _ => return None,
        };
        Some(slot)
    }

    /// Current text of a text field, `None` for checkboxes.
    pub fn text(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::StreetAddress => &self.street_address,
            Field::City => &self.city,
            Field::State => &self.state,
            Field::Zip => &self.zip,
            Field::Telephone => &self.telephone,
            Field::Email => &self.email,
            Field::DateOfSurvey => &self.date_of_survey,
            Field::InterestSource => &self.interest_source,
            Field::RecommendationLikelihood => &self.recommendation_likelihood,
            Field::AdditionalComments => &self.additional_comments,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Current state of a checkbox, `None` for text fields.
    pub fn flag(&self, field: Field) -> Option<bool> {
        match field {
            Field::LikedStudents => Some(self.liked_students),
            Field::LikedLocation => Some(self.liked_location),
            Field::LikedCampus => Some(self.liked_campus),
            Field::LikedAtmosphere => Some(self.liked_atmosphere),
            Field::LikedDormRooms => Some(self.liked_dorm_rooms),
            Field::LikedSports => Some(self.liked_sports),
            _ => None,
        }
    }

    /// Replace exactly one field. The record is untouched on a kind mismatch.
    pub fn set(&mut self, field: Field, value: FieldValue) -> Result<(), FieldKindMismatch> {
        match value {
            FieldValue::Text(text) => {
                let slot = self
                    .text_mut(field)
                    .ok_or(FieldKindMismatch::ExpectedFlag(field))?;
                *slot = text;
            }
            FieldValue::Flag(on) => {
                let slot = self
                    .flag_mut(field)
                    .ok_or(FieldKindMismatch::ExpectedText(field))?;
                *slot = on;
            }
        }
        Ok(())
    }

    /// Flip a checkbox and return its new state.
    pub fn toggle(&mut self, field: Field) -> Result<bool, FieldKindMismatch> {
        let slot = self
            .flag_mut(field)
            .ok_or(FieldKindMismatch::ExpectedText(field))?;
        *slot = !*slot;
        Ok(*slot)
    }
}
