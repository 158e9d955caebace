// src/domain/validation.rs

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::fields::Field;
use crate::domain::survey::Survey;

// ASCII digits only; `\d` would also accept other scripts.
static ZIP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{5}$").unwrap());
static TELEPHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").unwrap());
static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Field-keyed validation failures. Empty means the draft may be submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, &'static str>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.errors.iter().map(|(field, msg)| (*field, *msg))
    }

    fn insert(&mut self, field: Field, message: &'static str) {
        self.errors.insert(field, message);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Check a draft against every submission rule.
///
/// Rules are independent of each other, so the result names exactly the
/// missing or malformed fields. Checkboxes and comments are never reported.
pub fn validate(draft: &Survey) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    let required = [
        (Field::FirstName, &draft.first_name, "First name is required"),
        (Field::LastName, &draft.last_name, "Last name is required"),
        (Field::StreetAddress, &draft.street_address, "Street address is required"),
        (Field::City, &draft.city, "City is required"),
        (Field::State, &draft.state, "State is required"),
        (Field::DateOfSurvey, &draft.date_of_survey, "Date of survey is required"),
        (
            Field::InterestSource,
            &draft.interest_source,
            "Please select how you became interested",
        ),
        (
            Field::RecommendationLikelihood,
            &draft.recommendation_likelihood,
            "Please select a recommendation likelihood",
        ),
    ];
    for (field, value, message) in required {
        if value.is_empty() {
            errors.insert(field, message);
        }
    }

    if !ZIP.is_match(&draft.zip) {
        errors.insert(Field::Zip, "Valid 5-digit zip required");
    }
    if !TELEPHONE.is_match(&draft.telephone) {
        errors.insert(Field::Telephone, "Valid 10-digit phone number required");
    }
    if !EMAIL.is_match(&draft.email) {
        errors.insert(Field::Email, "Valid email is required");
    }

    errors
}
