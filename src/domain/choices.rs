// src/domain/choices.rs

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownChoice {
    pub kind: &'static str,
    pub value: String,
}

/// How the respondent became interested in the university (radio group).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterestSource {
    Friends,
    Television,
    Internet,
    Other,
}

impl InterestSource {
    pub const ALL: [InterestSource; 4] = [
        InterestSource::Friends,
        InterestSource::Television,
        InterestSource::Internet,
        InterestSource::Other,
    ];

    /// Wire value stored by the backend.
    pub fn as_str(self) -> &'static str {
        match self {
            InterestSource::Friends => "friends",
            InterestSource::Television => "television",
            InterestSource::Internet => "internet",
            InterestSource::Other => "other",
        }
    }
}

impl fmt::Display for InterestSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterestSource {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|choice| choice.as_str() == s)
            .ok_or_else(|| UnknownChoice {
                kind: "interest source",
                value: s.to_string(),
            })
    }
}

/// Likelihood of recommending the school (dropdown).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecommendationLikelihood {
    VeryLikely,
    Likely,
    Unlikely,
}

impl RecommendationLikelihood {
    pub const ALL: [RecommendationLikelihood; 3] = [
        RecommendationLikelihood::VeryLikely,
        RecommendationLikelihood::Likely,
        RecommendationLikelihood::Unlikely,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RecommendationLikelihood::VeryLikely => "Very Likely",
            RecommendationLikelihood::Likely => "Likely",
            RecommendationLikelihood::Unlikely => "Unlikely",
        }
    }
}

impl fmt::Display for RecommendationLikelihood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecommendationLikelihood {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|choice| choice.as_str() == s)
            .ok_or_else(|| UnknownChoice {
                kind: "recommendation likelihood",
                value: s.to_string(),
            })
    }
}
