pub mod choices;
pub mod fields;
pub mod survey;
pub mod validation;

pub use choices::{InterestSource, RecommendationLikelihood, UnknownChoice};
pub use fields::{Field, FieldKindMismatch, FieldValue, UnknownField};
pub use survey::Survey;
pub use validation::{validate, ValidationErrors};
