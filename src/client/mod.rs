mod api;
mod rest;

pub use api::SurveyApi;
pub use rest::SurveyClient;
