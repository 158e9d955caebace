//! Student survey client.
//!
//! The survey record, its validation rules and the CRUD contract with the
//! survey backend, plus the form and list controllers any front-end can
//! drive. The backend itself lives elsewhere; this crate only talks to
//! `{api_url}/api/surveys`.
//!
//! # Flow
//! - [`FormController`] keeps a draft, validates it on submit and calls
//!   create or update through a [`SurveyApi`]
//! - [`ListController`] loads every survey, renders "liked items" and
//!   deletes with confirmation
//! - [`Navigator`] owns the current [`Route`]; navigating ends the
//!   [`Session`] of the screen that was open, so late responses are dropped
//!
//! # Configuration
//! | Variable | Default |
//! |---|---|
//! | `SURVEY_API_URL` | `http://localhost:8080` |
//! | `SURVEY_UPDATE_REDIRECT_MS` | `2000` |
//! | `SURVEY_CREATE_RESET_MS` | `3000` |
//!
//! Logging goes through `tracing`; set `RUST_LOG=student_survey=debug` to
//! see every request.

pub mod client;
pub mod config;
pub mod controllers;
pub mod domain;
pub mod errors;
pub mod navigation;

pub use client::{SurveyApi, SurveyClient};
pub use config::Config;
pub use controllers::{
    Confirm, DeleteOutcome, FormController, FormMode, ListController, SubmitOutcome, SubmitState,
    SurveyRow,
};
pub use domain::{validate, Field, FieldValue, Survey, ValidationErrors};
pub use errors::{Action, AppError, ClientError, ConfigError, FormError, Notice};
pub use navigation::{Navigator, Route, Session};
