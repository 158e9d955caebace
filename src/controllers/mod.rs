mod form;
mod list;

pub use form::{FormController, FormMode, SubmitOutcome, SubmitState};
pub use list::{
    Confirm, DeleteOutcome, ListController, SurveyRow, DELETE_ALL_PROMPT, DELETE_PROMPT,
};
