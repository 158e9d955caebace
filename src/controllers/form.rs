// src/controllers/form.rs

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::client::SurveyApi;
use crate::config::Config;
use crate::domain::{validate, Field, FieldValue, Survey, ValidationErrors};
use crate::errors::{Action, FormError, Notice};
use crate::navigation::{Navigator, Route, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    New,
    Editing(i64),
}

/// Where the latest submission stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blocked before any request was made.
    Invalid(ValidationErrors),
    Created(Survey),
    Updated(Survey),
    Failed(Notice),
    /// The request finished after the user left the form.
    Stale,
}

/// Create/edit form for one survey.
pub struct FormController<A> {
    api: A,
    nav: Navigator,
    session: Session,
    update_redirect_delay: Duration,
    create_reset_delay: Duration,

    mode: FormMode,
    draft: Survey,
    submitted: bool,
    state: SubmitState,
    show_success: bool,
    notice: Option<Notice>,
}

impl<A: SurveyApi> FormController<A> {
    /// Empty form for a new survey, bound to the current screen.
    pub fn new(api: A, nav: &Navigator, config: &Config) -> Self {
        Self {
            api,
            nav: nav.clone(),
            session: nav.session(),
            update_redirect_delay: config.update_redirect_delay,
            create_reset_delay: config.create_reset_delay,
            mode: FormMode::New,
            draft: Survey::default(),
            submitted: false,
            state: SubmitState::Idle,
            show_success: false,
            notice: None,
        }
    }

    /// Form for the navigator's current route; `/survey/{id}` loads that survey.
    pub async fn open(api: A, nav: &Navigator, config: &Config) -> Self {
        let mut form = Self::new(api, nav, config);
        if let Route::EditSurvey(id) = nav.current() {
            form.load(id).await;
        }
        form
    }

    /// Switch to editing `id` and fetch it. On failure the draft stays empty.
    pub async fn load(&mut self, id: i64) {
        self.mode = FormMode::Editing(id);
        self.draft = Survey::default();
        self.notice = None;

        let result = self.api.get_by_id(id).await;
        if !self.session.is_active() {
            debug!(id, "dropping survey load for a closed form");
            return;
        }

        match result {
            Ok(survey) => {
                self.draft = Survey {
                    id: Some(id),
                    ..survey
                };
            }
            Err(e) => {
                error!(id, error = %e, "Error loading survey");
                self.notice = Some(Notice::new(Action::LoadSurvey, &e));
            }
        }
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<FieldValue>) -> Result<(), FormError> {
        self.draft.set(field, value.into())?;
        Ok(())
    }

    /// Flip a checkbox; returns its new state.
    pub fn toggle(&mut self, field: Field) -> Result<bool, FormError> {
        Ok(self.draft.toggle(field)?)
    }

    /// Errors to display. Nothing is shown until the first submit attempt.
    pub fn visible_errors(&self) -> ValidationErrors {
        if self.submitted {
            validate(&self.draft)
        } else {
            ValidationErrors::default()
        }
    }

    /// Validate, then create or update. An invalid draft never reaches the
    /// backend; a failed request keeps the draft for another try.
    pub async fn submit(&mut self) -> SubmitOutcome {
        self.submitted = true;
        self.notice = None;

        let errors = validate(&self.draft);
        if !errors.is_empty() {
            debug!(fields = errors.len(), "survey form has errors");
            return SubmitOutcome::Invalid(errors);
        }

        let previous = self.state;
        self.state = SubmitState::Submitting;
        let (action, result) = match self.mode {
            FormMode::New => (Action::CreateSurvey, self.api.create(&self.draft).await),
            FormMode::Editing(id) => (
                Action::UpdateSurvey,
                self.api.update(id, &self.draft).await,
            ),
        };

        if !self.session.is_active() {
            debug!("dropping submit result for a closed form");
            self.state = previous;
            return SubmitOutcome::Stale;
        }

        match result {
            Ok(saved) => {
                self.state = SubmitState::Succeeded;
                self.show_success = true;
                info!(id = ?saved.id, "survey saved");
                match self.mode {
                    FormMode::New => SubmitOutcome::Created(saved),
                    FormMode::Editing(_) => SubmitOutcome::Updated(saved),
                }
            }
            Err(e) => {
                error!(error = %e, ?action, "Error saving survey");
                let notice = Notice::new(action, &e);
                self.state = SubmitState::Failed;
                self.notice = Some(notice.clone());
                SubmitOutcome::Failed(notice)
            }
        }
    }

    /// After a successful submit, wait and then return to the list (edit) or
    /// clear the form (create). Does nothing otherwise.
    pub async fn complete(&mut self) {
        if self.state != SubmitState::Succeeded {
            return;
        }

        match self.mode {
            FormMode::Editing(_) => {
                sleep(self.update_redirect_delay).await;
                if self.session.is_active() {
                    self.nav.navigate(Route::SurveyList);
                }
            }
            FormMode::New => {
                sleep(self.create_reset_delay).await;
                if self.session.is_active() {
                    self.clear();
                    self.show_success = false;
                }
            }
        }
    }

    /// Back to an empty draft. Only a new survey can be reset.
    pub fn reset(&mut self) -> Result<(), FormError> {
        if self.mode != FormMode::New {
            return Err(FormError::ResetUnavailable);
        }
        self.clear();
        Ok(())
    }

    /// Leave without saving.
    pub fn cancel(&mut self) {
        self.nav.navigate(Route::Home);
    }

    fn clear(&mut self) {
        self.draft = Survey::default();
        self.submitted = false;
        self.state = SubmitState::Idle;
        self.notice = None;
    }

    pub fn draft(&self) -> &Survey {
        &self.draft
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    pub fn submitted(&self) -> bool {
        self.submitted
    }

    pub fn show_success(&self) -> bool {
        self.show_success
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }
}
