// src/controllers/list.rs

use tracing::{debug, error, info};

use crate::client::SurveyApi;
use crate::domain::Survey;
use crate::errors::{Action, ClientError, Notice};
use crate::navigation::{Navigator, Route, Session};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this survey?";
pub const DELETE_ALL_PROMPT: &str = "Are you sure you want to delete ALL surveys?";

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// One line of the survey table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyRow {
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    pub telephone: String,
    pub date_of_survey: String,
    pub liked_items: String,
    pub interest_source: String,
    pub recommendation: String,
}

impl From<&Survey> for SurveyRow {
    fn from(survey: &Survey) -> Self {
        Self {
            id: survey.id,
            name: survey.full_name(),
            email: survey.email.clone(),
            telephone: survey.telephone.clone(),
            date_of_survey: survey.date_of_survey.clone(),
            liked_items: survey.liked_items(),
            interest_source: survey.interest_source.clone(),
            recommendation: survey.recommendation_likelihood.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user said no.
    Declined,
    /// Row without an id; nothing to delete.
    Skipped,
    Failed(Notice),
    Stale,
}

/// Survey table with edit and delete actions.
pub struct ListController<A> {
    api: A,
    nav: Navigator,
    session: Session,
    surveys: Vec<Survey>,
    loading: bool,
    notice: Option<Notice>,
}

impl<A: SurveyApi> ListController<A> {
    pub fn new(api: A, nav: &Navigator) -> Self {
        Self {
            api,
            nav: nav.clone(),
            session: nav.session(),
            surveys: Vec::new(),
            loading: true,
            notice: None,
        }
    }

    /// Fetch every survey. A failure leaves the table empty; no retry.
    pub async fn load(&mut self) {
        self.loading = true;

        let result = self.api.list_all().await;
        if !self.session.is_active() {
            debug!("dropping survey list for a closed screen");
            return;
        }

        self.loading = false;
        match result {
            Ok(surveys) => {
                debug!(count = surveys.len(), "surveys loaded");
                self.surveys = surveys;
                self.notice = None;
            }
            Err(e) => {
                error!(error = %e, "Error loading surveys");
                self.surveys.clear();
                self.notice = Some(Notice::new(Action::LoadSurveys, &e));
            }
        }
    }

    pub fn surveys(&self) -> &[Survey] {
        &self.surveys
    }

    pub fn rows(&self) -> Vec<SurveyRow> {
        self.surveys.iter().map(SurveyRow::from).collect()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    /// Open the form for `id`. Returns false when there is no id.
    pub fn edit(&mut self, id: Option<i64>) -> bool {
        match id {
            Some(id) => {
                self.nav.navigate(Route::EditSurvey(id));
                true
            }
            None => false,
        }
    }

    /// Delete after confirmation, then reload the whole table. On failure
    /// the table is left as it was.
    pub async fn delete(&mut self, id: Option<i64>, confirm: &impl Confirm) -> DeleteOutcome {
        let Some(id) = id else {
            return DeleteOutcome::Skipped;
        };
        if !confirm.confirm(DELETE_PROMPT) {
            return DeleteOutcome::Declined;
        }

        let result = self.api.delete_by_id(id).await;
        self.after_delete(Action::DeleteSurvey, result).await
    }

    /// Delete every stored survey after confirmation.
    pub async fn delete_all(&mut self, confirm: &impl Confirm) -> DeleteOutcome {
        if !confirm.confirm(DELETE_ALL_PROMPT) {
            return DeleteOutcome::Declined;
        }

        let result = self.api.delete_all().await;
        self.after_delete(Action::DeleteAllSurveys, result).await
    }

    async fn after_delete(
        &mut self,
        action: Action,
        result: Result<(), ClientError>,
    ) -> DeleteOutcome {
        if !self.session.is_active() {
            return DeleteOutcome::Stale;
        }

        match result {
            Ok(()) => {
                info!(?action, "delete done, reloading");
                self.load().await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                error!(error = %e, ?action, "Error deleting survey");
                let notice = Notice::new(action, &e);
                self.notice = Some(notice.clone());
                DeleteOutcome::Failed(notice)
            }
        }
    }
}
