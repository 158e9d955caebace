use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Survey;
use crate::errors::ClientError;

/// CRUD contract of the survey backend.
///
/// Every call is a single request: no retries, no caching. Failures carry
/// the transport error untouched.
#[async_trait]
pub trait SurveyApi: Send + Sync {
    /// Persist a new survey; the returned record carries the assigned id.
    async fn create(&self, survey: &Survey) -> Result<Survey, ClientError>;

    /// All stored surveys, in backend order.
    async fn list_all(&self) -> Result<Vec<Survey>, ClientError>;

    async fn get_by_id(&self, id: i64) -> Result<Survey, ClientError>;

    /// Full replace of the stored record.
    async fn update(&self, id: i64, survey: &Survey) -> Result<Survey, ClientError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), ClientError>;

    async fn delete_all(&self) -> Result<(), ClientError>;
}

#[async_trait]
impl<T: SurveyApi + ?Sized> SurveyApi for Arc<T> {
    async fn create(&self, survey: &Survey) -> Result<Survey, ClientError> {
        (**self).create(survey).await
    }

    async fn list_all(&self) -> Result<Vec<Survey>, ClientError> {
        (**self).list_all().await
    }

    async fn get_by_id(&self, id: i64) -> Result<Survey, ClientError> {
        (**self).get_by_id(id).await
    }

    async fn update(&self, id: i64, survey: &Survey) -> Result<Survey, ClientError> {
        (**self).update(id, survey).await
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), ClientError> {
        (**self).delete_by_id(id).await
    }

    async fn delete_all(&self) -> Result<(), ClientError> {
        (**self).delete_all().await
    }
}
