//! Grading period endpoints

use super::ApiGateway;
use super::error::ClientError;
use super::request::ApiRequest;
use aula_core::academic::{Period, PeriodDraft};
use aula_core::{ListResponse, RecordId};

impl ApiGateway {
    pub async fn list_periods(&self) -> Result<ListResponse<Period>, ClientError> {
        self.execute(ApiRequest::get("/notas/periodos/")).await
    }

    pub async fn get_period(&self, id: RecordId) -> Result<Period, ClientError> {
        self.execute(ApiRequest::get(format!("/notas/periodos/{id}/")))
            .await
    }

    pub async fn create_period(&self, draft: &PeriodDraft) -> Result<Period, ClientError> {
        self.execute(ApiRequest::post("/notas/periodos/").json(draft)?)
            .await
    }

    pub async fn update_period(
        &self,
        id: RecordId,
        draft: &PeriodDraft,
    ) -> Result<Period, ClientError> {
        self.execute(ApiRequest::put(format!("/notas/periodos/{id}/")).json(draft)?)
            .await
    }

    pub async fn delete_period(&self, id: RecordId) -> Result<(), ClientError> {
        self.execute_empty(ApiRequest::delete(format!("/notas/periodos/{id}/")))
            .await
    }
}
