//! Class participation endpoints

use super::ApiGateway;
use super::error::ClientError;
use super::request::ApiRequest;
use aula_core::academic::{Participation, ParticipationDraft, ParticipationFilters};
use aula_core::{ListResponse, RecordId};

impl ApiGateway {
    pub async fn list_participations(
        &self,
        filters: &ParticipationFilters,
    ) -> Result<ListResponse<Participation>, ClientError> {
        self.execute(ApiRequest::get("/participaciones/").query(filters)?)
            .await
    }

    pub async fn get_participation(&self, id: RecordId) -> Result<Participation, ClientError> {
        self.execute(ApiRequest::get(format!("/participaciones/{id}/")))
            .await
    }

    pub async fn record_participation(
        &self,
        draft: &ParticipationDraft,
    ) -> Result<Participation, ClientError> {
        self.execute(ApiRequest::post("/participaciones/").json(draft)?)
            .await
    }

    pub async fn update_participation(
        &self,
        id: RecordId,
        draft: &ParticipationDraft,
    ) -> Result<Participation, ClientError> {
        self.execute(ApiRequest::put(format!("/participaciones/{id}/")).json(draft)?)
            .await
    }

    pub async fn delete_participation(&self, id: RecordId) -> Result<(), ClientError> {
        self.execute_empty(ApiRequest::delete(format!("/participaciones/{id}/")))
            .await
    }

    pub async fn participation_statistics(&self) -> Result<serde_json::Value, ClientError> {
        self.execute(ApiRequest::get("/participaciones/estadisticas/"))
            .await
    }
}
