//! Subject endpoints

use super::ApiGateway;
use super::error::ClientError;
use super::request::ApiRequest;
use aula_core::academic::{Subject, SubjectDraft};
use aula_core::{ListResponse, RecordId};

impl ApiGateway {
    pub async fn list_subjects(&self) -> Result<ListResponse<Subject>, ClientError> {
        self.execute(ApiRequest::get("/materias/")).await
    }

    /// Subjects taught by the current teacher
    pub async fn list_my_subjects(&self) -> Result<ListResponse<Subject>, ClientError> {
        self.execute(ApiRequest::get("/materias/mis-materias/"))
            .await
    }

    pub async fn get_subject(&self, id: RecordId) -> Result<Subject, ClientError> {
        self.execute(ApiRequest::get(format!("/materias/{id}/")))
            .await
    }

    pub async fn create_subject(&self, draft: &SubjectDraft) -> Result<Subject, ClientError> {
        self.execute(ApiRequest::post("/materias/").json(draft)?)
            .await
    }

    pub async fn update_subject(
        &self,
        id: RecordId,
        draft: &SubjectDraft,
    ) -> Result<Subject, ClientError> {
        self.execute(ApiRequest::put(format!("/materias/{id}/")).json(draft)?)
            .await
    }

    pub async fn delete_subject(&self, id: RecordId) -> Result<(), ClientError> {
        self.execute_empty(ApiRequest::delete(format!("/materias/{id}/")))
            .await
    }
}
