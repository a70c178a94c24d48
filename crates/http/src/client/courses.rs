//! Course endpoints

use super::ApiGateway;
use super::error::ClientError;
use super::request::ApiRequest;
use aula_core::academic::{Course, CourseDraft};
use aula_core::{ListResponse, RecordId};

impl ApiGateway {
    pub async fn list_courses(&self) -> Result<ListResponse<Course>, ClientError> {
        self.execute(ApiRequest::get("/cursos/")).await
    }

    pub async fn get_course(&self, id: RecordId) -> Result<Course, ClientError> {
        self.execute(ApiRequest::get(format!("/cursos/{id}/")))
            .await
    }

    pub async fn create_course(&self, draft: &CourseDraft) -> Result<Course, ClientError> {
        self.execute(ApiRequest::post("/cursos/").json(draft)?)
            .await
    }

    pub async fn update_course(
        &self,
        id: RecordId,
        draft: &CourseDraft,
    ) -> Result<Course, ClientError> {
        self.execute(ApiRequest::put(format!("/cursos/{id}/")).json(draft)?)
            .await
    }

    pub async fn delete_course(&self, id: RecordId) -> Result<(), ClientError> {
        self.execute_empty(ApiRequest::delete(format!("/cursos/{id}/")))
            .await
    }
}
