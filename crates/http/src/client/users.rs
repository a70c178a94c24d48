//! User and student directory

use super::ApiGateway;
use super::error::ClientError;
use super::request::ApiRequest;
use aula_core::academic::{Student, UserFilters};
use aula_core::{ListResponse, RecordId, User, UserDraft};

impl ApiGateway {
    pub async fn list_users(
        &self,
        filters: &UserFilters,
    ) -> Result<ListResponse<User>, ClientError> {
        self.execute(ApiRequest::get("/usuarios/lista/").query(filters)?)
            .await
    }

    /// Students, optionally restricted to one course
    pub async fn list_students(
        &self,
        course: Option<RecordId>,
    ) -> Result<ListResponse<Student>, ClientError> {
        let mut request = ApiRequest::get("/usuarios/estudiantes/");
        if let Some(course) = course {
            request = request.query_pair("curso", course);
        }
        self.execute(request).await
    }

    pub async fn get_user(&self, id: RecordId) -> Result<User, ClientError> {
        self.execute(ApiRequest::get(format!("/usuarios/{id}/")))
            .await
    }

    /// Students enrolled in the current teacher's subjects
    pub async fn list_teacher_students(&self) -> Result<ListResponse<Student>, ClientError> {
        self.execute(ApiRequest::get("/usuarios/estudiantes-profesor/"))
            .await
    }

    pub async fn create_user(&self, draft: &UserDraft) -> Result<User, ClientError> {
        self.execute(ApiRequest::post("/usuarios/registro/").json(draft)?)
            .await
    }

    pub async fn delete_user(&self, id: RecordId) -> Result<(), ClientError> {
        self.execute_empty(ApiRequest::delete(format!("/usuarios/{id}/")))
            .await
    }
}
