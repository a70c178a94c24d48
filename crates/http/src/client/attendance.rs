//! Attendance endpoints

use super::ApiGateway;
use super::error::ClientError;
use super::request::ApiRequest;
use aula_core::academic::{Attendance, AttendanceDraft, FilterParams};
use aula_core::{ListResponse, RecordId};
use serde::Serialize;

#[derive(Serialize)]
struct BulkAttendance<'a> {
    #[serde(rename = "asistencias")]
    records: &'a [AttendanceDraft],
}

impl ApiGateway {
    pub async fn list_attendance(
        &self,
        filters: &FilterParams,
    ) -> Result<ListResponse<Attendance>, ClientError> {
        self.execute(ApiRequest::get("/asistencias/").query(filters)?)
            .await
    }

    pub async fn get_attendance(&self, id: RecordId) -> Result<Attendance, ClientError> {
        self.execute(ApiRequest::get(format!("/asistencias/{id}/")))
            .await
    }

    pub async fn record_attendance(
        &self,
        draft: &AttendanceDraft,
    ) -> Result<Attendance, ClientError> {
        self.execute(ApiRequest::post("/asistencias/").json(draft)?)
            .await
    }

    /// Record a whole class in one call; the response shape is server-defined
    pub async fn record_attendance_bulk(
        &self,
        records: &[AttendanceDraft],
    ) -> Result<serde_json::Value, ClientError> {
        let request =
            ApiRequest::post("/asistencias/bulk_create/").json(&BulkAttendance { records })?;
        self.execute(request).await
    }

    pub async fn update_attendance(
        &self,
        id: RecordId,
        draft: &AttendanceDraft,
    ) -> Result<Attendance, ClientError> {
        self.execute(ApiRequest::put(format!("/asistencias/{id}/")).json(draft)?)
            .await
    }

    pub async fn delete_attendance(&self, id: RecordId) -> Result<(), ClientError> {
        self.execute_empty(ApiRequest::delete(format!("/asistencias/{id}/")))
            .await
    }

    pub async fn attendance_statistics(&self) -> Result<serde_json::Value, ClientError> {
        self.execute(ApiRequest::get("/asistencias/estadisticas/"))
            .await
    }
}
