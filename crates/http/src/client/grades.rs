//! Grade endpoints and grade-based reports

use super::ApiGateway;
use super::error::ClientError;
use super::request::ApiRequest;
use aula_core::academic::{FilterParams, Grade, GradeDraft, SubjectStatistics, TermReport};
use aula_core::{ListResponse, RecordId};

const GRADES_PATH: &str = "/notas/calificaciones/";

impl ApiGateway {
    pub async fn list_grades(
        &self,
        filters: &FilterParams,
    ) -> Result<ListResponse<Grade>, ClientError> {
        self.execute(ApiRequest::get(GRADES_PATH).query(filters)?)
            .await
    }

    pub async fn get_grade(&self, id: RecordId) -> Result<Grade, ClientError> {
        self.execute(ApiRequest::get(format!("{GRADES_PATH}{id}/")))
            .await
    }

    pub async fn create_grade(&self, draft: &GradeDraft) -> Result<Grade, ClientError> {
        self.execute(ApiRequest::post(GRADES_PATH).json(draft)?)
            .await
    }

    pub async fn update_grade(
        &self,
        id: RecordId,
        draft: &GradeDraft,
    ) -> Result<Grade, ClientError> {
        self.execute(ApiRequest::put(format!("{GRADES_PATH}{id}/")).json(draft)?)
            .await
    }

    pub async fn delete_grade(&self, id: RecordId) -> Result<(), ClientError> {
        self.execute_empty(ApiRequest::delete(format!("{GRADES_PATH}{id}/")))
            .await
    }

    /// Grade distribution for one subject, optionally limited to a period
    pub async fn subject_statistics(
        &self,
        subject: RecordId,
        period: Option<RecordId>,
    ) -> Result<SubjectStatistics, ClientError> {
        let mut request = ApiRequest::get(format!("{GRADES_PATH}estadisticas_materia/"))
            .query_pair("materia", subject);
        if let Some(period) = period {
            request = request.query_pair("periodo", period);
        }
        self.execute(request).await
    }

    /// Per-student results of a course for one period
    pub async fn term_report(
        &self,
        course: RecordId,
        period: RecordId,
    ) -> Result<TermReport, ClientError> {
        let request = ApiRequest::get(format!("{GRADES_PATH}reporte_trimestral/"))
            .query_pair("curso", course)
            .query_pair("periodo", period);
        self.execute(request).await
    }
}
