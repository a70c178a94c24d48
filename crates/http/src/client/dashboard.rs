//! Dashboard summaries

use super::ApiGateway;
use super::error::ClientError;
use super::request::ApiRequest;
use aula_core::RecordId;
use aula_core::academic::{DashboardStats, PerformanceComparison, StudentDashboard};

impl ApiGateway {
    pub async fn dashboard_general(&self) -> Result<DashboardStats, ClientError> {
        self.execute(ApiRequest::get("/dashboard/general/")).await
    }

    pub async fn dashboard_statistics(&self) -> Result<DashboardStats, ClientError> {
        self.execute(ApiRequest::get("/dashboard/estadisticas/"))
            .await
    }

    /// Dashboard of `student`, or of the current user when `None`
    pub async fn student_dashboard(
        &self,
        student: Option<RecordId>,
    ) -> Result<StudentDashboard, ClientError> {
        let path = match student {
            Some(id) => format!("/dashboard/estudiante/{id}/"),
            None => "/dashboard/estudiante/".to_string(),
        };
        self.execute(ApiRequest::get(path)).await
    }

    pub async fn performance_comparison(
        &self,
        student: Option<RecordId>,
        subject: Option<RecordId>,
    ) -> Result<PerformanceComparison, ClientError> {
        let mut request = ApiRequest::get("/dashboard/comparativo/");
        if let Some(student) = student {
            request = request.query_pair("estudiante", student);
        }
        if let Some(subject) = subject {
            request = request.query_pair("materia", subject);
        }
        self.execute(request).await
    }
}
