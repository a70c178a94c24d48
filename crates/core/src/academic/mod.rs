//! Academic records exchanged with the backend.
//!
//! Field names on the wire follow the backend's serializers; the Rust names
//! are the English equivalents.

pub mod filters;
pub mod reports;
pub mod score;

use crate::types::{RecordId, Role};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub use filters::{FilterParams, ParticipationFilters, UserFilters};
pub use reports::{
    DashboardStats, PerformanceComparison, StudentDashboard, SubjectStatistics, TermReport,
};

/// School term a grading period belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    #[serde(rename = "PRIMERO")]
    First,
    #[serde(rename = "SEGUNDO")]
    Second,
    #[serde(rename = "TERCERO")]
    Third,
}

/// Short account summary embedded in other records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSummary {
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: RecordId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "creditos", default)]
    pub credits: u32,
    #[serde(rename = "profesor", default)]
    pub teacher: Option<RecordId>,
    #[serde(
        rename = "profesor_detail",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub teacher_detail: Option<PersonSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectDraft {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "creditos")]
    pub credits: u32,
    #[serde(rename = "profesor")]
    pub teacher: RecordId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: RecordId,
    #[serde(rename = "nombre")]
    pub name: String,
    /// `PRIMARIA` or `SECUNDARIA`
    #[serde(rename = "nivel")]
    pub level: String,
    #[serde(rename = "materias", default)]
    pub subjects: Vec<RecordId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseDraft {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "nivel")]
    pub level: String,
    #[serde(rename = "materias")]
    pub subjects: Vec<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: RecordId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(rename = "curso", default)]
    pub course: Option<RecordId>,
    #[serde(rename = "curso_detail", default, skip_serializing_if = "Option::is_none")]
    pub course_detail: Option<Course>,
}

impl Student {
    pub fn full_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// Grading period within an academic year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub id: RecordId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "trimestre")]
    pub term: Term,
    #[serde(rename = "trimestre_display", default, skip_serializing_if = "Option::is_none")]
    pub term_label: Option<String>,
    /// Formatted as `2024-2025`
    #[serde(rename = "año_academico")]
    pub academic_year: String,
    #[serde(rename = "fecha_inicio")]
    pub starts_on: NaiveDate,
    #[serde(rename = "fecha_fin")]
    pub ends_on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodDraft {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "trimestre")]
    pub term: Term,
    #[serde(rename = "año_academico")]
    pub academic_year: String,
    #[serde(rename = "fecha_inicio")]
    pub starts_on: NaiveDate,
    #[serde(rename = "fecha_fin")]
    pub ends_on: NaiveDate,
}

/// Grade for one student, subject and period, split into the four
/// evaluation dimensions plus self-assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub id: RecordId,
    #[serde(rename = "estudiante")]
    pub student: RecordId,
    #[serde(rename = "materia")]
    pub subject: RecordId,
    #[serde(rename = "periodo")]
    pub period: RecordId,
    #[serde(rename = "estudiante_detail", default, skip_serializing_if = "Option::is_none")]
    pub student_detail: Option<Student>,
    #[serde(rename = "materia_detail", default, skip_serializing_if = "Option::is_none")]
    pub subject_detail: Option<Subject>,
    #[serde(rename = "periodo_detail", default, skip_serializing_if = "Option::is_none")]
    pub period_detail: Option<Period>,
    #[serde(rename = "ser_puntaje", default, deserialize_with = "score::score")]
    pub being: f64,
    #[serde(rename = "saber_puntaje", default, deserialize_with = "score::score")]
    pub knowing: f64,
    #[serde(rename = "hacer_puntaje", default, deserialize_with = "score::score")]
    pub doing: f64,
    #[serde(rename = "decidir_puntaje", default, deserialize_with = "score::score")]
    pub deciding: f64,
    #[serde(rename = "autoevaluacion_ser", default, deserialize_with = "score::score")]
    pub self_assessment_being: f64,
    #[serde(rename = "autoevaluacion_decidir", default, deserialize_with = "score::score")]
    pub self_assessment_deciding: f64,
    #[serde(rename = "ser_total", default, deserialize_with = "score::optional_score")]
    pub being_total: Option<f64>,
    #[serde(rename = "decidir_total", default, deserialize_with = "score::optional_score")]
    pub deciding_total: Option<f64>,
    #[serde(rename = "nota_total", default, deserialize_with = "score::optional_score")]
    pub total: Option<f64>,
    #[serde(rename = "aprobado", default)]
    pub passed: Option<bool>,
    #[serde(rename = "fecha_registro", default)]
    pub recorded_at: Option<DateTime<Utc>>,
    #[serde(rename = "ultima_modificacion", default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "comentario", default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeDraft {
    #[serde(rename = "estudiante")]
    pub student: RecordId,
    #[serde(rename = "materia")]
    pub subject: RecordId,
    #[serde(rename = "periodo")]
    pub period: RecordId,
    #[serde(rename = "ser_puntaje")]
    pub being: f64,
    #[serde(rename = "saber_puntaje")]
    pub knowing: f64,
    #[serde(rename = "hacer_puntaje")]
    pub doing: f64,
    #[serde(rename = "decidir_puntaje")]
    pub deciding: f64,
    #[serde(rename = "autoevaluacion_ser")]
    pub self_assessment_being: f64,
    #[serde(rename = "autoevaluacion_decidir")]
    pub self_assessment_deciding: f64,
    #[serde(rename = "comentario", skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    pub id: RecordId,
    #[serde(rename = "estudiante")]
    pub student: RecordId,
    #[serde(rename = "materia")]
    pub subject: RecordId,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "presente")]
    pub present: bool,
    #[serde(rename = "justificacion", default, skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceDraft {
    #[serde(rename = "estudiante")]
    pub student: RecordId,
    #[serde(rename = "materia")]
    pub subject: RecordId,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "presente")]
    pub present: bool,
    #[serde(rename = "justificacion", skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participation {
    pub id: RecordId,
    #[serde(rename = "estudiante")]
    pub student: RecordId,
    #[serde(rename = "materia")]
    pub subject: RecordId,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    /// `VOLUNTARIA`, `SOLICITADA`, `EJERCICIO`, `PRESENTACION` or `DEBATE`
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// 1 to 10
    #[serde(rename = "valor")]
    pub value: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipationDraft {
    #[serde(rename = "estudiante")]
    pub student: RecordId,
    #[serde(rename = "materia")]
    pub subject: RecordId,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "valor")]
    pub value: u8,
}

/// Server-side performance prediction for a student in a subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub id: RecordId,
    #[serde(rename = "estudiante")]
    pub student: RecordId,
    #[serde(rename = "materia")]
    pub subject: RecordId,
    #[serde(rename = "promedio_notas", default, deserialize_with = "score::score")]
    pub grade_average: f64,
    #[serde(rename = "porcentaje_asistencia", default, deserialize_with = "score::score")]
    pub attendance_rate: f64,
    #[serde(rename = "promedio_participaciones", default, deserialize_with = "score::score")]
    pub participation_average: f64,
    #[serde(rename = "valor_numerico", default, deserialize_with = "score::score")]
    pub predicted_value: f64,
    #[serde(rename = "nivel_rendimiento")]
    pub performance_level: String,
    #[serde(rename = "fecha_prediccion")]
    pub predicted_at: String,
    #[serde(rename = "confianza", default, deserialize_with = "score::score")]
    pub confidence: f64,
    #[serde(rename = "recomendaciones", default)]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PredictionRequest {
    #[serde(rename = "estudiante")]
    pub student: RecordId,
    #[serde(rename = "materia")]
    pub subject: RecordId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: RecordId,
    #[serde(rename = "usuario")]
    pub user: RecordId,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "mensaje")]
    pub message: String,
    /// `INFO`, `ALERTA`, `PREDICCION`, `RECORDATORIO` or `SISTEMA`
    #[serde(rename = "tipo")]
    pub kind: String,
    /// `NO_LEIDA`, `LEIDA` or `ARCHIVADA`
    #[serde(rename = "estado")]
    pub state: String,
    #[serde(rename = "fecha_creacion")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "fecha_lectura", default)]
    pub read_at: Option<DateTime<Utc>>,
    #[serde(rename = "url_accion", default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
}

impl Notification {
    pub fn is_unread(&self) -> bool {
        self.state == "NO_LEIDA"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationDraft {
    #[serde(rename = "usuario")]
    pub user: RecordId,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "mensaje")]
    pub message: String,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "estado")]
    pub state: String,
    #[serde(rename = "url_accion", skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_grade_accepts_decimal_strings() {
        let grade: Grade = serde_json::from_value(json!({
            "id": 1,
            "estudiante": 10,
            "materia": 3,
            "periodo": 2,
            "ser_puntaje": "8.50",
            "saber_puntaje": 30,
            "hacer_puntaje": "27.25",
            "decidir_puntaje": null,
            "autoevaluacion_ser": "4",
            "ser_total": null,
            "nota_total": "70.75",
            "aprobado": true,
            "fecha_registro": "2024-05-02T14:30:00Z"
        }))
        .unwrap();

        assert!((grade.being - 8.5).abs() < f64::EPSILON);
        assert!((grade.knowing - 30.0).abs() < f64::EPSILON);
        assert!(grade.deciding.abs() < f64::EPSILON);
        assert!(grade.self_assessment_deciding.abs() < f64::EPSILON);
        assert_eq!(grade.being_total, None);
        assert_eq!(grade.total, Some(70.75));
        assert_eq!(grade.passed, Some(true));
        assert!(grade.recorded_at.is_some());
    }

    #[test]
    fn test_period_term_and_year() {
        let period: Period = serde_json::from_value(json!({
            "id": 4,
            "nombre": "Primer trimestre",
            "trimestre": "PRIMERO",
            "año_academico": "2024-2025",
            "fecha_inicio": "2024-02-01",
            "fecha_fin": "2024-05-10"
        }))
        .unwrap();

        assert_eq!(period.term, Term::First);
        assert_eq!(period.academic_year, "2024-2025");
        assert!(period.starts_on < period.ends_on);
    }

    #[test]
    fn test_attendance_draft_uses_backend_names() {
        let draft = AttendanceDraft {
            student: 10,
            subject: 3,
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            present: false,
            justification: None,
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            value,
            json!({"estudiante": 10, "materia": 3, "fecha": "2024-03-04", "presente": false})
        );
    }
}
