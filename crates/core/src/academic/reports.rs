//! Aggregated statistics computed by the backend and displayed as-is

use super::score;
use crate::types::RecordId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionDistribution {
    #[serde(rename = "nivel_rendimiento")]
    pub performance_level: String,
    #[serde(rename = "cantidad")]
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectStats {
    pub id: RecordId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "total_estudiantes", default)]
    pub students: u32,
    #[serde(rename = "promedio_notas", default, deserialize_with = "score::score")]
    pub grade_average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermStats {
    #[serde(rename = "trimestre")]
    pub term: String,
    #[serde(rename = "promedio", default, deserialize_with = "score::score")]
    pub average: f64,
    #[serde(rename = "estudiantes", default)]
    pub students: u32,
}

/// Institution-wide overview shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(rename = "total_estudiantes", default)]
    pub total_students: u32,
    #[serde(rename = "total_materias", default)]
    pub total_subjects: u32,
    #[serde(rename = "promedio_general", default, deserialize_with = "score::score")]
    pub overall_average: f64,
    #[serde(rename = "asistencia_promedio", default, deserialize_with = "score::score")]
    pub attendance_average: f64,
    #[serde(rename = "estudiantes_riesgo", default)]
    pub students_at_risk: u32,
    #[serde(rename = "materias_criticas", default)]
    pub critical_subjects: Vec<String>,
    #[serde(rename = "tendencia_notas", default)]
    pub grade_trend: Vec<f64>,
    #[serde(rename = "predicciones_distribucion", default)]
    pub prediction_distribution: Vec<PredictionDistribution>,
    #[serde(rename = "materias_stats", default)]
    pub subject_stats: Vec<SubjectStats>,
    #[serde(rename = "trimestres_stats", default)]
    pub term_stats: Vec<TermStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStudent {
    pub id: RecordId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "nombre_completo", default)]
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeComponents {
    #[serde(rename = "ser", default, deserialize_with = "score::score")]
    pub being: f64,
    #[serde(rename = "saber", default, deserialize_with = "score::score")]
    pub knowing: f64,
    #[serde(rename = "hacer", default, deserialize_with = "score::score")]
    pub doing: f64,
    #[serde(rename = "decidir", default, deserialize_with = "score::score")]
    pub deciding: f64,
    #[serde(rename = "autoevaluacion", default, deserialize_with = "score::score")]
    pub self_assessment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermGrade {
    #[serde(rename = "trimestre")]
    pub term: String,
    #[serde(rename = "año", default)]
    pub year: String,
    #[serde(rename = "nota_total", default, deserialize_with = "score::score")]
    pub total: f64,
    #[serde(rename = "componentes")]
    pub components: GradeComponents,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectGrades {
    pub id: RecordId,
    #[serde(rename = "nombre")]
    pub name: String,
    /// Keyed by term identifier
    #[serde(rename = "trimestres", default)]
    pub terms: BTreeMap<String, TermGrade>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectAttendance {
    #[serde(rename = "materia_id")]
    pub subject_id: RecordId,
    #[serde(rename = "materia_nombre")]
    pub subject_name: String,
    #[serde(rename = "porcentaje", default, deserialize_with = "score::score")]
    pub rate: f64,
    #[serde(rename = "presentes", default)]
    pub present: u32,
    #[serde(default)]
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectParticipation {
    #[serde(rename = "materia_id")]
    pub subject_id: RecordId,
    #[serde(rename = "materia_nombre")]
    pub subject_name: String,
    #[serde(default)]
    pub total: u32,
    #[serde(rename = "promedio_valor", default, deserialize_with = "score::score")]
    pub average_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionInputs {
    #[serde(rename = "promedio_notas", default, deserialize_with = "score::score")]
    pub grade_average: f64,
    #[serde(rename = "porcentaje_asistencia", default, deserialize_with = "score::score")]
    pub attendance_rate: f64,
    #[serde(rename = "promedio_participaciones", default, deserialize_with = "score::score")]
    pub participation_average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectPrediction {
    pub id: RecordId,
    #[serde(rename = "materia_id")]
    pub subject_id: RecordId,
    #[serde(rename = "materia_nombre")]
    pub subject_name: String,
    #[serde(rename = "fecha_prediccion")]
    pub predicted_at: String,
    #[serde(rename = "valor_numerico", default, deserialize_with = "score::score")]
    pub predicted_value: f64,
    #[serde(rename = "nivel_rendimiento")]
    pub performance_level: String,
    #[serde(rename = "probabilidad_aprobar", default, deserialize_with = "score::score")]
    pub pass_probability: f64,
    #[serde(rename = "variables")]
    pub inputs: PredictionInputs,
}

/// Everything a student's own dashboard shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentDashboard {
    #[serde(rename = "estudiante")]
    pub student: DashboardStudent,
    #[serde(rename = "notas", default)]
    pub grades: Vec<SubjectGrades>,
    #[serde(rename = "asistencias", default)]
    pub attendance: Vec<SubjectAttendance>,
    #[serde(rename = "participaciones", default)]
    pub participation: Vec<SubjectParticipation>,
    #[serde(rename = "predicciones", default)]
    pub predictions: Vec<SubjectPrediction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    #[serde(rename = "estudiante_id")]
    pub student_id: RecordId,
    #[serde(rename = "estudiante_nombre")]
    pub student_name: String,
    #[serde(rename = "materia_id")]
    pub subject_id: RecordId,
    #[serde(rename = "materia_nombre")]
    pub subject_name: String,
    #[serde(rename = "nota_predicha", default, deserialize_with = "score::score")]
    pub predicted: f64,
    #[serde(rename = "nota_real", default, deserialize_with = "score::score")]
    pub actual: f64,
    #[serde(rename = "diferencia", default, deserialize_with = "score::score")]
    pub difference: f64,
    #[serde(rename = "nivel_predicho")]
    pub predicted_level: String,
}

/// Predicted versus actual grades
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceComparison {
    #[serde(rename = "comparaciones", default)]
    pub comparisons: Vec<Comparison>,
    #[serde(rename = "precision_modelo", default, deserialize_with = "score::score")]
    pub model_accuracy: f64,
    #[serde(rename = "total_predicciones", default)]
    pub total_predictions: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionAverages {
    #[serde(rename = "ser", default, deserialize_with = "score::score")]
    pub being: f64,
    #[serde(rename = "saber", default, deserialize_with = "score::score")]
    pub knowing: f64,
    #[serde(rename = "hacer", default, deserialize_with = "score::score")]
    pub doing: f64,
    #[serde(rename = "decidir", default, deserialize_with = "score::score")]
    pub deciding: f64,
    #[serde(rename = "autoevaluacion_ser", default, deserialize_with = "score::score")]
    pub self_assessment_being: f64,
    #[serde(rename = "autoevaluacion_decidir", default, deserialize_with = "score::score")]
    pub self_assessment_deciding: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentResult {
    #[serde(rename = "estudiante_id")]
    pub student_id: RecordId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "ser", default, deserialize_with = "score::score")]
    pub being: f64,
    #[serde(rename = "saber", default, deserialize_with = "score::score")]
    pub knowing: f64,
    #[serde(rename = "hacer", default, deserialize_with = "score::score")]
    pub doing: f64,
    #[serde(rename = "decidir", default, deserialize_with = "score::score")]
    pub deciding: f64,
    #[serde(rename = "nota_total", default, deserialize_with = "score::score")]
    pub total: f64,
    #[serde(rename = "aprobado", default)]
    pub passed: bool,
}

/// Per-subject grade statistics for administrative users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectStatistics {
    #[serde(rename = "materia_id")]
    pub subject_id: RecordId,
    #[serde(rename = "materia_nombre")]
    pub subject_name: String,
    #[serde(rename = "periodo", default)]
    pub period: String,
    #[serde(rename = "promedios")]
    pub averages: DimensionAverages,
    #[serde(rename = "promedio_total", default, deserialize_with = "score::score")]
    pub overall_average: f64,
    #[serde(rename = "total_estudiantes", default)]
    pub total_students: u32,
    #[serde(rename = "aprobados", default)]
    pub passed: u32,
    #[serde(rename = "reprobados", default)]
    pub failed: u32,
    #[serde(rename = "porcentaje_aprobacion", default, deserialize_with = "score::score")]
    pub pass_rate: f64,
    #[serde(rename = "mejor_nota", default, deserialize_with = "score::score")]
    pub best: f64,
    #[serde(rename = "peor_nota", default, deserialize_with = "score::score")]
    pub worst: f64,
    #[serde(rename = "estudiantes", default)]
    pub students: Vec<StudentResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub id: RecordId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "trimestre")]
    pub term: String,
    #[serde(rename = "año_academico")]
    pub academic_year: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSummary {
    #[serde(rename = "promedio_general", default, deserialize_with = "score::score")]
    pub overall_average: f64,
    #[serde(rename = "total_materias", default)]
    pub total_subjects: u32,
    #[serde(rename = "materias_aprobadas", default)]
    pub subjects_passed: u32,
    #[serde(rename = "materias_reprobadas", default)]
    pub subjects_failed: u32,
    #[serde(rename = "porcentaje_aprobacion", default, deserialize_with = "score::score")]
    pub pass_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectResult {
    #[serde(rename = "materia_id")]
    pub subject_id: RecordId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "ser", default, deserialize_with = "score::score")]
    pub being: f64,
    #[serde(rename = "saber", default, deserialize_with = "score::score")]
    pub knowing: f64,
    #[serde(rename = "hacer", default, deserialize_with = "score::score")]
    pub doing: f64,
    #[serde(rename = "decidir", default, deserialize_with = "score::score")]
    pub deciding: f64,
    #[serde(rename = "nota_total", default, deserialize_with = "score::score")]
    pub total: f64,
    #[serde(rename = "aprobado", default)]
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentTermResult {
    #[serde(rename = "estudiante_id")]
    pub student_id: RecordId,
    #[serde(rename = "nombre")]
    pub name: String,
    pub username: String,
    #[serde(rename = "materias", default)]
    pub subjects: Vec<SubjectResult>,
    #[serde(rename = "promedio_general", default, deserialize_with = "score::score")]
    pub overall_average: f64,
    #[serde(rename = "aprobadas", default)]
    pub passed: u32,
    #[serde(rename = "reprobadas", default)]
    pub failed: u32,
    #[serde(rename = "total_materias", default)]
    pub total_subjects: u32,
}

/// End-of-term report for one course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermReport {
    #[serde(rename = "curso_id")]
    pub course_id: RecordId,
    #[serde(rename = "periodo")]
    pub period: ReportPeriod,
    #[serde(rename = "estadisticas_curso")]
    pub course_summary: CourseSummary,
    #[serde(rename = "estudiantes", default)]
    pub students: Vec<StudentTermResult>,
    #[serde(rename = "total_estudiantes", default)]
    pub total_students: u32,
}
