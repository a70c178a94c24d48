//! Query filters accepted by the collection endpoints

use crate::types::{RecordId, Role};
use chrono::NaiveDate;
use serde::Serialize;

/// Common list filters; unset fields are left out of the query string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterParams {
    #[serde(rename = "estudiante", skip_serializing_if = "Option::is_none")]
    pub student: Option<RecordId>,
    #[serde(rename = "materia", skip_serializing_if = "Option::is_none")]
    pub subject: Option<RecordId>,
    #[serde(rename = "curso", skip_serializing_if = "Option::is_none")]
    pub course: Option<RecordId>,
    #[serde(rename = "fecha_inicio", skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(rename = "fecha_fin", skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    #[serde(rename = "periodo", skip_serializing_if = "Option::is_none")]
    pub period: Option<RecordId>,
    #[serde(rename = "trimestre", skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(rename = "anio_academico", skip_serializing_if = "Option::is_none")]
    pub academic_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<String>,
}

impl FilterParams {
    pub fn for_student(student: RecordId) -> Self {
        Self {
            student: Some(student),
            ..Self::default()
        }
    }

    pub fn for_subject(subject: RecordId) -> Self {
        Self {
            subject: Some(subject),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParticipationFilters {
    #[serde(rename = "estudiante", skip_serializing_if = "Option::is_none")]
    pub student: Option<RecordId>,
    #[serde(rename = "materia", skip_serializing_if = "Option::is_none")]
    pub subject: Option<RecordId>,
    #[serde(rename = "curso", skip_serializing_if = "Option::is_none")]
    pub course: Option<RecordId>,
    #[serde(rename = "fecha", skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "fecha_inicio", skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(rename = "fecha_fin", skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    #[serde(rename = "tipo", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserFilters {
    #[serde(rename = "rol", skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(rename = "curso", skip_serializing_if = "Option::is_none")]
    pub course: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}
