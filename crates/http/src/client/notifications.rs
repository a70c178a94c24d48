//! Notification endpoints

use super::ApiGateway;
use super::error::ClientError;
use super::request::ApiRequest;
use aula_core::academic::{Notification, NotificationDraft};
use aula_core::{ListResponse, RecordId};

impl ApiGateway {
    pub async fn list_notifications(&self) -> Result<ListResponse<Notification>, ClientError> {
        self.execute(ApiRequest::get("/notificaciones/")).await
    }

    pub async fn get_notification(&self, id: RecordId) -> Result<Notification, ClientError> {
        self.execute(ApiRequest::get(format!("/notificaciones/{id}/")))
            .await
    }

    pub async fn create_notification(
        &self,
        draft: &NotificationDraft,
    ) -> Result<Notification, ClientError> {
        self.execute(ApiRequest::post("/notificaciones/").json(draft)?)
            .await
    }

    pub async fn update_notification(
        &self,
        id: RecordId,
        draft: &NotificationDraft,
    ) -> Result<Notification, ClientError> {
        self.execute(ApiRequest::put(format!("/notificaciones/{id}/")).json(draft)?)
            .await
    }

    pub async fn mark_notification_read(&self, id: RecordId) -> Result<Notification, ClientError> {
        let request = ApiRequest::post(format!("/notificaciones/{id}/marcar_como_leida/"))
            .json(&serde_json::json!({}))?;
        self.execute(request).await
    }

    pub async fn delete_notification(&self, id: RecordId) -> Result<(), ClientError> {
        self.execute_empty(ApiRequest::delete(format!("/notificaciones/{id}/")))
            .await
    }
}
