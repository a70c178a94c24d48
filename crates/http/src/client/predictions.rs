//! Performance prediction endpoints

use super::ApiGateway;
use super::error::ClientError;
use super::request::ApiRequest;
use aula_core::academic::{FilterParams, Prediction, PredictionRequest};
use aula_core::{ListResponse, RecordId};

impl ApiGateway {
    pub async fn list_predictions(
        &self,
        filters: &FilterParams,
    ) -> Result<ListResponse<Prediction>, ClientError> {
        self.execute(ApiRequest::get("/predicciones/").query(filters)?)
            .await
    }

    pub async fn get_prediction(&self, id: RecordId) -> Result<Prediction, ClientError> {
        self.execute(ApiRequest::get(format!("/predicciones/{id}/")))
            .await
    }

    /// Ask the server to compute a fresh prediction
    pub async fn generate_prediction(
        &self,
        request: &PredictionRequest,
    ) -> Result<Prediction, ClientError> {
        self.execute(ApiRequest::post("/predicciones/generar_prediccion_ml/").json(request)?)
            .await
    }

    pub async fn prediction_recommendations(
        &self,
        id: RecordId,
    ) -> Result<Vec<String>, ClientError> {
        self.execute(ApiRequest::get(format!("/predicciones/{id}/recomendaciones/")))
            .await
    }
}
