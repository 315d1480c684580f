//! JSON prediction handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use student_outcome_core::StudentRecord;
use uuid::Uuid;

use crate::{AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub id: Uuid,
    pub label: String,
    pub class_index: usize,
    pub probabilities: Vec<f32>,
    pub inference_time_us: u64,
    /// "Predicted Class: <label>"
    pub message: String,
}

/// Classify one student record
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<StudentRecord>, JsonRejection>,
) -> AppResult<Json<PredictResponse>> {
    let Json(record) = payload?;
    record.check()?;

    let id = Uuid::new_v4();
    let prediction = state.predictor.predict(&record)?;

    tracing::debug!(
        %id,
        label = %prediction.label,
        latency_us = prediction.inference_time_us,
        "Prediction served"
    );

    Ok(Json(PredictResponse {
        id,
        message: prediction.to_string(),
        label: prediction.label,
        class_index: prediction.class_index,
        probabilities: prediction.probabilities,
        inference_time_us: prediction.inference_time_us,
    }))
}
