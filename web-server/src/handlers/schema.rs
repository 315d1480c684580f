//! Feature schema and engine status handlers

use axum::{extract::State, Json};
use serde::Serialize;
use student_outcome_core::{EngineStatus, FieldSpec, LayoutInfo, FIELD_SCHEMA};

use crate::AppState;

#[derive(Serialize)]
pub struct SchemaResponse {
    pub layout: LayoutInfo,
    pub classes: Vec<String>,
    pub fields: &'static [FieldSpec],
}

/// Field order, domains and class names the model was built for
pub async fn schema(State(state): State<AppState>) -> Json<SchemaResponse> {
    Json(SchemaResponse {
        layout: LayoutInfo::current(),
        classes: state.predictor.classes().to_vec(),
        fields: &FIELD_SCHEMA,
    })
}

pub async fn status(State(state): State<AppState>) -> Json<EngineStatus> {
    Json(state.predictor.status())
}
