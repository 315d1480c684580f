//! Form page handlers

use std::collections::HashMap;

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::Html,
    Form,
};
use student_outcome_core::{field_spec, FeatureVector, RecordError, StudentRecord, FIELD_SCHEMA};

use crate::views::{self, Outcome};
use crate::AppState;

/// Empty form with default values
pub async fn show() -> Html<String> {
    Html(views::form_page(&FeatureVector::defaults(), None))
}

/// Classify the submitted form and re-render it with the result line.
///
/// The body is read as raw pairs so a rejected submission comes back with
/// everything the user typed, not the defaults.
pub async fn submit(
    State(state): State<AppState>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> (StatusCode, Html<String>) {
    let pairs = match form {
        Ok(Form(pairs)) => pairs,
        Err(rejection) => return rejected(&FeatureVector::defaults(), &rejection.body_text()),
    };

    let (values, problems) = read_fields(&pairs);
    if !problems.is_empty() {
        return rejected(&values, &problems.join("; "));
    }

    let record = match StudentRecord::from_vector(&values).and_then(|record| record.check().map(|_| record)) {
        Ok(record) => record,
        Err(e) => return rejected(&values, &describe(&e)),
    };

    match state.predictor.predict(&record) {
        Ok(prediction) => {
            tracing::info!("{}", prediction);
            let page = views::form_page(&values, Some(Outcome::Predicted(&prediction)));
            (StatusCode::OK, Html(page))
        }
        Err(e) => {
            let message = e.to_string();
            tracing::error!("Prediction failed: {}", message);
            let page = views::form_page(&values, Some(Outcome::Failed(&message)));
            (StatusCode::INTERNAL_SERVER_ERROR, Html(page))
        }
    }
}

/// Parse every schema field from the submitted pairs.
/// Missing or non-numeric fields keep their default slot value and are reported.
fn read_fields(pairs: &[(String, String)]) -> (FeatureVector, Vec<String>) {
    let submitted: HashMap<&str, &str> = pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    let mut values = FeatureVector::defaults();
    let mut problems = Vec::new();

    for spec in FIELD_SCHEMA.iter() {
        match submitted.get(spec.name).map(|raw| raw.trim()) {
            None | Some("") => problems.push(format!("{} is missing", spec.label)),
            Some(raw) => match raw.parse::<f32>() {
                Ok(value) => {
                    values.set(spec.name, value);
                }
                Err(_) => problems.push(format!("{}: '{}' is not a number", spec.label, raw)),
            },
        }
    }

    (values, problems)
}

fn describe(err: &RecordError) -> String {
    match err {
        RecordError::Domain(domain) => match field_spec(domain.field) {
            Some(spec) => format!("{}: {}", spec.label, domain),
            None => domain.to_string(),
        },
        RecordError::Invalid(_) => err.to_string(),
    }
}

fn rejected(values: &FeatureVector, message: &str) -> (StatusCode, Html<String>) {
    tracing::warn!("Form rejected: {}", message);
    let page = views::form_page(values, Some(Outcome::Rejected(message)));
    (StatusCode::UNPROCESSABLE_ENTITY, Html(page))
}
