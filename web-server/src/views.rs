//! HTML views - the prediction form
//!
//! Rendered from `FIELD_SCHEMA`, so every input carries the same domain
//! the record validation enforces.

use student_outcome_core::constants::APP_NAME;
use student_outcome_core::{FeatureVector, FieldDomain, FieldSpec, Prediction, FIELD_SCHEMA};

/// Enumerations up to this size render as radio buttons, larger ones as a drop-down
const MAX_RADIO_OPTIONS: usize = 7;

const STYLE: &str = "body{font-family:sans-serif;max-width:46rem;margin:2rem auto;padding:0 1rem}\
.field{margin:0 0 1rem;border:none;padding:0}\
.field legend,.field>label{font-weight:600;display:block;margin-bottom:.25rem}\
.field input[type=number],.field select{width:100%;padding:.3rem}\
.options label{margin-right:1rem;white-space:nowrap}\
.result{font-size:1.25rem;padding:.75rem;background:#e8f5e9}\
.error{padding:.75rem;background:#fdecea;color:#b71c1c}";

/// What to show under the form
pub enum Outcome<'a> {
    Predicted(&'a Prediction),
    Rejected(&'a str),
    Failed(&'a str),
}

/// Full page: form pre-filled with `values`, plus an optional outcome line
pub fn form_page(values: &FeatureVector, outcome: Option<Outcome<'_>>) -> String {
    let mut html = String::with_capacity(96 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n<style>{}</style>\n", escape(APP_NAME), STYLE));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{}</h1>\n", escape(APP_NAME)));

    match outcome {
        Some(Outcome::Predicted(prediction)) => {
            html.push_str(&format!("<p class=\"result\">{}</p>\n", escape(&prediction.to_string())));
        }
        Some(Outcome::Rejected(message)) => {
            html.push_str(&format!("<p class=\"error\">Invalid input: {}</p>\n", escape(message)));
        }
        Some(Outcome::Failed(message)) => {
            html.push_str(&format!("<p class=\"error\">Prediction failed: {}</p>\n", escape(message)));
        }
        None => {}
    }

    html.push_str("<form method=\"post\" action=\"/predict\">\n");
    for (spec, value) in FIELD_SCHEMA.iter().zip(values.as_slice()) {
        render_field(&mut html, spec, *value);
    }
    html.push_str("<button type=\"submit\">Predict</button>\n</form>\n</body>\n</html>\n");

    html
}

fn render_field(html: &mut String, spec: &FieldSpec, value: f32) {
    match spec.domain {
        FieldDomain::Category { .. } | FieldDomain::Flag { .. } => {
            let options = spec.domain.options();
            if options.len() <= MAX_RADIO_OPTIONS {
                render_radio(html, spec, &options, value);
            } else {
                render_select(html, spec, &options, value);
            }
        }
        FieldDomain::Integer { min, max } => {
            render_number(html, spec, &format!("{}", value as i64), "1", min.map(|m| m.to_string()), max.map(|m| m.to_string()));
        }
        FieldDomain::Real { min, max } => {
            render_number(html, spec, &value.to_string(), "any", min.map(|m| m.to_string()), max.map(|m| m.to_string()));
        }
    }
}

fn render_radio(html: &mut String, spec: &FieldSpec, options: &[(u32, &str)], value: f32) {
    html.push_str(&format!(
        "<fieldset class=\"field\">\n<legend>{}</legend>\n<div class=\"options\">\n",
        escape(spec.label)
    ));
    for (code, label) in options {
        let checked = if *code as f32 == value { " checked" } else { "" };
        html.push_str(&format!(
            "<label><input type=\"radio\" name=\"{}\" value=\"{}\"{}> {}</label>\n",
            spec.name,
            code,
            checked,
            escape(label)
        ));
    }
    html.push_str("</div>\n</fieldset>\n");
}

fn render_select(html: &mut String, spec: &FieldSpec, options: &[(u32, &str)], value: f32) {
    html.push_str(&format!(
        "<div class=\"field\">\n<label for=\"{name}\">{}</label>\n<select id=\"{name}\" name=\"{name}\">\n",
        escape(spec.label),
        name = spec.name
    ));
    for (code, label) in options {
        let selected = if *code as f32 == value { " selected" } else { "" };
        html.push_str(&format!("<option value=\"{}\"{}>{}</option>\n", code, selected, escape(label)));
    }
    html.push_str("</select>\n</div>\n");
}

fn render_number(
    html: &mut String,
    spec: &FieldSpec,
    value: &str,
    step: &str,
    min: Option<String>,
    max: Option<String>,
) {
    let mut bounds = String::new();
    if let Some(min) = min {
        bounds.push_str(&format!(" min=\"{}\"", min));
    }
    if let Some(max) = max {
        bounds.push_str(&format!(" max=\"{}\"", max));
    }

    html.push_str(&format!(
        "<div class=\"field\">\n<label for=\"{name}\">{}</label>\n\
         <input type=\"number\" id=\"{name}\" name=\"{name}\" value=\"{}\" step=\"{}\"{} required>\n</div>\n",
        escape(spec.label),
        value,
        step,
        bounds,
        name = spec.name
    ));
}

/// Minimal HTML escaping for text and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use student_outcome_core::{StudentRecord, FEATURE_LAYOUT};

    #[test]
    fn test_form_has_every_field() {
        let html = form_page(&FeatureVector::defaults(), None);
        for name in FEATURE_LAYOUT {
            assert!(html.contains(&format!("name=\"{}\"", name)), "missing input {}", name);
        }
        assert!(!html.contains("class=\"result\""));
    }

    #[test]
    fn test_widget_constraints() {
        let html = form_page(&FeatureVector::defaults(), None);
        assert!(html.contains("name=\"age_at_enrollment\" value=\"20\" step=\"1\" min=\"18\" max=\"100\""));
        assert!(html.contains("name=\"curricular_units_1st_sem_grade\" value=\"0\" step=\"any\" min=\"0\" max=\"20\""));
        assert!(html.contains("name=\"gdp\" value=\"0\" step=\"any\" required"));
        // small enumerations as radios, large ones as drop-downs
        assert!(html.contains("<input type=\"radio\" name=\"marital_status\" value=\"1\" checked> Single"));
        assert!(html.contains("<select id=\"mothers_occupation\" name=\"mothers_occupation\">"));
        assert!(html.contains("<input type=\"radio\" name=\"gender\" value=\"0\" checked> Female"));
    }

    #[test]
    fn test_form_keeps_submitted_values() {
        let record = StudentRecord { course: 12, gender: 1, age_at_enrollment: 44, ..Default::default() };
        let html = form_page(&record.to_vector(), None);
        assert!(html.contains("<option value=\"12\" selected>Nursing</option>"));
        assert!(html.contains("name=\"gender\" value=\"1\" checked> Male"));
        assert!(html.contains("name=\"age_at_enrollment\" value=\"44\""));
    }

    #[test]
    fn test_outcome_lines() {
        let prediction = Prediction {
            label: "Graduate".to_string(),
            class_index: 1,
            probabilities: vec![0.1, 0.8, 0.1],
            inference_time_us: 12,
        };
        let html = form_page(&FeatureVector::defaults(), Some(Outcome::Predicted(&prediction)));
        assert!(html.contains("<p class=\"result\">Predicted Class: Graduate</p>"));

        let html = form_page(&FeatureVector::defaults(), Some(Outcome::Failed("shape <1,33>")));
        assert!(html.contains("Prediction failed: shape &lt;1,33&gt;"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("Mother's <b>&\""), "Mother&#39;s &lt;b&gt;&amp;&quot;");
    }
}
