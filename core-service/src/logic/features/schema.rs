//! Field Schema - legal domain of every feature slot
//!
//! One entry per slot of `FEATURE_LAYOUT`, same order. The form renders
//! straight from this table, so widget constraints and the vector layout
//! can't drift apart.

use serde::Serialize;

use super::codes::{
    APPLICATION_MODE, APPLICATION_ORDER, COURSE, MARITAL_STATUS, NATIONALITY,
    PARENT_OCCUPATION, PARENT_QUALIFICATION, PREVIOUS_QUALIFICATION,
};
use super::layout::FEATURE_COUNT;
use super::vector::FeatureVector;

/// Upper bound of the Portuguese 0-20 grading scale.
pub const MAX_GRADE: f64 = 20.0;

// ============================================================================
// DOMAIN
// ============================================================================

/// Legal values of one field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldDomain {
    /// Codes `1..=labels.len()`
    Category { labels: &'static [&'static str] },
    /// `0` or `1`
    Flag { off: &'static str, on: &'static str },
    Integer { min: Option<i64>, max: Option<i64> },
    Real { min: Option<f64>, max: Option<f64> },
}

impl FieldDomain {
    /// Check a raw vector value against this domain
    pub fn contains(&self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }

        match *self {
            FieldDomain::Category { labels } => {
                value.fract() == 0.0 && value >= 1.0 && value <= labels.len() as f64
            }
            FieldDomain::Flag { .. } => value == 0.0 || value == 1.0,
            FieldDomain::Integer { min, max } => {
                value.fract() == 0.0
                    && min.map_or(true, |m| value >= m as f64)
                    && max.map_or(true, |m| value <= m as f64)
            }
            FieldDomain::Real { min, max } => {
                min.map_or(true, |m| value >= m) && max.map_or(true, |m| value <= m)
            }
        }
    }

    /// Selectable `(code, label)` pairs for enumerated domains
    pub fn options(&self) -> Vec<(u32, &'static str)> {
        match *self {
            FieldDomain::Category { labels } => labels
                .iter()
                .enumerate()
                .map(|(i, label)| (i as u32 + 1, *label))
                .collect(),
            FieldDomain::Flag { off, on } => vec![(0, off), (1, on)],
            FieldDomain::Integer { .. } | FieldDomain::Real { .. } => Vec::new(),
        }
    }

    pub fn is_enumerated(&self) -> bool {
        matches!(self, FieldDomain::Category { .. } | FieldDomain::Flag { .. })
    }
}

// ============================================================================
// FIELD SPEC
// ============================================================================

/// One form field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub domain: FieldDomain,
    pub default: f64,
}

const fn category(name: &'static str, label: &'static str, labels: &'static [&'static str]) -> FieldSpec {
    FieldSpec { name, label, domain: FieldDomain::Category { labels }, default: 1.0 }
}

const fn yes_no(name: &'static str, label: &'static str) -> FieldSpec {
    flag(name, label, "No", "Yes")
}

const fn flag(name: &'static str, label: &'static str, off: &'static str, on: &'static str) -> FieldSpec {
    FieldSpec { name, label, domain: FieldDomain::Flag { off, on }, default: 0.0 }
}

const fn count(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec { name, label, domain: FieldDomain::Integer { min: Some(0), max: None }, default: 0.0 }
}

const fn grade(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec { name, label, domain: FieldDomain::Real { min: Some(0.0), max: Some(MAX_GRADE) }, default: 0.0 }
}

const fn rate(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec { name, label, domain: FieldDomain::Real { min: None, max: None }, default: 0.0 }
}

/// Field schema in vector order
pub static FIELD_SCHEMA: [FieldSpec; FEATURE_COUNT] = [
    category("marital_status", "Marital Status", &MARITAL_STATUS),
    category("application_mode", "Application Mode", &APPLICATION_MODE),
    category("application_order", "Application Order", &APPLICATION_ORDER),
    category("course", "Course", &COURSE),
    flag("daytime_attendance", "Daytime/Evening Attendance", "Evening", "Daytime"),
    category("previous_qualification", "Previous Qualification", &PREVIOUS_QUALIFICATION),
    category("nationality", "Nationality", &NATIONALITY),
    category("mothers_qualification", "Mother's Qualification", &PARENT_QUALIFICATION),
    category("fathers_qualification", "Father's Qualification", &PARENT_QUALIFICATION),
    category("mothers_occupation", "Mother's Occupation", &PARENT_OCCUPATION),
    category("fathers_occupation", "Father's Occupation", &PARENT_OCCUPATION),
    yes_no("displaced", "Displaced"),
    yes_no("educational_special_needs", "Education Special Needs"),
    yes_no("debtor", "Debtor"),
    yes_no("tuition_fees_up_to_date", "Tuition Fees Up to Date"),
    flag("gender", "Gender", "Female", "Male"),
    yes_no("scholarship_holder", "Scholarship Holder"),
    FieldSpec {
        name: "age_at_enrollment",
        label: "Age at Enrollment",
        domain: FieldDomain::Integer { min: Some(18), max: Some(100) },
        default: 20.0,
    },
    yes_no("international", "International"),
    count("curricular_units_1st_sem_credited", "Curricular Units 1st Sem (Credited)"),
    count("curricular_units_1st_sem_enrolled", "Curricular Units 1st Sem (Enrolled)"),
    count("curricular_units_1st_sem_evaluations", "Curricular Units 1st Sem (Evaluations)"),
    count("curricular_units_1st_sem_approved", "Curricular Units 1st Sem (Approved)"),
    grade("curricular_units_1st_sem_grade", "Curricular Units 1st Sem (Grade)"),
    count("curricular_units_1st_sem_without_evaluations", "Curricular Units 1st Sem (Without Evaluations)"),
    count("curricular_units_2nd_sem_credited", "Curricular Units 2nd Sem (Credited)"),
    count("curricular_units_2nd_sem_enrolled", "Curricular Units 2nd Sem (Enrolled)"),
    count("curricular_units_2nd_sem_evaluations", "Curricular Units 2nd Sem (Evaluations)"),
    count("curricular_units_2nd_sem_approved", "Curricular Units 2nd Sem (Approved)"),
    grade("curricular_units_2nd_sem_grade", "Curricular Units 2nd Sem (Grade)"),
    count("curricular_units_2nd_sem_without_evaluations", "Curricular Units 2nd Sem (Without Evaluations)"),
    rate("unemployment_rate", "Unemployment Rate"),
    rate("inflation_rate", "Inflation Rate"),
    rate("gdp", "GDP"),
];

/// Look up a field spec by name
pub fn field_spec(name: &str) -> Option<&'static FieldSpec> {
    FIELD_SCHEMA.iter().find(|spec| spec.name == name)
}

// ============================================================================
// DOMAIN CHECK
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("value {value} is outside the domain of `{field}`")]
pub struct DomainError {
    pub field: &'static str,
    pub value: f32,
}

/// Check every slot of a vector against its field domain
pub fn check_vector(vector: &FeatureVector) -> Result<(), DomainError> {
    for (spec, &value) in FIELD_SCHEMA.iter().zip(vector.as_slice()) {
        if !spec.domain.contains(f64::from(value)) {
            return Err(DomainError { field: spec.name, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::layout::FEATURE_LAYOUT;

    #[test]
    fn test_schema_follows_layout() {
        for (i, spec) in FIELD_SCHEMA.iter().enumerate() {
            assert_eq!(spec.name, FEATURE_LAYOUT[i], "schema slot {} out of order", i);
        }
    }

    #[test]
    fn test_defaults_are_in_domain() {
        for spec in FIELD_SCHEMA.iter() {
            assert!(spec.domain.contains(spec.default), "default of {} out of domain", spec.name);
        }
    }

    #[test]
    fn test_age_boundaries() {
        let age = field_spec("age_at_enrollment").unwrap();
        assert!(age.domain.contains(18.0));
        assert!(age.domain.contains(100.0));
        assert!(!age.domain.contains(17.0));
        assert!(!age.domain.contains(101.0));
        assert!(!age.domain.contains(20.5));
    }

    #[test]
    fn test_category_domain() {
        let marital = field_spec("marital_status").unwrap();
        assert!(!marital.domain.contains(0.0));
        assert!(marital.domain.contains(1.0));
        assert!(marital.domain.contains(6.0));
        assert!(!marital.domain.contains(7.0));
        assert_eq!(marital.domain.options().len(), 6);
        assert_eq!(marital.domain.options()[0], (1, "Single"));
    }

    #[test]
    fn test_flag_domain() {
        let gender = field_spec("gender").unwrap();
        assert_eq!(gender.domain.options(), vec![(0, "Female"), (1, "Male")]);
        assert!(!gender.domain.contains(2.0));
    }

    #[test]
    fn test_real_domain_rejects_non_finite() {
        let gdp = field_spec("gdp").unwrap();
        assert!(gdp.domain.contains(-4.06));
        assert!(!gdp.domain.contains(f64::NAN));
        assert!(!gdp.domain.contains(f64::INFINITY));
    }

    #[test]
    fn test_check_vector_reports_field() {
        let mut vector = FeatureVector::defaults();
        assert!(check_vector(&vector).is_ok());

        vector.set("nationality", 22.0);
        let err = check_vector(&vector).unwrap_err();
        assert_eq!(err.field, "nationality");
        assert_eq!(err.value, 22.0);
    }
}
