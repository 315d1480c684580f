//! Student Record - typed form submission
//!
//! One named field per layout slot. `to_vector` destructures the whole
//! struct, so a field added here without a vector slot fails to compile.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::layout::{FEATURE_COUNT, FEATURE_LAYOUT};
use super::schema::{self, DomainError};
use super::vector::FeatureVector;

/// A complete form submission
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct StudentRecord {
    #[validate(range(min = 1, max = 6))]
    pub marital_status: u8,
    #[validate(range(min = 1, max = 18))]
    pub application_mode: u8,
    #[validate(range(min = 1, max = 7))]
    pub application_order: u8,
    #[validate(range(min = 1, max = 17))]
    pub course: u8,
    #[validate(range(min = 0, max = 1))]
    pub daytime_attendance: u8,
    #[validate(range(min = 1, max = 17))]
    pub previous_qualification: u8,
    #[validate(range(min = 1, max = 21))]
    pub nationality: u8,
    #[validate(range(min = 1, max = 25))]
    pub mothers_qualification: u8,
    #[validate(range(min = 1, max = 25))]
    pub fathers_qualification: u8,
    #[validate(range(min = 1, max = 45))]
    pub mothers_occupation: u8,
    #[validate(range(min = 1, max = 45))]
    pub fathers_occupation: u8,
    #[validate(range(min = 0, max = 1))]
    pub displaced: u8,
    #[validate(range(min = 0, max = 1))]
    pub educational_special_needs: u8,
    #[validate(range(min = 0, max = 1))]
    pub debtor: u8,
    #[validate(range(min = 0, max = 1))]
    pub tuition_fees_up_to_date: u8,
    #[validate(range(min = 0, max = 1))]
    pub gender: u8,
    #[validate(range(min = 0, max = 1))]
    pub scholarship_holder: u8,
    #[validate(range(min = 18, max = 100))]
    pub age_at_enrollment: u8,
    #[validate(range(min = 0, max = 1))]
    pub international: u8,

    pub curricular_units_1st_sem_credited: u32,
    pub curricular_units_1st_sem_enrolled: u32,
    pub curricular_units_1st_sem_evaluations: u32,
    pub curricular_units_1st_sem_approved: u32,
    #[validate(range(min = 0.0, max = 20.0))]
    pub curricular_units_1st_sem_grade: f32,
    pub curricular_units_1st_sem_without_evaluations: u32,

    pub curricular_units_2nd_sem_credited: u32,
    pub curricular_units_2nd_sem_enrolled: u32,
    pub curricular_units_2nd_sem_evaluations: u32,
    pub curricular_units_2nd_sem_approved: u32,
    #[validate(range(min = 0.0, max = 20.0))]
    pub curricular_units_2nd_sem_grade: f32,
    pub curricular_units_2nd_sem_without_evaluations: u32,

    pub unemployment_rate: f32,
    pub inflation_rate: f32,
    pub gdp: f32,
}

/// Submission rejected at the collection boundary
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("invalid field values: {0}")]
    Invalid(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl StudentRecord {
    /// Pack fields into layout order
    pub fn to_vector(&self) -> FeatureVector {
        let StudentRecord {
            marital_status,
            application_mode,
            application_order,
            course,
            daytime_attendance,
            previous_qualification,
            nationality,
            mothers_qualification,
            fathers_qualification,
            mothers_occupation,
            fathers_occupation,
            displaced,
            educational_special_needs,
            debtor,
            tuition_fees_up_to_date,
            gender,
            scholarship_holder,
            age_at_enrollment,
            international,
            curricular_units_1st_sem_credited,
            curricular_units_1st_sem_enrolled,
            curricular_units_1st_sem_evaluations,
            curricular_units_1st_sem_approved,
            curricular_units_1st_sem_grade,
            curricular_units_1st_sem_without_evaluations,
            curricular_units_2nd_sem_credited,
            curricular_units_2nd_sem_enrolled,
            curricular_units_2nd_sem_evaluations,
            curricular_units_2nd_sem_approved,
            curricular_units_2nd_sem_grade,
            curricular_units_2nd_sem_without_evaluations,
            unemployment_rate,
            inflation_rate,
            gdp,
        } = *self;

        FeatureVector::from_values([
            f32::from(marital_status),
            f32::from(application_mode),
            f32::from(application_order),
            f32::from(course),
            f32::from(daytime_attendance),
            f32::from(previous_qualification),
            f32::from(nationality),
            f32::from(mothers_qualification),
            f32::from(fathers_qualification),
            f32::from(mothers_occupation),
            f32::from(fathers_occupation),
            f32::from(displaced),
            f32::from(educational_special_needs),
            f32::from(debtor),
            f32::from(tuition_fees_up_to_date),
            f32::from(gender),
            f32::from(scholarship_holder),
            f32::from(age_at_enrollment),
            f32::from(international),
            curricular_units_1st_sem_credited as f32,
            curricular_units_1st_sem_enrolled as f32,
            curricular_units_1st_sem_evaluations as f32,
            curricular_units_1st_sem_approved as f32,
            curricular_units_1st_sem_grade,
            curricular_units_1st_sem_without_evaluations as f32,
            curricular_units_2nd_sem_credited as f32,
            curricular_units_2nd_sem_enrolled as f32,
            curricular_units_2nd_sem_evaluations as f32,
            curricular_units_2nd_sem_approved as f32,
            curricular_units_2nd_sem_grade,
            curricular_units_2nd_sem_without_evaluations as f32,
            unemployment_rate,
            inflation_rate,
            gdp,
        ])
    }

    /// Rebuild a record from raw slot values (the form path).
    /// Every slot is checked against its domain before narrowing.
    pub fn from_vector(vector: &FeatureVector) -> Result<Self, RecordError> {
        schema::check_vector(vector)?;
        let v = vector.as_array();

        Ok(Self {
            marital_status: whole(v, 0)?,
            application_mode: whole(v, 1)?,
            application_order: whole(v, 2)?,
            course: whole(v, 3)?,
            daytime_attendance: whole(v, 4)?,
            previous_qualification: whole(v, 5)?,
            nationality: whole(v, 6)?,
            mothers_qualification: whole(v, 7)?,
            fathers_qualification: whole(v, 8)?,
            mothers_occupation: whole(v, 9)?,
            fathers_occupation: whole(v, 10)?,
            displaced: whole(v, 11)?,
            educational_special_needs: whole(v, 12)?,
            debtor: whole(v, 13)?,
            tuition_fees_up_to_date: whole(v, 14)?,
            gender: whole(v, 15)?,
            scholarship_holder: whole(v, 16)?,
            age_at_enrollment: whole(v, 17)?,
            international: whole(v, 18)?,
            curricular_units_1st_sem_credited: whole(v, 19)?,
            curricular_units_1st_sem_enrolled: whole(v, 20)?,
            curricular_units_1st_sem_evaluations: whole(v, 21)?,
            curricular_units_1st_sem_approved: whole(v, 22)?,
            curricular_units_1st_sem_grade: v[23],
            curricular_units_1st_sem_without_evaluations: whole(v, 24)?,
            curricular_units_2nd_sem_credited: whole(v, 25)?,
            curricular_units_2nd_sem_enrolled: whole(v, 26)?,
            curricular_units_2nd_sem_evaluations: whole(v, 27)?,
            curricular_units_2nd_sem_approved: whole(v, 28)?,
            curricular_units_2nd_sem_grade: v[29],
            curricular_units_2nd_sem_without_evaluations: whole(v, 30)?,
            unemployment_rate: v[31],
            inflation_rate: v[32],
            gdp: v[33],
        })
    }

    /// Boundary check: field ranges, then the schema domain of every slot
    /// (catches non-finite reals the range rules don't cover)
    pub fn check(&self) -> Result<(), RecordError> {
        self.validate()?;
        schema::check_vector(&self.to_vector())?;
        Ok(())
    }
}

impl Default for StudentRecord {
    fn default() -> Self {
        Self {
            marital_status: 1,
            application_mode: 1,
            application_order: 1,
            course: 1,
            daytime_attendance: 0,
            previous_qualification: 1,
            nationality: 1,
            mothers_qualification: 1,
            fathers_qualification: 1,
            mothers_occupation: 1,
            fathers_occupation: 1,
            displaced: 0,
            educational_special_needs: 0,
            debtor: 0,
            tuition_fees_up_to_date: 0,
            gender: 0,
            scholarship_holder: 0,
            age_at_enrollment: 20,
            international: 0,
            curricular_units_1st_sem_credited: 0,
            curricular_units_1st_sem_enrolled: 0,
            curricular_units_1st_sem_evaluations: 0,
            curricular_units_1st_sem_approved: 0,
            curricular_units_1st_sem_grade: 0.0,
            curricular_units_1st_sem_without_evaluations: 0,
            curricular_units_2nd_sem_credited: 0,
            curricular_units_2nd_sem_enrolled: 0,
            curricular_units_2nd_sem_evaluations: 0,
            curricular_units_2nd_sem_approved: 0,
            curricular_units_2nd_sem_grade: 0.0,
            curricular_units_2nd_sem_without_evaluations: 0,
            unemployment_rate: 0.0,
            inflation_rate: 0.0,
            gdp: 0.0,
        }
    }
}

/// Narrow an integral slot value into its field type
fn whole<T: TryFrom<i64>>(values: &[f32; FEATURE_COUNT], slot: usize) -> Result<T, DomainError> {
    let value = values[slot];
    T::try_from(value as i64).map_err(|_| DomainError { field: FEATURE_LAYOUT[slot], value })
}

impl From<&StudentRecord> for FeatureVector {
    fn from(record: &StudentRecord) -> Self {
        record.to_vector()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::layout::slot_of;
    use crate::logic::features::schema::{FieldDomain, FIELD_SCHEMA};
    use serde_json::{json, Value};

    fn with_field(name: &str, value: Value) -> Result<StudentRecord, serde_json::Error> {
        let mut map = serde_json::to_value(StudentRecord::default()).unwrap();
        map[name] = value;
        serde_json::from_value(map)
    }

    #[test]
    fn test_default_record_matches_schema_defaults() {
        assert_eq!(StudentRecord::default().to_vector(), FeatureVector::defaults());
        assert!(StudentRecord::default().check().is_ok());
    }

    #[test]
    fn test_vector_has_one_slot_per_field() {
        let record = StudentRecord::default();
        let fields = serde_json::to_value(record).unwrap();
        assert_eq!(fields.as_object().unwrap().len(), FEATURE_COUNT);
        assert_eq!(record.to_vector().len(), FEATURE_COUNT);
    }

    /// Changing exactly one field must move exactly the slot named after it.
    #[test]
    fn test_field_to_slot_mapping_is_fixed() {
        let base = StudentRecord::default().to_vector();

        for spec in FIELD_SCHEMA.iter() {
            let value = match spec.domain {
                FieldDomain::Category { .. } => json!(2),
                FieldDomain::Flag { .. } => json!(1),
                FieldDomain::Integer { .. } => json!(37),
                FieldDomain::Real { .. } => json!(7.5),
            };
            let record = with_field(spec.name, value).unwrap();
            let vector = record.to_vector();
            let slot = slot_of(spec.name).unwrap();

            for (i, (before, after)) in base.as_slice().iter().zip(vector.as_slice()).enumerate() {
                if i == slot {
                    assert_ne!(before, after, "{} did not land in slot {}", spec.name, slot);
                } else {
                    assert_eq!(before, after, "{} leaked into slot {} ({})", spec.name, i, FEATURE_LAYOUT[i]);
                }
            }
        }
    }

    #[test]
    fn test_age_boundaries_accepted() {
        for age in [18u8, 100] {
            let record = StudentRecord { age_at_enrollment: age, ..Default::default() };
            assert!(record.check().is_ok(), "age {} rejected", age);
            assert_eq!(record.to_vector().value("age_at_enrollment"), Some(f32::from(age)));
        }
    }

    #[test]
    fn test_age_outside_range_rejected() {
        for age in [17u8, 101] {
            let record = StudentRecord { age_at_enrollment: age, ..Default::default() };
            assert!(matches!(record.check(), Err(RecordError::Invalid(_))), "age {} accepted", age);
        }
    }

    /// Range rules and schema domains describe the same boundaries.
    #[test]
    fn test_range_rules_agree_with_schema() {
        for spec in FIELD_SCHEMA.iter() {
            let (low, high) = match spec.domain {
                FieldDomain::Category { labels } => (1, labels.len() as i64),
                FieldDomain::Flag { .. } => (0, 1),
                FieldDomain::Integer { min, max } => (min.unwrap_or(0), max.unwrap_or(1_000)),
                FieldDomain::Real { .. } => continue,
            };

            for inside in [low, high] {
                let record = with_field(spec.name, json!(inside)).unwrap();
                assert!(record.check().is_ok(), "{}={} rejected", spec.name, inside);
            }

            // Below the lower bound either fails to parse (unsigned) or fails validation.
            if let Ok(record) = with_field(spec.name, json!(low - 1)) {
                assert!(record.check().is_err(), "{}={} accepted", spec.name, low - 1);
            }
            if matches!(spec.domain, FieldDomain::Integer { max: None, .. }) {
                continue;
            }
            let record = with_field(spec.name, json!(high + 1)).unwrap();
            assert!(record.check().is_err(), "{}={} accepted", spec.name, high + 1);
        }
    }

    #[test]
    fn test_grade_range() {
        let record = StudentRecord { curricular_units_1st_sem_grade: 20.0, ..Default::default() };
        assert!(record.check().is_ok());
        let record = StudentRecord { curricular_units_2nd_sem_grade: 20.5, ..Default::default() };
        assert!(record.check().is_err());
    }

    #[test]
    fn test_non_finite_rate_rejected() {
        let record = StudentRecord { inflation_rate: f32::NAN, ..Default::default() };
        match record.check() {
            Err(RecordError::Domain(err)) => assert_eq!(err.field, "inflation_rate"),
            other => panic!("expected domain error, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_rates_allowed() {
        let record = StudentRecord { inflation_rate: -0.8, gdp: -4.06, unemployment_rate: 10.8, ..Default::default() };
        assert!(record.check().is_ok());
    }

    #[test]
    fn test_from_vector_restores_record() {
        let record = StudentRecord {
            course: 12,
            debtor: 1,
            age_at_enrollment: 44,
            curricular_units_1st_sem_approved: 5,
            curricular_units_2nd_sem_grade: 12.5,
            gdp: -1.7,
            ..Default::default()
        };
        assert_eq!(StudentRecord::from_vector(&record.to_vector()).unwrap(), record);
    }

    #[test]
    fn test_from_vector_names_out_of_domain_slot() {
        let mut vector = FeatureVector::defaults();
        vector.set("age_at_enrollment", 300.0);
        match StudentRecord::from_vector(&vector) {
            Err(RecordError::Domain(err)) => {
                assert_eq!(err.field, "age_at_enrollment");
                assert_eq!(err.value, 300.0);
            }
            other => panic!("expected domain error, got {:?}", other),
        }

        let mut vector = FeatureVector::defaults();
        vector.set("curricular_units_1st_sem_enrolled", -1.0);
        assert!(matches!(StudentRecord::from_vector(&vector), Err(RecordError::Domain(_))));

        let mut vector = FeatureVector::defaults();
        vector.set("curricular_units_2nd_sem_credited", 5e12);
        match StudentRecord::from_vector(&vector) {
            Err(RecordError::Domain(err)) => assert_eq!(err.field, "curricular_units_2nd_sem_credited"),
            other => panic!("expected domain error, got {:?}", other),
        }
    }
}
