//! Feature Layout - thứ tự 34 cột đầu vào của classifier
//!
//! The scaler and the classifier were fit against exactly this order, so a
//! slot index is the field's identity. Changing a name, the order or the
//! count means bumping `FEATURE_VERSION` and re-exporting both artifacts.

use crc32fast::Hasher;
use serde::Serialize;

/// Bumped on every layout change
pub const FEATURE_VERSION: u8 = 1;

/// Width of every vector handed to the scaler
pub const FEATURE_COUNT: usize = 34;

/// Dataset column for each slot, in model order
pub const FEATURE_LAYOUT: [&str; FEATURE_COUNT] = [
    // === Enrollment (0-6) ===
    "marital_status",                               // 0
    "application_mode",                             // 1
    "application_order",                            // 2
    "course",                                       // 3
    "daytime_attendance",                           // 4
    "previous_qualification",                       // 5
    "nationality",                                  // 6

    // === Family background (7-10) ===
    "mothers_qualification",                        // 7
    "fathers_qualification",                        // 8
    "mothers_occupation",                           // 9
    "fathers_occupation",                           // 10

    // === Personal / financial flags (11-18) ===
    "displaced",                                    // 11
    "educational_special_needs",                    // 12
    "debtor",                                       // 13
    "tuition_fees_up_to_date",                      // 14
    "gender",                                       // 15
    "scholarship_holder",                           // 16
    "age_at_enrollment",                            // 17
    "international",                                // 18

    // === 1st semester curricular units (19-24) ===
    "curricular_units_1st_sem_credited",            // 19
    "curricular_units_1st_sem_enrolled",            // 20
    "curricular_units_1st_sem_evaluations",         // 21
    "curricular_units_1st_sem_approved",            // 22
    "curricular_units_1st_sem_grade",               // 23
    "curricular_units_1st_sem_without_evaluations", // 24

    // === 2nd semester curricular units (25-30) ===
    "curricular_units_2nd_sem_credited",            // 25
    "curricular_units_2nd_sem_enrolled",            // 26
    "curricular_units_2nd_sem_evaluations",         // 27
    "curricular_units_2nd_sem_approved",            // 28
    "curricular_units_2nd_sem_grade",               // 29
    "curricular_units_2nd_sem_without_evaluations", // 30

    // === Macroeconomic context (31-33) ===
    "unemployment_rate",                            // 31
    "inflation_rate",                               // 32
    "gdp",                                          // 33
];

/// CRC32 over version, count and names; artifacts record it at export time
pub fn layout_hash() -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[FEATURE_VERSION]);
    hasher.update(&(FEATURE_COUNT as u32).to_le_bytes());
    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(b"\n");
    }
    hasher.finalize()
}

/// Slot of a named field
pub fn slot_of(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

// ============================================================================
// DESCRIPTOR
// ============================================================================

/// Layout summary served by the schema endpoint and stamped into metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub features: &'static [&'static str],
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            features: &FEATURE_LAYOUT,
        }
    }
}

/// An artifact or vector stamped with a different layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error(
    "built for layout v{found_version} ({found_hash:08x}), running v{} ({:08x})",
    FEATURE_VERSION,
    layout_hash()
)]
pub struct LayoutDrift {
    pub found_version: u8,
    pub found_hash: u32,
}

/// Compare a recorded (version, hash) stamp with the running layout
pub fn check_layout(version: u8, hash: u32) -> Result<(), LayoutDrift> {
    if version == FEATURE_VERSION && hash == layout_hash() {
        Ok(())
    } else {
        Err(LayoutDrift { found_version: version, found_hash: hash })
    }
}
