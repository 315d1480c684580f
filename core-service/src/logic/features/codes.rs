//! Category Codes - human labels for enumerated fields
//!
//! Code `n` maps to `TABLE[n - 1]`. Codes start at 1, matching the
//! encoding the model was trained on.

/// Marital status codes.
pub const MARITAL_STATUS: [&str; 6] = [
    "Single",
    "Married",
    "Widower",
    "Divorced",
    "Common-law marriage",
    "Legally separated",
];

pub const APPLICATION_MODE: [&str; 18] = [
    "1st phase—general contingent",
    "Ordinance No. 612/93",
    "1st phase—special contingent (Azores Island)",
    "Holders of other higher courses",
    "Ordinance No. 854-B/99",
    "International student (bachelor)",
    "1st phase—special contingent (Madeira Island)",
    "2nd phase—general contingent",
    "3rd phase—general contingent",
    "Ordinance No. 533-A/99, item b2) (Different Plan)",
    "Ordinance No. 533-A/99, item b3 (Other Institution)",
    "Over 23 years old",
    "Transfer",
    "Change in course",
    "Technological specialization diploma holders",
    "Change in institution/course",
    "Short cycle diploma holders",
    "Change in institution/course (International)",
];

pub const COURSE: [&str; 17] = [
    "Biofuel Production Technologies",
    "Animation and Multimedia Design",
    "Social Service (evening attendance)",
    "Agronomy",
    "Communication Design",
    "Veterinary Nursing",
    "Informatics Engineering",
    "Equiniculture",
    "Management",
    "Social Service",
    "Tourism",
    "Nursing",
    "Oral Hygiene",
    "Advertising and Marketing Management",
    "Journalism and Communication",
    "Basic Education",
    "Management (evening attendance)",
];

pub const PREVIOUS_QUALIFICATION: [&str; 17] = [
    "Secondary education",
    "Higher education—bachelor’s degree",
    "Higher education—degree",
    "Higher education—master’s degree",
    "Higher education—doctorate",
    "Frequency of higher education",
    "12th year of schooling—not completed",
    "11th year of schooling—not completed",
    "Other—11th year of schooling",
    "10th year of schooling",
    "10th year of schooling—not completed",
    "Basic education 3rd cycle (9th/10th/11th year) or equivalent",
    "Basic education 2nd cycle (6th/7th/8th year) or equivalent",
    "Technological specialization course",
    "Higher education—degree (1st cycle)",
    "Professional higher technical course",
    "Higher education—master’s degree (2nd cycle)",
];

pub const NATIONALITY: [&str; 21] = [
    "Portuguese",
    "German",
    "Spanish",
    "Italian",
    "Dutch",
    "English",
    "Lithuanian",
    "Angolan",
    "Cape Verdean",
    "Guinean",
    "Mozambican",
    "Santomean",
    "Turkish",
    "Brazilian",
    "Romanian",
    "Moldova (Republic of)",
    "Mexican",
    "Ukrainian",
    "Russian",
    "Cuban",
    "Colombian",
];

/// Shared by mother's and father's qualification.
pub const PARENT_QUALIFICATION: [&str; 25] = [
    "Secondary Education—12th Year of Schooling or Equivalent",
    "Higher Education—bachelor’s degree",
    "Higher Education—degree",
    "Higher Education—master’s degree",
    "Higher Education—doctorate",
    "Frequency of Higher Education",
    "12th Year of Schooling—not completed",
    "11th Year of Schooling—not completed",
    "7th Year (Old)",
    "Other—11th Year of Schooling",
    "2nd year complementary high school course",
    "10th Year of Schooling",
    "General commerce course",
    "Basic Education 3rd Cycle (9th/10th/11th Year) or Equivalent",
    "Complementary High School Course",
    "Technical-professional course",
    "Complementary High School Course—not concluded",
    "7th year of schooling",
    "2nd cycle of the general high school course",
    "9th Year of Schooling—not completed",
    "8th year of schooling",
    "General Course of Administration and Commerce",
    "Supplementary Accounting and Administration",
    "Unknown",
    "Cannot read or write",
];

/// Shared by mother's and father's occupation.
pub const PARENT_OCCUPATION: [&str; 45] = [
    "Student",
    "Representatives of the Legislative Power and Executive Bodies, Directors, Directors and Executive Managers",
    "Specialists in Intellectual and Scientific Activities",
    "Intermediate Level Technicians and Professions",
    "Administrative staff",
    "Personal Services, Security and Safety Workers, and Sellers",
    "Farmers and Skilled Workers in Agriculture, Fisheries, and Forestry",
    "Skilled Workers in Industry, Construction, and Craftsmen",
    "Installation and Machine Operators and Assembly Workers",
    "Unskilled Workers",
    "Armed Forces Professions",
    "Other Situation",
    "Armed Forces Officers",
    "Armed Forces Sergeants",
    "Other Armed Forces personnel",
    "Directors of administrative and commercial services",
    "Hotel, catering, trade, and other services directors",
    "Specialists in the physical sciences, mathematics, engineering, and related techniques",
    "Health professionals",
    "Teachers",
    "Specialists in finance, accounting, administrative organization, and public and commercial relations",
    "Intermediate level science and engineering technicians and professions",
    "Technicians and professionals of intermediate level of health",
    "Intermediate level technicians from legal, social, sports, cultural, and similar services",
    "Information and communication technology technicians",
    "Office workers, secretaries in general, and data processing operators",
    "Data, accounting, statistical, financial services, and registry-related operators",
    "Other administrative support staff",
    "Personal service workers",
    "Sellers",
    "Personal care workers and the like",
    "Protection and security services personnel",
    "Market-oriented farmers and skilled agricultural and animal production workers",
    "Farmers, livestock keepers, fishermen, hunters and gatherers, and subsistence",
    "Skilled construction workers and the like, except electricians",
    "Skilled workers in metallurgy, metalworking, and similar",
    "Skilled workers in electricity and electronics",
    "Workers in food processing, woodworking, and clothing and other industries and crafts",
    "Fixed plant and machine operators",
    "Assembly workers",
    "Vehicle drivers and mobile equipment operators",
    "Unskilled workers in agriculture, animal production, and fisheries and forestry",
    "Unskilled workers in extractive industry, construction, manufacturing, and transport",
    "Meal preparation assistants",
    "Street vendors (except food) and street service provider",
];

/// Application order has no labels beyond its rank.
pub const APPLICATION_ORDER: [&str; 7] = ["1", "2", "3", "4", "5", "6", "7"];

#[cfg(test)]
mod tests {
    use super::*;

    /// Codes are 1-based positions in their table
    fn label_for(table: &[&'static str], code: u32) -> Option<&'static str> {
        let index = usize::try_from(code).ok()?.checked_sub(1)?;
        table.get(index).copied()
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(MARITAL_STATUS.len(), 6);
        assert_eq!(APPLICATION_MODE.len(), 18);
        assert_eq!(COURSE.len(), 17);
        assert_eq!(PREVIOUS_QUALIFICATION.len(), 17);
        assert_eq!(NATIONALITY.len(), 21);
        assert_eq!(PARENT_QUALIFICATION.len(), 25);
        assert_eq!(PARENT_OCCUPATION.len(), 45);
    }

    #[test]
    fn test_label_for() {
        assert_eq!(label_for(&MARITAL_STATUS, 1), Some("Single"));
        assert_eq!(label_for(&MARITAL_STATUS, 6), Some("Legally separated"));
        assert_eq!(label_for(&MARITAL_STATUS, 0), None);
        assert_eq!(label_for(&MARITAL_STATUS, 7), None);
        assert_eq!(label_for(&NATIONALITY, 14), Some("Brazilian"));
        assert_eq!(label_for(&PARENT_OCCUPATION, 45), Some("Street vendors (except food) and street service provider"));
    }
}
