//! UK Biobank fields and codings read by the diabetes algorithms.
//!
//! Field numbers refer to the UK Biobank showcase. Code lists follow
//! Eastwood et al. (2016), Supplementary Table 1.

/// Touchscreen: gestational diabetes only (4041), yes = 1.
pub const GDM_ONLY_SR: &str = "4041";
pub const YES: [&str; 1] = ["1"];

/// Nurse interview: non-cancer illness code (20002).
pub const ILLNESS_NI: &str = "20002";
pub const ANY_DM_NI: [&str; 1] = ["1220"];
pub const GDM_NI: [&str; 1] = ["1221"];
pub const T1DM_NI: [&str; 1] = ["1222"];
pub const T2DM_NI: [&str; 1] = ["1223"];

/// Touchscreen: medication for cholesterol, blood pressure, diabetes or
/// hormones (6153 women, 6177 men); insulin = 3.
pub const MEDICATION_SR: [&str; 2] = ["6153", "6177"];
pub const INSULIN_SR: [&str; 1] = ["3"];

/// Touchscreen: started insulin within one year of diagnosis (2986).
pub const INSULIN_WITHIN_1YR: &str = "2986";

/// Nurse interview: treatment/medication code (20003).
pub const TREATMENT_NI: &str = "20003";
pub const INSULIN_NI: [&str; 1] = ["1140883066"];
pub const METFORMIN_NI: [&str; 3] = ["1140884600", "1140874686", "1141189090"];
pub const GLITAZONES: [&str; 5] = [
    "1141171646",
    "1141171652",
    "1141153254",
    "1141177600",
    "1141177606",
];
pub const MEGLITINIDES: [&str; 3] = ["1141173882", "1141173786", "1141168660"];
pub const SULFONYLUREAS: [&str; 10] = [
    "1140874718",
    "1140874744",
    "1140874746",
    "1141152590",
    "1141156984",
    "1140874646",
    "1141157284",
    "1140874652",
    "1140874674",
    "1140874728",
];
pub const OTHER_OAD: [&str; 3] = ["1140868902", "1140868908", "1140857508"];

/// Every non-metformin oral anti-diabetic drug.
pub fn non_metformin_oad() -> impl Iterator<Item = &'static str> {
    GLITAZONES
        .into_iter()
        .chain(MEGLITINIDES)
        .chain(SULFONYLUREAS)
        .chain(OTHER_OAD)
}

/// Touchscreen: age diabetes diagnosed (2976). Only instance 0 is used.
pub const AGE_DIAGNOSED_SR: &str = "2976";
pub const AGE_DIAGNOSED_SR_INSTANCE: u32 = 0;

/// Nurse interview: age illness first diagnosed (20009), co-indexed with 20002.
pub const AGE_DIAGNOSED_NI: &str = "20009";

/// Ethnic background (21000).
pub const ETHNICITY: &str = "21000";
pub const WHITE_EUROPEAN: [&str; 4] = ["1", "1001", "1002", "1003"];
pub const SOUTH_ASIAN: [&str; 4] = ["3", "3001", "3002", "3003"];
pub const AFRICAN_CARIBBEAN: [&str; 4] = ["4", "4001", "4002", "4003"];
pub const MIXED_OTHER: [&str; 7] = ["2", "2001", "2002", "2003", "2004", "5", "6"];

/// Hospital in-patient ICD-10 diagnoses (41270) and first-occurrence dates
/// (41280), co-indexed by array slot.
pub const ICD10_DIAGNOSES: &str = "41270";
pub const ICD10_DATES: &str = "41280";

/// ICD-10 four-character codes `{prefix}0` to `{prefix}9`.
pub fn icd10_block(prefix: &str) -> Vec<String> {
    (0..10).map(|digit| format!("{prefix}{digit}")).collect()
}

pub const ICD10_T1DM: &str = "E10";
pub const ICD10_T2DM: &str = "E11";
pub const ICD10_OTHER_DM: &str = "E13";
pub const ICD10_UNSPECIFIED_DM: &str = "E14";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icd10_block() {
        let codes = icd10_block(ICD10_T2DM);
        assert_eq!(codes.len(), 10);
        assert_eq!(codes[0], "E110");
        assert_eq!(codes[9], "E119");
    }

    #[test]
    fn test_non_metformin_oad_count() {
        assert_eq!(non_metformin_oad().count(), 21);
        assert!(non_metformin_oad().all(|code| !METFORMIN_NI.contains(&code)));
    }
}
