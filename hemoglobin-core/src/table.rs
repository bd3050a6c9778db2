//! Bảng tham chiếu hemoglobin (g/L) theo nhóm tuổi.

use crate::{PatientType, ReferenceRow, SexGroup, SexRange};

const ALL: &[SexGroup] = &[SexGroup::All];
const FEMALE: &[SexGroup] = &[SexGroup::Female];
const MALE: &[SexGroup] = &[SexGroup::Male];

static BRACKETS: [ReferenceRow; 8] = [
    ReferenceRow {
        age_min: 1.0,
        age_max: 5.0,
        ranges: &[SexRange {
            sexes: ALL,
            min_value: 100,
            max_value: 140,
        }],
    },
    ReferenceRow {
        age_min: 5.0,
        age_max: 10.0,
        ranges: &[SexRange {
            sexes: ALL,
            min_value: 115,
            max_value: 145,
        }],
    },
    ReferenceRow {
        age_min: 10.0,
        age_max: 12.0,
        ranges: &[SexRange {
            sexes: ALL,
            min_value: 120,
            max_value: 150,
        }],
    },
    ReferenceRow {
        age_min: 12.0,
        age_max: 15.0,
        ranges: &[
            SexRange {
                sexes: FEMALE,
                min_value: 115,
                max_value: 150,
            },
            SexRange {
                sexes: MALE,
                min_value: 120,
                max_value: 160,
            },
        ],
    },
    ReferenceRow {
        age_min: 15.0,
        age_max: 18.0,
        ranges: &[
            SexRange {
                sexes: FEMALE,
                min_value: 117,
                max_value: 153,
            },
            SexRange {
                sexes: MALE,
                min_value: 117,
                max_value: 166,
            },
        ],
    },
    ReferenceRow {
        age_min: 18.0,
        age_max: 45.0,
        ranges: &[
            SexRange {
                sexes: FEMALE,
                min_value: 117,
                max_value: 155,
            },
            SexRange {
                sexes: MALE,
                min_value: 132,
                max_value: 173,
            },
        ],
    },
    ReferenceRow {
        age_min: 45.0,
        age_max: 65.0,
        ranges: &[
            SexRange {
                sexes: FEMALE,
                min_value: 117,
                max_value: 160,
            },
            SexRange {
                sexes: MALE,
                min_value: 131,
                max_value: 172,
            },
        ],
    },
    ReferenceRow {
        age_min: 65.0,
        age_max: 150.0,
        ranges: &[
            SexRange {
                sexes: FEMALE,
                min_value: 120,
                max_value: 161,
            },
            SexRange {
                sexes: MALE,
                min_value: 126,
                max_value: 174,
            },
        ],
    },
];

/// Toàn bộ bảng, sắp xếp tăng dần theo `age_min`.
pub fn brackets() -> &'static [ReferenceRow] {
    &BRACKETS
}

/// Tìm nhóm tuổi chứa `age`. `None` khi tuổi âm, dưới 1, từ 150 trở lên hoặc NaN.
pub fn lookup(age: f64) -> Option<&'static ReferenceRow> {
    BRACKETS.iter().find(|row| row.contains(age))
}

/// Tuổi mặc định theo loại bệnh nhân; `0.0` nếu không nhận ra.
pub fn patient_type_default_age(patient_type: &str) -> f64 {
    PatientType::parse(patient_type).default_age()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brackets_are_contiguous_and_ascending() {
        let rows = brackets();
        assert_eq!(rows.first().map(|row| row.age_min), Some(1.0));
        assert_eq!(rows.last().map(|row| row.age_max), Some(150.0));
        for pair in rows.windows(2) {
            assert_eq!(pair[0].age_max, pair[1].age_min);
            assert!(pair[0].age_min < pair[0].age_max);
        }
    }

    #[test]
    fn each_bracket_has_one_all_or_one_per_sex() {
        for row in brackets() {
            match row.ranges {
                [only] => assert_eq!(only.sexes, &[SexGroup::All]),
                [first, second] => {
                    let mut groups = vec![first.sexes[0], second.sexes[0]];
                    groups.sort_by_key(|group| *group as u8);
                    assert_eq!(groups, vec![SexGroup::Male, SexGroup::Female]);
                }
                other => panic!("unexpected range count {}", other.len()),
            }
            for range in row.ranges {
                assert!(range.min_value < range.max_value);
            }
        }
    }

    #[test]
    fn lookup_uses_half_open_intervals() {
        assert_eq!(lookup(1.0).map(|row| row.age_min), Some(1.0));
        assert_eq!(lookup(4.999).map(|row| row.age_min), Some(1.0));
        assert_eq!(lookup(5.0).map(|row| row.age_min), Some(5.0));
        assert_eq!(lookup(149.9).map(|row| row.age_min), Some(65.0));
    }

    #[test]
    fn lookup_outside_coverage_is_none() {
        assert!(lookup(0.0).is_none());
        assert!(lookup(0.1).is_none());
        assert!(lookup(-3.0).is_none());
        assert!(lookup(150.0).is_none());
        assert!(lookup(f64::NAN).is_none());
    }

    #[test]
    fn default_age_by_patient_type() {
        assert_eq!(patient_type_default_age("newborn"), 0.1);
        assert_eq!(patient_type_default_age("infant"), 1.0);
        assert_eq!(patient_type_default_age("child"), 3.0);
        assert_eq!(patient_type_default_age("teenager"), 14.0);
        assert_eq!(patient_type_default_age("adult"), 35.0);
        assert_eq!(patient_type_default_age("men"), 35.0);
        assert_eq!(patient_type_default_age("women"), 35.0);
        assert_eq!(patient_type_default_age(""), 0.0);
        assert_eq!(patient_type_default_age("astronaut"), 0.0);
    }
}
