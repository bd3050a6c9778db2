//! Phân giải câu hỏi thành thông điệp trả lời.

use crate::table::{lookup, patient_type_default_age};
use crate::{
    fold_case, MessageKind, PatientQuery, PatientType, ResolveError, ResolvedRange,
    ResponseDescriptor, ResponseShape, Sex,
};

/// Suy ra giới tính. `pregnant` luôn cho `Female`, bất kể loại bệnh nhân.
pub fn resolve_sex(patient_type: &str, patient_sub_type: &str) -> Sex {
    if fold_case(patient_sub_type) == "pregnant" {
        return Sex::Female;
    }
    match PatientType::parse(patient_type) {
        PatientType::Men => Sex::Male,
        PatientType::Women => Sex::Female,
        _ => Sex::Unspecified,
    }
}

/// Tuổi dùng để tra bảng: tuổi được nêu nếu dương, nếu không thì tuổi mặc định theo loại.
pub fn effective_age(query: &PatientQuery) -> f64 {
    if query.age > 0.0 {
        query.age
    } else {
        patient_type_default_age(&query.patient_type)
    }
}

/// Chọn khoảng tham chiếu; gộp hai khoảng nam/nữ khi chưa rõ giới tính.
pub fn resolve_range(query: &PatientQuery) -> Result<ResolvedRange, ResolveError> {
    let age = effective_age(query);
    let sex = resolve_sex(&query.patient_type, &query.patient_sub_type);

    let row = lookup(age).ok_or(ResolveError::AgeOutOfCoverage { age })?;

    let range = row
        .ranges
        .iter()
        .filter(|range| range.matches(sex))
        .map(ResolvedRange::from)
        .reduce(ResolvedRange::union)
        .ok_or(ResolveError::NoMatchingRange { age })?;

    tracing::debug!(
        age,
        sex = ?sex,
        bracket_min = row.age_min,
        bracket_max = row.age_max,
        min_value = range.min_value,
        max_value = range.max_value,
        "hemoglobin range resolved"
    );

    Ok(range)
}

/// Dựng thông điệp theo dạng câu trả lời được yêu cầu.
pub fn describe(
    shape: ResponseShape,
    range: ResolvedRange,
    patient_type: &str,
) -> ResponseDescriptor {
    let (kind, parameters) = match shape {
        ResponseShape::UpperLimit => (
            MessageKind::Limit,
            vec![
                "upper limit".to_string(),
                range.max_value.to_string(),
                patient_type.to_string(),
            ],
        ),
        ResponseShape::LowerLimit => (
            MessageKind::Limit,
            vec![
                "lower limit".to_string(),
                range.min_value.to_string(),
                patient_type.to_string(),
            ],
        ),
        ResponseShape::Range => (
            MessageKind::Range,
            vec![
                range.min_value.to_string(),
                range.max_value.to_string(),
                patient_type.to_string(),
            ],
        ),
    };

    ResponseDescriptor { kind, parameters }
}

/// Điểm vào chính. Không bao giờ lỗi: tuổi ngoài bảng cho thông điệp `Error`.
pub fn resolve(query: &PatientQuery) -> ResponseDescriptor {
    match resolve_range(query) {
        Ok(range) => describe(
            ResponseShape::parse(&query.response_shape),
            range,
            &query.patient_type,
        ),
        Err(err) => {
            tracing::debug!(error = %err, "hemoglobin query outside coverage");
            ResponseDescriptor::error()
        }
    }
}
