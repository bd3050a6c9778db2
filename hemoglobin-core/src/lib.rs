//! Logic lõi tra cứu khoảng tham chiếu hemoglobin theo tuổi và giới tính.

mod resolver;
mod table;

use serde::{Deserialize, Serialize};

pub use resolver::{describe, effective_age, resolve, resolve_range, resolve_sex};
pub use table::{brackets, lookup, patient_type_default_age};

/// Cấu hình giá trị mặc định cho các slot và bản địa hoá.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillConfig {
    /// Loại bệnh nhân khi slot `PatientType` trống.
    pub default_patient_type: String,
    /// Phân loại phụ khi slot `PatientSubType` trống.
    pub default_patient_sub_type: String,
    /// Dạng câu trả lời khi slot `ResponseValueType` trống.
    pub default_response_shape: String,
    /// Locale dùng khi yêu cầu không có hoặc không hỗ trợ.
    pub default_locale: String,
    /// Nếu có, chỉ chấp nhận yêu cầu mang đúng application id này.
    #[serde(default)]
    pub application_id: Option<String>,
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            default_patient_type: "adult".to_string(),
            default_patient_sub_type: String::new(),
            default_response_shape: "range".to_string(),
            default_locale: "en-US".to_string(),
            application_id: None,
        }
    }
}

/// Chuẩn hoá văn bản tự do trước khi so với từ vựng cố định.
pub fn fold_case(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Nhóm giới tính gắn với một dòng trong bảng tham chiếu.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SexGroup {
    Male,
    Female,
    All,
}

/// Giới tính đã suy ra từ câu hỏi.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
    Unspecified,
}

/// Loại bệnh nhân theo từ vựng cố định của slot `PatientType`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PatientType {
    Newborn,
    Infant,
    Child,
    Teenager,
    Adult,
    Men,
    Women,
    Unknown,
}

impl PatientType {
    /// Phân tích văn bản tự do, không phân biệt hoa thường.
    pub fn parse(raw: &str) -> Self {
        match fold_case(raw).as_str() {
            "newborn" => Self::Newborn,
            "infant" => Self::Infant,
            "child" => Self::Child,
            "teenager" => Self::Teenager,
            "adult" => Self::Adult,
            "men" => Self::Men,
            "women" => Self::Women,
            _ => Self::Unknown,
        }
    }

    /// Tuổi đại diện (năm) khi câu hỏi không nêu tuổi. `0.0` nghĩa là không xác định.
    pub fn default_age(self) -> f64 {
        match self {
            Self::Newborn => 0.1,
            Self::Infant => 1.0,
            Self::Child => 3.0,
            Self::Teenager => 14.0,
            Self::Adult | Self::Men | Self::Women => 35.0,
            Self::Unknown => 0.0,
        }
    }
}

/// Phần của khoảng tham chiếu mà người hỏi muốn nghe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ResponseShape {
    Range,
    LowerLimit,
    UpperLimit,
}

impl ResponseShape {
    /// `limit` là bí danh của `lower limit`; mọi giá trị khác trở thành `Range`.
    pub fn parse(raw: &str) -> Self {
        match fold_case(raw).as_str() {
            "upper limit" => Self::UpperLimit,
            "lower limit" | "limit" => Self::LowerLimit,
            _ => Self::Range,
        }
    }
}

/// Khoảng giá trị (g/L) áp dụng cho một hoặc nhiều nhóm giới tính.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SexRange {
    pub sexes: &'static [SexGroup],
    pub min_value: u32,
    pub max_value: u32,
}

impl SexRange {
    /// `Sex::Unspecified` khớp mọi dòng; `SexGroup::All` khớp mọi giới tính.
    pub fn matches(&self, sex: Sex) -> bool {
        let wanted = match sex {
            Sex::Male => SexGroup::Male,
            Sex::Female => SexGroup::Female,
            Sex::Unspecified => return true,
        };
        self.sexes
            .iter()
            .any(|group| *group == wanted || *group == SexGroup::All)
    }
}

/// Một nhóm tuổi nửa mở `[age_min, age_max)`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReferenceRow {
    pub age_min: f64,
    pub age_max: f64,
    pub ranges: &'static [SexRange],
}

impl ReferenceRow {
    pub fn contains(&self, age: f64) -> bool {
        age >= self.age_min && age < self.age_max
    }
}

/// Khoảng đã chọn sau khi lọc theo giới tính và gộp.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolvedRange {
    pub min_value: u32,
    pub max_value: u32,
}

impl ResolvedRange {
    /// Khoảng nhỏ nhất bao trùm cả hai khoảng.
    pub fn union(self, other: Self) -> Self {
        Self {
            min_value: self.min_value.min(other.min_value),
            max_value: self.max_value.max(other.max_value),
        }
    }
}

impl From<&SexRange> for ResolvedRange {
    fn from(range: &SexRange) -> Self {
        Self {
            min_value: range.min_value,
            max_value: range.max_value,
        }
    }
}

/// Câu hỏi đã được trích xuất từ các slot, chưa chuẩn hoá.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientQuery {
    /// Tuổi (năm); `0` nghĩa là suy ra từ `patient_type`.
    pub age: f64,
    pub patient_type: String,
    pub patient_sub_type: String,
    pub response_shape: String,
}

impl PatientQuery {
    /// Câu hỏi chưa nêu tuổi, các trường văn bản lấy từ mặc định của `config`.
    pub fn with_defaults(config: &SkillConfig) -> Self {
        Self {
            age: 0.0,
            patient_type: config.default_patient_type.clone(),
            patient_sub_type: config.default_patient_sub_type.clone(),
            response_shape: config.default_response_shape.clone(),
        }
    }
}

impl Default for PatientQuery {
    fn default() -> Self {
        Self::with_defaults(&SkillConfig::default())
    }
}

/// Loại thông điệp mà bộ điều hợp cần hiển thị.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Range,
    Limit,
    Error,
}

impl MessageKind {
    /// Khoá tài nguyên bản địa hoá tương ứng.
    pub fn resource_key(self) -> &'static str {
        match self {
            Self::Range => "HEMOGLOBIN_RANGE_MESSAGE",
            Self::Limit => "HEMOGLOBIN_LIMIT_MESSAGE",
            Self::Error => "HEMOGLOBIN_ERROR_MESSAGE",
        }
    }
}

/// Kết quả của bộ phân giải: loại thông điệp và tham số theo thứ tự.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseDescriptor {
    pub kind: MessageKind,
    pub parameters: Vec<String>,
}

impl ResponseDescriptor {
    /// Thông điệp lỗi, không có tham số.
    pub fn error() -> Self {
        Self {
            kind: MessageKind::Error,
            parameters: Vec::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }
}

/// Lỗi khi phân giải khoảng tham chiếu.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    #[error("Tuổi {age} nằm ngoài bảng tham chiếu")]
    AgeOutOfCoverage { age: f64 },
    #[error("Không có khoảng phù hợp cho tuổi {age}")]
    NoMatchingRange { age: f64 },
}

/// Lỗi chung của bộ điều hợp nền tảng giọng nói.
#[derive(Debug, thiserror::Error)]
pub enum SkillError {
    #[error("Yêu cầu thiếu thông tin tối thiểu")]
    MissingData,
    #[error("Không đọc được yêu cầu: {0}")]
    Parse(String),
    #[error("Loại yêu cầu không được hỗ trợ: {0}")]
    UnsupportedRequest(String),
    #[error("Application id không hợp lệ: {0}")]
    InvalidApplication(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patient_type_parse_ignores_case_and_whitespace() {
        assert_eq!(PatientType::parse("Teenager"), PatientType::Teenager);
        assert_eq!(PatientType::parse("  WOMEN "), PatientType::Women);
        assert_eq!(PatientType::parse("pregnant woman"), PatientType::Unknown);
        assert_eq!(PatientType::parse(""), PatientType::Unknown);
    }

    #[test]
    fn response_shape_limit_is_lower_limit() {
        assert_eq!(ResponseShape::parse("limit"), ResponseShape::LowerLimit);
        assert_eq!(ResponseShape::parse("Lower Limit"), ResponseShape::LowerLimit);
        assert_eq!(ResponseShape::parse("upper limit"), ResponseShape::UpperLimit);
        assert_eq!(ResponseShape::parse("normal level"), ResponseShape::Range);
    }

    #[test]
    fn union_is_commutative() {
        let female = ResolvedRange {
            min_value: 117,
            max_value: 155,
        };
        let male = ResolvedRange {
            min_value: 132,
            max_value: 173,
        };
        assert_eq!(female.union(male), male.union(female));
        assert_eq!(
            female.union(male),
            ResolvedRange {
                min_value: 117,
                max_value: 173
            }
        );
    }

    #[test]
    fn query_defaults_follow_config() {
        let config = SkillConfig::default();
        let query = PatientQuery::default();
        assert_eq!(query.age, 0.0);
        assert_eq!(query.patient_type, config.default_patient_type);
        assert_eq!(query.patient_sub_type, config.default_patient_sub_type);
        assert_eq!(query.response_shape, config.default_response_shape);

        let custom = SkillConfig {
            default_patient_type: "child".to_string(),
            default_response_shape: "upper limit".to_string(),
            ..SkillConfig::default()
        };
        let query = PatientQuery::with_defaults(&custom);
        assert_eq!(query.patient_type, "child");
        assert_eq!(query.response_shape, "upper limit");
    }

    #[test]
    fn fold_case_trims_and_lowercases() {
        assert_eq!(fold_case("  PreGnant "), "pregnant");
        assert_eq!(fold_case("WOMEN"), "women");
    }

    #[test]
    fn descriptor_serializes_with_snake_case_kind() {
        let descriptor = ResponseDescriptor::error();
        let value = serde_json::to_value(&descriptor).expect("serialize descriptor");
        assert_eq!(value["kind"], "error");
        assert_eq!(value["parameters"], serde_json::json!([]));
    }
}
