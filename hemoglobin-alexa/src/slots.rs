//! Slot extraction for `CheckHemogloginIntent`.

use hemoglobin_core::{PatientQuery, SkillConfig};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const PATIENT_AGE_SLOT: &str = "PatientAge";
pub const LEVEL_SLOT: &str = "Level";
pub const PATIENT_TYPE_SLOT: &str = "PatientType";
pub const PATIENT_SUB_TYPE_SLOT: &str = "PatientSubType";
pub const RESPONSE_VALUE_TYPE_SLOT: &str = "ResponseValueType";

/// Slot values after defaulting. Nothing here is validated beyond parsing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    pub patient_age: i64,
    /// Extracted for completeness; resolution never reads it.
    pub hemoglobin_level: i64,
    pub patient_type: String,
    pub patient_sub_type: String,
    pub response_value_type: String,
}

impl UserInput {
    /// Read slots from an intent object, falling back to `config` defaults.
    pub fn from_intent(intent: &Value, config: &SkillConfig) -> Self {
        Self {
            patient_age: integer_slot(intent, PATIENT_AGE_SLOT),
            hemoglobin_level: integer_slot(intent, LEVEL_SLOT),
            patient_type: text_slot(intent, PATIENT_TYPE_SLOT, &config.default_patient_type),
            patient_sub_type: text_slot(
                intent,
                PATIENT_SUB_TYPE_SLOT,
                &config.default_patient_sub_type,
            ),
            response_value_type: text_slot(
                intent,
                RESPONSE_VALUE_TYPE_SLOT,
                &config.default_response_shape,
            ),
        }
    }

    pub fn to_query(&self) -> PatientQuery {
        PatientQuery {
            age: self.patient_age as f64,
            patient_type: self.patient_type.clone(),
            patient_sub_type: self.patient_sub_type.clone(),
            response_shape: self.response_value_type.clone(),
        }
    }
}

/// Non-empty `value` of a named slot.
pub fn slot_value<'a>(intent: &'a Value, name: &str) -> Option<&'a str> {
    intent
        .get("slots")?
        .get(name)?
        .get("value")
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

fn integer_slot(intent: &Value, name: &str) -> i64 {
    slot_value(intent, name)
        .and_then(parse_leading_int)
        .unwrap_or(0)
}

fn text_slot(intent: &Value, name: &str, default: &str) -> String {
    slot_value(intent, name).unwrap_or(default).to_string()
}

/// Parse the leading decimal integer of `raw`: `" 35 years"` gives 35, `"3.7"` gives 3.
/// Values beyond `i64` saturate so an absurd age stays out of range.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = unsigned
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }

    let magnitude = unsigned[..digits_len]
        .bytes()
        .try_fold(0i64, |acc, digit| {
            acc.checked_mul(10)?.checked_add(i64::from(digit - b'0'))
        });

    Some(match (magnitude, negative) {
        (Some(value), true) => -value,
        (Some(value), false) => value,
        (None, true) => i64::MIN,
        (None, false) => i64::MAX,
    })
}
