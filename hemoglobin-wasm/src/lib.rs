//! Cầu nối WASM <-> JavaScript cho handler serverless.

use hemoglobin_core::{PatientQuery, SkillConfig, SkillError};
use serde::Deserialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct JsSkillConfig {
    #[serde(default)]
    default_patient_type: Option<String>,
    #[serde(default)]
    default_patient_sub_type: Option<String>,
    #[serde(default)]
    default_response_shape: Option<String>,
    #[serde(default)]
    default_locale: Option<String>,
    #[serde(default)]
    application_id: Option<String>,
}

impl From<JsSkillConfig> for SkillConfig {
    fn from(cfg: JsSkillConfig) -> Self {
        let mut base = SkillConfig::default();
        if let Some(patient_type) = cfg.default_patient_type {
            base.default_patient_type = patient_type;
        }
        if let Some(sub_type) = cfg.default_patient_sub_type {
            base.default_patient_sub_type = sub_type;
        }
        if let Some(shape) = cfg.default_response_shape {
            base.default_response_shape = shape;
        }
        if let Some(locale) = cfg.default_locale {
            base.default_locale = locale;
        }
        if cfg.application_id.is_some() {
            base.application_id = cfg.application_id;
        }
        base
    }
}

/// Câu hỏi từ JavaScript; trường thiếu nhận giá trị mặc định của slot.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct JsPatientQuery {
    #[serde(default)]
    age: Option<f64>,
    #[serde(default)]
    patient_type: Option<String>,
    #[serde(default)]
    patient_sub_type: Option<String>,
    #[serde(default)]
    response_shape: Option<String>,
}

impl From<JsPatientQuery> for PatientQuery {
    fn from(query: JsPatientQuery) -> Self {
        let base = PatientQuery::default();
        Self {
            age: query.age.unwrap_or(base.age),
            patient_type: query.patient_type.unwrap_or(base.patient_type),
            patient_sub_type: query.patient_sub_type.unwrap_or(base.patient_sub_type),
            response_shape: query.response_shape.unwrap_or(base.response_shape),
        }
    }
}

/// Xử lý một request envelope và trả về response envelope.
#[wasm_bindgen]
pub fn handle_request(event: JsValue, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let envelope = from_value::<serde_json::Value>(event)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được request: {err}")))?;

    let cfg = match config {
        Some(js_cfg) => {
            let cfg: JsSkillConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Không đọc được config: {err}")))?;
            SkillConfig::from(cfg)
        }
        None => SkillConfig::default(),
    };

    let response = hemoglobin_alexa::handle_request_value(&envelope, &cfg)
        .map_err(|err| JsValue::from_str(&format_skill_error(err)))?;

    to_value(&response)
        .map_err(|err| JsValue::from_str(&format!("Không serialize response: {err}")))
}

/// Chạy bộ phân giải trực tiếp, bỏ qua envelope.
#[wasm_bindgen]
pub fn resolve_query(query: JsValue) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let query: JsPatientQuery = from_value(query)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được câu hỏi: {err}")))?;

    let descriptor = hemoglobin_core::resolve(&PatientQuery::from(query));

    to_value(&descriptor)
        .map_err(|err| JsValue::from_str(&format!("Không serialize kết quả: {err}")))
}

fn format_skill_error(err: SkillError) -> String {
    format!("Skill error: {err}")
}
