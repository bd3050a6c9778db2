use std::fs;

use hemoglobin_alexa::handle_request_str;
use hemoglobin_core::SkillConfig;
use serde_json::Value;

fn fixture_path(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn assert_matches_golden(request: &str, golden: &str) {
    let envelope = fs::read_to_string(fixture_path(request)).expect("Không đọc được request mẫu");

    let response =
        handle_request_str(&envelope, &SkillConfig::default()).expect("Không tạo được response");
    let actual = serde_json::to_value(response).expect("Không serialize response");

    let expected = fs::read_to_string(fixture_path(golden)).expect("Không đọc được golden response");
    let expected_value: Value = serde_json::from_str(&expected).expect("Golden không hợp lệ");

    assert_eq!(actual, expected_value, "{request} != {golden}");
}

#[test]
fn adult_lower_limit_matches_golden() {
    assert_matches_golden(
        "adult_lower_limit_request.json",
        "adult_lower_limit_response.json",
    );
}

#[test]
fn pregnant_range_matches_golden() {
    assert_matches_golden("pregnant_range_request.json", "pregnant_range_response.json");
}

#[test]
fn out_of_coverage_matches_golden() {
    assert_matches_golden(
        "out_of_coverage_request.json",
        "out_of_coverage_response.json",
    );
}

#[test]
fn help_intent_matches_golden() {
    assert_matches_golden("help_request.json", "help_response.json");
}
