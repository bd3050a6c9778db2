//! Alexa-style request envelope to spoken hemoglobin answer.

mod locale;
mod slots;

use hemoglobin_core::{resolve, SkillConfig, SkillError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use locale::{language_strings, strip_ssml, LanguageStrings};
pub use slots::{parse_leading_int, slot_value, UserInput};

/// Intent name as registered in the interaction model.
pub const CHECK_HEMOGLOBIN_INTENT: &str = "CheckHemogloginIntent";

const RESPONSE_VERSION: &str = "1.0";

/// Handle a request envelope given as a JSON string.
pub fn handle_request_str(
    request_json: &str,
    config: &SkillConfig,
) -> Result<SkillResponse, SkillError> {
    let value: Value =
        serde_json::from_str(request_json).map_err(|err| SkillError::Parse(err.to_string()))?;
    handle_request_value(&value, config)
}

/// Handle a request envelope given as a `serde_json::Value`.
pub fn handle_request_value(
    envelope: &Value,
    config: &SkillConfig,
) -> Result<SkillResponse, SkillError> {
    verify_application(envelope, config)?;

    let request = envelope.get("request").ok_or(SkillError::MissingData)?;
    let locale = request
        .get("locale")
        .and_then(Value::as_str)
        .unwrap_or(&config.default_locale);
    let strings = language_strings(locale, &config.default_locale);

    let skill_request = SkillRequest::from_request(request)?;
    tracing::info!(
        request = skill_request.label(),
        locale = strings.locale,
        "dispatching skill request"
    );

    Ok(dispatch(&skill_request, strings, config))
}

/// Closed set of requests the skill answers.
#[derive(Debug, Clone, PartialEq)]
pub enum SkillRequest<'a> {
    Launch,
    CheckHemoglobin(&'a Value),
    Help,
    Stop,
    Cancel,
    Unhandled(&'a str),
    SessionEnded,
}

impl<'a> SkillRequest<'a> {
    /// Classify the `request` object of an envelope.
    pub fn from_request(request: &'a Value) -> Result<Self, SkillError> {
        let request_type = request
            .get("type")
            .and_then(Value::as_str)
            .ok_or(SkillError::MissingData)?;

        match request_type {
            "LaunchRequest" => Ok(Self::Launch),
            "SessionEndedRequest" => Ok(Self::SessionEnded),
            "IntentRequest" => {
                let intent = request.get("intent").ok_or(SkillError::MissingData)?;
                let name = intent
                    .get("name")
                    .and_then(Value::as_str)
                    .ok_or(SkillError::MissingData)?;
                Ok(match name {
                    CHECK_HEMOGLOBIN_INTENT => Self::CheckHemoglobin(intent),
                    "AMAZON.HelpIntent" => Self::Help,
                    "AMAZON.StopIntent" => Self::Stop,
                    "AMAZON.CancelIntent" => Self::Cancel,
                    other => Self::Unhandled(other),
                })
            }
            other => {
                tracing::warn!(request_type = other, "unsupported request type");
                Err(SkillError::UnsupportedRequest(other.to_string()))
            }
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Launch => "launch",
            Self::CheckHemoglobin(_) => "check_hemoglobin",
            Self::Help => "help",
            Self::Stop => "stop",
            Self::Cancel => "cancel",
            Self::Unhandled(_) => "unhandled",
            Self::SessionEnded => "session_ended",
        }
    }
}

fn dispatch(
    request: &SkillRequest<'_>,
    strings: &LanguageStrings,
    config: &SkillConfig,
) -> SkillResponse {
    let no_params: &[&str] = &[];
    match request {
        SkillRequest::Launch => {
            SkillResponse::ask(strings.translate("LAUNCH_MESSAGE", no_params))
        }
        SkillRequest::CheckHemoglobin(intent) => {
            let input = UserInput::from_intent(intent, config);
            let descriptor = resolve(&input.to_query());
            let speech = strings.translate(
                descriptor.kind.resource_key(),
                descriptor.parameters.as_slice(),
            );
            let card = Card::simple(
                strings.translate("SKILL_NAME", no_params),
                strip_ssml(&speech),
            );
            SkillResponse::tell(speech).with_card(card)
        }
        SkillRequest::Help => SkillResponse::ask(strings.translate("HELP_MESSAGE", no_params)),
        SkillRequest::Stop => SkillResponse::ask(strings.translate("STOP_MESSAGE", no_params)),
        SkillRequest::Cancel => {
            SkillResponse::tell(strings.translate("CANCEL_MESSAGE", no_params))
        }
        SkillRequest::Unhandled(_) => {
            SkillResponse::ask(strings.translate("HELP_UNHANDLED", no_params))
        }
        SkillRequest::SessionEnded => SkillResponse::empty(),
    }
}

fn verify_application(envelope: &Value, config: &SkillConfig) -> Result<(), SkillError> {
    let Some(expected) = config.application_id.as_deref() else {
        return Ok(());
    };

    let found = envelope
        .pointer("/session/application/applicationId")
        .or_else(|| envelope.pointer("/context/System/application/applicationId"))
        .and_then(Value::as_str);

    match found {
        Some(id) if id == expected => Ok(()),
        other => {
            let found = other.unwrap_or("<missing>").to_string();
            tracing::warn!(application_id = %found, "request rejected: application id mismatch");
            Err(SkillError::InvalidApplication(found))
        }
    }
}

/// Response envelope returned to the voice platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillResponse {
    pub version: String,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub kind: String,
    pub ssml: String,
}

impl OutputSpeech {
    pub fn ssml(text: &str) -> Self {
        Self {
            kind: "SSML".to_string(),
            ssml: format!("<speak>{text}</speak>"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Card {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub content: String,
}

impl Card {
    pub fn simple(title: String, content: String) -> Self {
        Self {
            kind: "Simple".to_string(),
            title,
            content,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

impl SkillResponse {
    fn with_body(response: ResponseBody) -> Self {
        Self {
            version: RESPONSE_VERSION.to_string(),
            response,
        }
    }

    /// Speak and end the session.
    pub fn tell(speech: String) -> Self {
        Self::with_body(ResponseBody {
            output_speech: Some(OutputSpeech::ssml(&speech)),
            should_end_session: Some(true),
            ..ResponseBody::default()
        })
    }

    /// Speak, keep the session open and reprompt with the same text.
    pub fn ask(speech: String) -> Self {
        Self::with_body(ResponseBody {
            output_speech: Some(OutputSpeech::ssml(&speech)),
            reprompt: Some(Reprompt {
                output_speech: OutputSpeech::ssml(&speech),
            }),
            should_end_session: Some(false),
            ..ResponseBody::default()
        })
    }

    pub fn empty() -> Self {
        Self::with_body(ResponseBody::default())
    }

    pub fn with_card(mut self, card: Card) -> Self {
        self.response.card = Some(card);
        self
    }

    /// Spoken text without the `<speak>` wrapper or other tags.
    pub fn speech_text(&self) -> Option<String> {
        self.response
            .output_speech
            .as_ref()
            .map(|speech| strip_ssml(&speech.ssml))
    }
}
