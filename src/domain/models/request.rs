#[cfg(test)]
#[path = "request_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RequestType {
    Simplify,
    Analyze,
    Translate,
    DeepResearch,
}

impl RequestType {
    pub fn parse(text: &str) -> Option<RequestType> {
        match text.trim().to_lowercase().as_str() {
            "simplify" => return Some(RequestType::Simplify),
            "analyze" | "analyse" => return Some(RequestType::Analyze),
            "translate" => return Some(RequestType::Translate),
            "deep_research" | "research" => return Some(RequestType::DeepResearch),
            _ => return None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TranslationDirection {
    EnglishToBengali,
    BengaliToEnglish,
}

impl TranslationDirection {
    /// Accepts the target language as typed in a chat command.
    pub fn from_target(text: &str) -> Option<TranslationDirection> {
        match text.trim().to_lowercase().as_str() {
            "" | "bn" | "bengali" | "bangla" => return Some(TranslationDirection::EnglishToBengali),
            "en" | "english" => return Some(TranslationDirection::BengaliToEnglish),
            _ => return None,
        }
    }
}

/// Per submission knobs on top of the classification.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubmitOptions {
    pub translation_direction: Option<TranslationDirection>,
    pub translate_reply: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation_direction: Option<TranslationDirection>,
}

/// Body of a single outbound call to the assistant backend. Lives only as
/// long as the call it drives.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantRequest {
    pub user_id: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_type: Option<RequestType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<RequestOptions>,
    #[serde(
        rename = "translate_to_bengali",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub translate_reply: bool,
}

impl AssistantRequest {
    pub fn new(
        user_id: i64,
        message: &str,
        request_type: Option<RequestType>,
        submit_options: &SubmitOptions,
    ) -> AssistantRequest {
        let mut options = None;
        if request_type == Some(RequestType::Translate) {
            options = Some(RequestOptions {
                translation_direction: Some(
                    submit_options
                        .translation_direction
                        .unwrap_or(TranslationDirection::EnglishToBengali),
                ),
            });
        }

        return AssistantRequest {
            user_id,
            message: message.to_string(),
            request_type,
            options,
            translate_reply: submit_options.translate_reply,
        };
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub response: String,
    #[serde(default)]
    pub bengali_translation: Option<String>,
}
