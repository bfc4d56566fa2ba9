use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumVariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Bengali,
}

impl Language {
    pub fn toggled(self) -> Language {
        match self {
            Language::English => return Language::Bengali,
            Language::Bengali => return Language::English,
        }
    }

    /// Tag applied to the process wide display attribute.
    pub fn tag(self) -> &'static str {
        match self {
            Language::English => return "en",
            Language::Bengali => return "bn",
        }
    }
}
