use super::RequestType;
use super::SlashCommand;
use super::TranslationDirection;

#[test]
fn it_parse_empty_string() {
    let text = "";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_space_only() {
    let text = " ";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_single_slash() {
    let text = "/";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_invalid_prefix() {
    let text = "!q";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_plain_question() {
    let text = "What is photosynthesis?";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_valid_prefix() {
    let text = "/q";
    let cmd = SlashCommand::parse(text);
    assert!(cmd.is_some());
    assert_eq!(cmd.unwrap().command, "/q");
}
#[test]
fn it_parse_uppercase_prefix() {
    let cmd = SlashCommand::parse("/QUIT").unwrap();
    assert!(cmd.is_quit());
}

#[test]
fn it_is_short_quit() {
    let cmd = SlashCommand::parse("/q").unwrap();
    assert!(cmd.is_quit());
}
#[test]
fn it_is_quit() {
    let cmd = SlashCommand::parse("/quit").unwrap();
    assert!(cmd.is_quit());
}
#[test]
fn it_is_exit() {
    let cmd = SlashCommand::parse("/exit").unwrap();
    assert!(cmd.is_quit());
}

#[test]
fn it_is_help() {
    assert!(SlashCommand::parse("/h").unwrap().is_help());
    assert!(SlashCommand::parse("/help").unwrap().is_help());
}

#[test]
fn it_is_history() {
    assert!(SlashCommand::parse("/hi").unwrap().is_history());
    assert!(SlashCommand::parse("/history").unwrap().is_history());
}

#[test]
fn it_is_language_toggle() {
    assert!(SlashCommand::parse("/l").unwrap().is_language_toggle());
    assert!(SlashCommand::parse("/lang").unwrap().is_language_toggle());
    assert!(SlashCommand::parse("/language").unwrap().is_language_toggle());
}

#[test]
fn it_is_bilingual_toggle() {
    assert!(SlashCommand::parse("/b").unwrap().is_bilingual_toggle());
    assert!(SlashCommand::parse("/bilingual").unwrap().is_bilingual_toggle());
}

#[test]
fn it_is_simplify() {
    let cmd = SlashCommand::parse("/simplify What   is  entropy?").unwrap();
    assert_eq!(cmd.request_type(), Some(RequestType::Simplify));
    assert_eq!(cmd.translation_direction(), None);
    assert_eq!(cmd.text(), "What is entropy?");
}

#[test]
fn it_is_analyze() {
    let cmd = SlashCommand::parse("/a Rising sea levels in coastal regions").unwrap();
    assert_eq!(cmd.request_type(), Some(RequestType::Analyze));
    assert_eq!(cmd.text(), "Rising sea levels in coastal regions");
}

#[test]
fn it_is_research() {
    let cmd = SlashCommand::parse("/research mangrove ecosystems").unwrap();
    assert_eq!(cmd.request_type(), Some(RequestType::DeepResearch));
    assert_eq!(cmd.text(), "mangrove ecosystems");
}

#[test]
fn it_is_translate_with_default_direction() {
    let cmd = SlashCommand::parse("/translate Water is essential").unwrap();
    assert_eq!(cmd.request_type(), Some(RequestType::Translate));
    assert_eq!(
        cmd.translation_direction(),
        Some(TranslationDirection::EnglishToBengali)
    );
    assert_eq!(cmd.text(), "Water is essential");
}

#[test]
fn it_is_translate_to_english() {
    let cmd = SlashCommand::parse("/t en পানি অপরিহার্য").unwrap();
    assert_eq!(
        cmd.translation_direction(),
        Some(TranslationDirection::BengaliToEnglish)
    );
    assert_eq!(cmd.text(), "পানি অপরিহার্য");
}

#[test]
fn it_is_translate_without_text() {
    let cmd = SlashCommand::parse("/translate bn").unwrap();
    assert_eq!(
        cmd.translation_direction(),
        Some(TranslationDirection::EnglishToBengali)
    );
    assert_eq!(cmd.text(), "");
}
