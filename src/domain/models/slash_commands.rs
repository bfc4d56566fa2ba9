#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

use super::RequestType;
use super::TranslationDirection;

pub struct SlashCommand {
    command: String,
    pub args: Vec<String>,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let mut args = text
            .trim()
            .split(' ')
            .filter(|e| return !e.is_empty())
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();
        if args.is_empty() {
            return None;
        }

        let prefix = args[0].to_lowercase();
        args.remove(0);

        let cmd = SlashCommand {
            command: prefix,
            args,
        };
        if cmd.is_quit()
            || cmd.is_help()
            || cmd.is_history()
            || cmd.is_language_toggle()
            || cmd.is_bilingual_toggle()
            || cmd.request_type().is_some()
        {
            return Some(cmd);
        }

        return None;
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }

    pub fn is_history(&self) -> bool {
        return ["/hi", "/history"].contains(&self.command.as_str());
    }

    pub fn is_language_toggle(&self) -> bool {
        return ["/l", "/lang", "/language"].contains(&self.command.as_str());
    }

    pub fn is_bilingual_toggle(&self) -> bool {
        return ["/b", "/bilingual"].contains(&self.command.as_str());
    }

    pub fn request_type(&self) -> Option<RequestType> {
        match self.command.as_str() {
            "/s" | "/simplify" => return Some(RequestType::Simplify),
            "/a" | "/analyze" | "/analyse" => return Some(RequestType::Analyze),
            "/t" | "/translate" => return Some(RequestType::Translate),
            "/r" | "/research" => return Some(RequestType::DeepResearch),
            _ => return None,
        }
    }

    /// Direction for `/translate`. An optional leading target language
    /// argument (`bn` or `en`) picks it, otherwise English to Bengali.
    pub fn translation_direction(&self) -> Option<TranslationDirection> {
        if self.request_type() != Some(RequestType::Translate) {
            return None;
        }

        if let Some(first) = self.args.first() {
            if let Some(direction) = TranslationDirection::from_target(first) {
                return Some(direction);
            }
        }

        return Some(TranslationDirection::EnglishToBengali);
    }

    /// The text to send to the assistant, without the command and any
    /// translation target argument.
    pub fn text(&self) -> String {
        let mut args = self.args.as_slice();
        if self.request_type() == Some(RequestType::Translate)
            && !args.is_empty()
            && TranslationDirection::from_target(&args[0]).is_some()
        {
            args = &args[1..];
        }

        return args.join(" ");
    }
}
