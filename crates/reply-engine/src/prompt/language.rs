use reply_core::LanguageCode;

const FALLBACK_LANGUAGE: &str = "English";

/// Supported response languages, code to display name.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Spanish (Español)"),
    ("fr", "French (Français)"),
    ("de", "German (Deutsch)"),
    ("it", "Italian (Italiano)"),
    ("pt", "Portuguese (Português)"),
    ("nl", "Dutch (Nederlands)"),
    ("pl", "Polish (Polski)"),
    ("ru", "Russian (Русский)"),
    ("ja", "Japanese (日本語)"),
    ("zh", "Chinese Simplified (简体中文)"),
    ("ko", "Korean (한국어)"),
    ("ar", "Arabic (العربية)"),
    ("hi", "Hindi (हिन्दी)"),
    ("tr", "Turkish (Türkçe)"),
    ("sv", "Swedish (Svenska)"),
    ("no", "Norwegian (Norsk)"),
    ("da", "Danish (Dansk)"),
    ("fi", "Finnish (Suomi)"),
];

/// Unknown codes resolve to English.
pub fn language_display_name(code: &str) -> &'static str {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, name)| *name)
        .unwrap_or(FALLBACK_LANGUAGE)
}

/// `None` for `auto`.
pub fn language_directive(language: &LanguageCode) -> Option<String> {
    if language.is_auto() {
        return None;
    }
    let name = language_display_name(language.as_str());
    Some(format!(
        "CRITICAL: Respond ONLY in {name}. The entire response must be written in {name}."
    ))
}
