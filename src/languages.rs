use serde::Serialize;

/// Language requested when the caller doesn't pick one.
pub const DEFAULT_LANGUAGE: &str = "en";

/// A caption language the collaborator is known to serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub code: &'static str,
    /// Native name, as shown in a language picker.
    pub name: &'static str,
}

pub static LANGUAGES: &[Language] = &[
    Language { code: "en", name: "English" },
    Language { code: "es", name: "Español" },
    Language { code: "pt", name: "Português" },
    Language { code: "fr", name: "Français" },
    Language { code: "de", name: "Deutsch" },
    Language { code: "it", name: "Italiano" },
    Language { code: "ja", name: "日本語" },
    Language { code: "ko", name: "한국어" },
    Language { code: "zh", name: "中文" },
    Language { code: "ru", name: "Русский" },
    Language { code: "ar", name: "العربية" },
    Language { code: "hi", name: "हिन्दी" },
    Language { code: "nl", name: "Nederlands" },
    Language { code: "pl", name: "Polski" },
    Language { code: "tr", name: "Türkçe" },
    Language { code: "vi", name: "Tiếng Việt" },
];

/// Native name for `code`, or the code itself when we don't know it.
pub fn language_name(code: &str) -> &str {
    LANGUAGES
        .iter()
        .find(|l| l.code.eq_ignore_ascii_case(code))
        .map_or(code, |l| l.name)
}
