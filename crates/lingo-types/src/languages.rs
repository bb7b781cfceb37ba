use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

pub static LANGUAGES: [Language; 10] = [
    Language { code: "auto", name: "Auto Detect" },
    Language { code: "en", name: "English" },
    Language { code: "vi", name: "Vietnamese" },
    Language { code: "ja", name: "Japanese" },
    Language { code: "ko", name: "Korean" },
    Language { code: "zh-CN", name: "Chinese" },
    Language { code: "fr", name: "French" },
    Language { code: "es", name: "Spanish" },
    Language { code: "de", name: "German" },
    Language { code: "ru", name: "Russian" },
];

/// Display name of a language code, or the code itself when unknown
pub fn language_name(code: &str) -> &str {
    LANGUAGES
        .iter()
        .find(|lang| lang.code == code)
        .map(|lang| lang.name)
        .unwrap_or(code)
}

pub fn source_languages() -> impl Iterator<Item = &'static Language> {
    LANGUAGES.iter()
}

pub fn target_languages() -> impl Iterator<Item = &'static Language> {
    LANGUAGES.iter().filter(|lang| lang.code != "auto")
}
