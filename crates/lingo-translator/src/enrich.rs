use lingo_phonetic::PhoneticService;
use lingo_types::TranslationResult;

use crate::error::TranslateError;

/// Reject requests that must never reach the network
pub fn validate_params(text: &str, source_lang: &str, target_lang: &str) -> Result<(), TranslateError> {
    if text.trim().is_empty() {
        return Err(TranslateError::InvalidRequest(
            "Text must be a non-empty string".to_string(),
        ));
    }
    if source_lang.trim().is_empty() || target_lang.trim().is_empty() {
        return Err(TranslateError::InvalidRequest(
            "Source and target languages are required".to_string(),
        ));
    }
    Ok(())
}

/// Apply the phonetic policy to a parsed result.
///
/// Vietnamese never carries a phonetic. English sides that the provider left
/// empty are backfilled from the dictionary; phonetics the provider did
/// supply are kept as is. Empty strings come out as `None`.
pub async fn enrich_with_phonetics(
    mut result: TranslationResult,
    source_text: &str,
    source_lang: &str,
    target_lang: &str,
    phonetics: &PhoneticService,
) -> TranslationResult {
    let actual_source = result
        .detected_lang
        .clone()
        .unwrap_or_else(|| source_lang.to_string());

    if is_lang(&actual_source, "vi") {
        result.src_phonetic = None;
    } else if is_blank(&result.src_phonetic) && is_lang(&actual_source, "en") {
        result.src_phonetic = Some(phonetics.get_phonetic(source_text, "en").await);
    }

    if is_lang(target_lang, "vi") {
        result.target_phonetic = None;
    } else if is_blank(&result.target_phonetic) && is_lang(target_lang, "en") {
        result.target_phonetic = Some(phonetics.get_phonetic(&result.translation, "en").await);
    }

    result.src_phonetic = result.src_phonetic.filter(|p| !p.trim().is_empty());
    result.target_phonetic = result.target_phonetic.filter(|p| !p.trim().is_empty());
    result
}

fn is_blank(phonetic: &Option<String>) -> bool {
    phonetic.as_deref().is_none_or(|p| p.trim().is_empty())
}

/// Matches `code` against a base language, ignoring any region suffix
fn is_lang(code: &str, base: &str) -> bool {
    code.split(['-', '_'])
        .next()
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(base))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn dictionary() -> (MockServer, PhoneticService) {
        let server = MockServer::start().await;
        let service = PhoneticService::with_base_url(format!("{}/entries/en", server.uri()));
        (server, service)
    }

    #[test]
    fn test_validate_params() {
        assert!(validate_params("hello", "auto", "vi").is_ok());
        assert!(matches!(
            validate_params(" ", "en", "vi"),
            Err(TranslateError::InvalidRequest(_))
        ));
        assert!(validate_params("hello", "", "vi").is_err());
        assert!(validate_params("hello", "en", "").is_err());
    }

    #[test]
    fn test_is_lang() {
        assert!(is_lang("vi", "vi"));
        assert!(is_lang("en-US", "en"));
        assert!(!is_lang("auto", "en"));
    }

    #[tokio::test]
    async fn test_vietnamese_strips_phonetics() {
        let (server, phonetics) = dictionary().await;
        Mock::given(path_regex(".*"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let result = TranslationResult::new("hello")
            .with_phonetics(Some("sin chao".into()), Some("həˈlō".into()));
        let result = enrich_with_phonetics(result, "xin chào", "vi", "vi", &phonetics).await;
        assert_eq!(result.src_phonetic, None);
        assert_eq!(result.target_phonetic, None);
    }

    #[tokio::test]
    async fn test_detected_language_wins() {
        let (server, phonetics) = dictionary().await;
        Mock::given(path_regex(".*"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let result = TranslationResult::new("hello")
            .with_phonetics(Some("sin chao".into()), None)
            .with_detected_lang(Some("vi".into()));
        let result = enrich_with_phonetics(result, "xin chào", "auto", "ja", &phonetics).await;
        assert_eq!(result.src_phonetic, None);
    }

    #[tokio::test]
    async fn test_english_target_is_backfilled() {
        let (server, phonetics) = dictionary().await;
        Mock::given(method("GET"))
            .and(path("/entries/en/thanks"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{ "phonetics": [{ "text": "/θæŋks/" }] }])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = TranslationResult::new("Thanks")
            .with_phonetics(Some("arigatou".into()), Some(String::new()));
        let result = enrich_with_phonetics(result, "ありがとう", "ja", "en", &phonetics).await;
        assert_eq!(result.src_phonetic.as_deref(), Some("arigatou"));
        assert_eq!(result.target_phonetic.as_deref(), Some("θæŋks"));
    }

    #[tokio::test]
    async fn test_provider_phonetics_are_not_overwritten() {
        let (server, phonetics) = dictionary().await;
        Mock::given(path_regex(".*"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let result = TranslationResult::new("Bonjour")
            .with_phonetics(Some("həˈlō".into()), Some("bɔ̃.ʒuʁ".into()));
        let result = enrich_with_phonetics(result, "hello", "en", "fr", &phonetics).await;
        assert_eq!(result.src_phonetic.as_deref(), Some("həˈlō"));
        assert_eq!(result.target_phonetic.as_deref(), Some("bɔ̃.ʒuʁ"));
    }

    #[tokio::test]
    async fn test_missing_lookup_becomes_none() {
        let (server, phonetics) = dictionary().await;
        Mock::given(path_regex(".*"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = enrich_with_phonetics(
            TranslationResult::new("Hallo"),
            "hello",
            "en",
            "de",
            &phonetics,
        )
        .await;
        assert_eq!(result.src_phonetic, None);
        assert_eq!(result.target_phonetic, None);
    }
}
