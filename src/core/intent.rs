use crate::domain::model::IntentPlatform;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

// URI component 編碼：保留 A-Z a-z 0-9 - _ . ! ~ * ' ( )
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// 組出各平台預填貼文的網址；查詢參數名稱必須與平台相容
pub fn intent_url(platform: IntentPlatform, share_text: &str, page_url: &str) -> String {
    let text = encode_component(share_text);
    match platform {
        IntentPlatform::WhatsApp => format!("https://api.whatsapp.com/send?text={}", text),
        IntentPlatform::X => format!("https://twitter.com/intent/tweet?text={}", text),
        IntentPlatform::Reddit => format!(
            "https://www.reddit.com/submit?url={}&title={}",
            encode_component(page_url),
            text
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    const PAGE: &str = "https://greencommute.app/impact?ref=share";
    const TEXT: &str = "Alex just saved 123.4 kg of CO₂ with Green Commute! 🌿\nJoin me: https://greencommute.app/impact?ref=share";

    #[test]
    fn test_encode_component_matches_js() {
        assert_eq!(encode_component("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(encode_component("it's (fine)!*~"), "it's%20(fine)!*~");
        assert_eq!(encode_component("CO₂"), "CO%E2%82%82");
        assert_eq!(encode_component("\n"), "%0A");
    }

    #[test]
    fn test_whatsapp_url() {
        let url = intent_url(IntentPlatform::WhatsApp, TEXT, PAGE);
        assert!(url.starts_with("https://api.whatsapp.com/send?text=Alex%20just%20saved"));
        let parsed = Url::parse(&url).unwrap();
        let (key, value) = parsed.query_pairs().next().unwrap();
        assert_eq!(key, "text");
        assert_eq!(value, TEXT);
    }

    #[test]
    fn test_x_url() {
        let url = intent_url(IntentPlatform::X, TEXT, PAGE);
        let parsed = Url::parse(&url).unwrap();
        assert_eq!(parsed.host_str(), Some("twitter.com"));
        assert_eq!(parsed.path(), "/intent/tweet");
        let pairs: Vec<_> = parsed.query_pairs().collect();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].1, TEXT);
    }

    #[test]
    fn test_reddit_url_carries_page_and_title() {
        let url = intent_url(IntentPlatform::Reddit, TEXT, PAGE);
        let parsed = Url::parse(&url).unwrap();
        assert_eq!(parsed.host_str(), Some("www.reddit.com"));
        assert_eq!(parsed.path(), "/submit");
        let pairs: Vec<(String, String)> = parsed
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(pairs[0], ("url".to_string(), PAGE.to_string()));
        assert_eq!(pairs[1], ("title".to_string(), TEXT.to_string()));
    }
}
