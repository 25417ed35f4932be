//! Share text for finished rounds

use crate::rating::format_score;

#[cfg(target_arch = "wasm32")]
const TWEET_INTENT: &str = "https://twitter.com/intent/tweet";

pub fn share_text(score: f64) -> String {
    format!(
        "I just drew a {} perfect circle at Perfect Circle Challenge! Can you beat me?",
        format_score(score)
    )
}

/// Tweet intent URL carrying the share text and the page link
#[cfg(target_arch = "wasm32")]
pub fn tweet_url(score: f64, page_url: &str) -> Option<String> {
    let text = String::from(js_sys::encode_uri_component(&share_text(score)));
    let url = String::from(js_sys::encode_uri_component(page_url));
    Some(format!("{}?text={}&url={}", TWEET_INTENT, text, url))
}

/// Native stub (no URI encoder without the browser)
#[cfg(not(target_arch = "wasm32"))]
pub fn tweet_url(_score: f64, _page_url: &str) -> Option<String> {
    None
}
