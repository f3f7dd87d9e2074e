//! Pattern matchers for URL-like runs, email addresses and camel case.
//!
//! All matchers are anchored at the start of the given string and return the
//! byte length of the longest acceptable match.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Scheme and host, where the host has at least one dot
static URL_HOST_RX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i:https?://)?((?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,})")
        .expect("valid url regex")
});

/// Optional port and path following a host
static URL_TAIL_RX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?::[0-9]{1,5})?(?:/[A-Za-z0-9\-._~:/?#\[\]@!$&'()*+,;=%]*)?")
        .expect("valid url tail regex")
});

static EMAIL_RX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}")
        .expect("valid email regex")
});

/// Top-level domains accepted at the end of a bare host
static TLDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "com", "net", "org", "edu", "gov", "mil", "int", "info", "biz", "name", "pro", "io",
        "co", "me", "tv", "cc", "ly", "ai", "app", "dev", "asia", "xyz", "online", "site",
        "shop", "store", "news", "blog", "mobi", "travel", "th", "us", "uk", "jp", "cn", "kr",
        "de", "fr", "it", "es", "nl", "ru", "in", "au", "ca", "sg", "my", "vn", "la", "kh",
        "mm", "id", "ph", "hk", "tw", "eu",
    ]
    .into_iter()
    .collect()
});

/// Trailing characters that end a sentence rather than a path
const URL_TRAILING_PUNCT: &[char] = &['.', ',', ';', ':', '!', '?', '\''];

/// Drop sentence punctuation from the end of a URL tail.
///
/// A closing parenthesis is kept when it balances an opening one in the path.
fn trim_url_tail(tail: &str) -> &str {
    let mut tail = tail;
    loop {
        let trimmed = tail.trim_end_matches(URL_TRAILING_PUNCT);
        if trimmed.ends_with(')') && trimmed.matches('(').count() < trimmed.matches(')').count() {
            tail = &trimmed[..trimmed.len() - 1];
        } else {
            return trimmed;
        }
    }
}

/// Check if `label` is a known top-level domain (case-insensitive)
pub fn is_tld(label: &str) -> bool {
    TLDS.contains(label.to_ascii_lowercase().as_str())
}

/// Match a URL-like run at the start of `text`.
///
/// Accepts an optional `http://`/`https://` scheme followed by a dotted host
/// whose last label is a known top-level domain, then an optional port and
/// path. Returns the byte length of the match.
pub fn match_url(text: &str) -> Option<usize> {
    let caps = URL_HOST_RX.captures(text)?;
    let host = caps.get(1)?;
    let host_str = host.as_str();

    // Longest host prefix that ends in a known TLD
    let mut label_ends: Vec<usize> = host_str.match_indices('.').map(|(i, _)| i).collect();
    label_ends.push(host_str.len());
    let host_end = label_ends
        .iter()
        .rev()
        .copied()
        .find(|&end| {
            let prefix = &host_str[..end];
            match prefix.rfind('.') {
                Some(dot) => {
                    let tld = &prefix[dot + 1..];
                    tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()) && is_tld(tld)
                }
                None => false,
            }
        })?;

    let mut end = host.start() + host_end;
    if host_end == host_str.len() {
        if let Some(tail) = URL_TAIL_RX.find(&text[end..]) {
            end += trim_url_tail(tail.as_str()).len();
        }
    }
    Some(end)
}

/// Check if the whole of `text` is a URL-like run
pub fn is_url(text: &str) -> bool {
    !text.is_empty() && match_url(text) == Some(text.len())
}

/// Match an email address at the start of `text`, returning its byte length
pub fn match_email(text: &str) -> Option<usize> {
    EMAIL_RX.find(text).map(|m| m.end())
}

/// Check if the whole of `text` is an email address
pub fn is_email(text: &str) -> bool {
    !text.is_empty() && match_email(text) == Some(text.len())
}

/// Split `text` before every uppercase letter that follows a lowercase one.
///
/// Runs of capitals are never split, so `"KOMCHADLUEK"` stays whole.
pub fn expand_camel_case_to_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;

    for (i, c) in text.char_indices() {
        if let Some(p) = prev {
            if p.is_lowercase() && c.is_uppercase() {
                tokens.push(&text[start..i]);
                start = i;
            }
        }
        prev = Some(c);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}
