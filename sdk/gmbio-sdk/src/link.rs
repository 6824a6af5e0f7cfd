//! Link classification by hostname.
//!
//! `classify` never fails: anything that does not parse as a URL with a
//! host is [`LinkType::Unknown`].

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Twitter,
    Instagram,
    Telegram,
    Github,
    Linkedin,
    Youtube,
    Facebook,
    Discord,
    Tiktok,
    Reddit,
    Website,
    Unknown,
}

/// Checked in order; first match wins.
const PATTERNS: &[(LinkType, &[&str])] = &[
    (LinkType::Twitter, &["twitter.com", "x.com"]),
    (LinkType::Instagram, &["instagram.com"]),
    (LinkType::Telegram, &["t.me", "telegram.me", "telegram.org"]),
    (LinkType::Github, &["github.com"]),
    (LinkType::Linkedin, &["linkedin.com"]),
    (LinkType::Youtube, &["youtube.com", "youtu.be"]),
    (LinkType::Facebook, &["facebook.com", "fb.com"]),
    (LinkType::Discord, &["discord.gg", "discord.com"]),
    (LinkType::Tiktok, &["tiktok.com"]),
    (LinkType::Reddit, &["reddit.com", "redd.it"]),
];

impl LinkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkType::Twitter => "twitter",
            LinkType::Instagram => "instagram",
            LinkType::Telegram => "telegram",
            LinkType::Github => "github",
            LinkType::Linkedin => "linkedin",
            LinkType::Youtube => "youtube",
            LinkType::Facebook => "facebook",
            LinkType::Discord => "discord",
            LinkType::Tiktok => "tiktok",
            LinkType::Reddit => "reddit",
            LinkType::Website => "website",
            LinkType::Unknown => "unknown",
        }
    }

    /// Human readable label for link buttons
    pub fn label(&self) -> &'static str {
        match self {
            LinkType::Twitter => "X (Twitter)",
            LinkType::Instagram => "Instagram",
            LinkType::Telegram => "Telegram",
            LinkType::Github => "GitHub",
            LinkType::Linkedin => "LinkedIn",
            LinkType::Youtube => "YouTube",
            LinkType::Facebook => "Facebook",
            LinkType::Discord => "Discord",
            LinkType::Tiktok => "TikTok",
            LinkType::Reddit => "Reddit",
            LinkType::Website => "Website",
            LinkType::Unknown => "Link",
        }
    }
}

impl std::fmt::Display for LinkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn classify(link: &str) -> LinkType {
    let trimmed = link.trim();
    let normalized = if has_http_scheme(trimmed) {
        Cow::Borrowed(trimmed)
    } else {
        Cow::Owned(format!("https://{trimmed}"))
    };

    let Ok(url) = Url::parse(&normalized) else {
        return LinkType::Unknown;
    };
    let Some(host) = url.host_str() else {
        return LinkType::Unknown;
    };

    let host = host.to_ascii_lowercase();
    let domain = host.strip_prefix("www.").unwrap_or(&host);

    for (kind, domains) in PATTERNS {
        if domains.iter().any(|d| matches_domain(domain, d)) {
            return *kind;
        }
    }

    if domain.contains('.') {
        LinkType::Website
    } else {
        LinkType::Unknown
    }
}

fn has_http_scheme(s: &str) -> bool {
    let lower = s.get(..8).unwrap_or(s).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// `host` is `domain` itself or a subdomain of it
fn matches_domain(host: &str, domain: &str) -> bool {
    match host.strip_suffix(domain) {
        Some(rest) => rest.is_empty() || rest.ends_with('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_domains_any_scheme_or_prefix() {
        let cases = [
            ("twitter.com/gm", LinkType::Twitter),
            ("https://x.com/gm", LinkType::Twitter),
            ("HTTP://WWW.Instagram.com/me", LinkType::Instagram),
            ("t.me/channel", LinkType::Telegram),
            ("https://telegram.org", LinkType::Telegram),
            ("www.github.com/solana-labs", LinkType::Github),
            ("https://gist.github.com/abc", LinkType::Github),
            ("linkedin.com/in/someone", LinkType::Linkedin),
            ("https://youtu.be/dQw4w9WgXcQ", LinkType::Youtube),
            ("m.youtube.com/watch?v=1", LinkType::Youtube),
            ("fb.com/page", LinkType::Facebook),
            ("discord.gg/invite", LinkType::Discord),
            ("https://www.tiktok.com/@user", LinkType::Tiktok),
            ("old.reddit.com/r/solana", LinkType::Reddit),
            ("redd.it/xyz", LinkType::Reddit),
        ];
        for (input, expected) in cases {
            assert_eq!(classify(input), expected, "input: {input}");
        }
    }

    #[test]
    fn test_lookalike_domains_are_websites() {
        assert_eq!(classify("https://nottwitter.com"), LinkType::Website);
        assert_eq!(classify("https://github.com.evil.io"), LinkType::Website);
        assert_eq!(classify("box.com"), LinkType::Website);
    }

    #[test]
    fn test_website_and_unknown_fallbacks() {
        assert_eq!(classify("https://example.com"), LinkType::Website);
        assert_eq!(classify("solana.com"), LinkType::Website);
        assert_eq!(classify("localhost"), LinkType::Unknown);
        assert_eq!(classify("Qufq"), LinkType::Unknown);
    }

    #[test]
    fn test_garbage_is_unknown() {
        for input in ["", "   ", "https://", "http://[::1", "ht!tp://%%%", "https://exa mple.com"] {
            assert_eq!(classify(input), LinkType::Unknown, "input: {input:?}");
        }
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        assert_eq!(classify("  github.com/x  "), LinkType::Github);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&LinkType::Github).unwrap();
        assert_eq!(json, "\"github\"");
        assert_eq!(LinkType::Linkedin.to_string(), "linkedin");
    }
}
