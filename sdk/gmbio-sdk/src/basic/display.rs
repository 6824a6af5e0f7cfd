//! Read-only view of a resolved profile.

use reqwest::Url;
use serde::Serialize;

use crate::error::{GmBioError, Result};
use crate::link::{classify, LinkType};
use crate::types::Profile;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum AvatarDisplay {
    Image(String),
    /// Upper-cased fallback text
    Initials(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayLink {
    pub url: String,
    pub kind: LinkType,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub username: String,
    pub bio: String,
    pub avatar: AvatarDisplay,
    pub links: Vec<DisplayLink>,
    /// Full base58 owner address
    pub address: String,
    pub short_address: String,
}

/// Build the view for `profile`. A side-store avatar URL takes precedence
/// over one carried on the profile.
pub fn render_profile(profile: &Profile, side_store_url: Option<&str>) -> ProfileView {
    let avatar = side_store_url
        .filter(|u| !u.is_empty())
        .or(profile.avatar.as_deref().filter(|u| !u.is_empty()))
        .map(|u| AvatarDisplay::Image(u.to_string()))
        .unwrap_or_else(|| AvatarDisplay::Initials(initials(&profile.username)));

    let links = profile
        .links
        .iter()
        .map(|url| {
            let kind = classify(url);
            DisplayLink {
                url: url.clone(),
                kind,
                label: kind.label(),
            }
        })
        .collect();

    let address = profile.owner.to_string();
    ProfileView {
        username: profile.username.clone(),
        bio: profile.bio.clone(),
        avatar,
        links,
        short_address: short_address(&address),
        address,
    }
}

/// First two characters, upper-cased
pub fn initials(username: &str) -> String {
    username.chars().take(2).collect::<String>().to_uppercase()
}

/// `abcd...wxyz`. Strings of eight characters or fewer are returned whole.
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 8 {
        return address.to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Public profile page: `<base>/u/<username>`.
pub fn share_url(base: &str, username: &str) -> Result<String> {
    let mut url =
        Url::parse(base).map_err(|e| GmBioError::Config(format!("app url {base:?}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| GmBioError::Config(format!("app url {base:?} cannot be a base")))?
        .pop_if_empty()
        .push("u")
        .push(username);
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::pubkey::Pubkey;

    fn profile() -> Profile {
        Profile {
            owner: Pubkey::new_unique(),
            username: "tQDR".into(),
            bio: "AHYs".into(),
            links: vec!["https://github.com/x".into(), "example.com".into(), "Qufq".into()],
            avatar: None,
        }
    }

    #[test]
    fn test_avatar_precedence() {
        let mut p = profile();
        assert_eq!(
            render_profile(&p, None).avatar,
            AvatarDisplay::Initials("TQ".into())
        );

        p.avatar = Some("https://chain/avatar.png".into());
        assert_eq!(
            render_profile(&p, None).avatar,
            AvatarDisplay::Image("https://chain/avatar.png".into())
        );
        assert_eq!(
            render_profile(&p, Some("https://gateway.pinata.cloud/ipfs/x")).avatar,
            AvatarDisplay::Image("https://gateway.pinata.cloud/ipfs/x".into())
        );
        assert_eq!(
            render_profile(&p, Some("")).avatar,
            AvatarDisplay::Image("https://chain/avatar.png".into())
        );
    }

    #[test]
    fn test_links_keep_order_and_kind() {
        let view = render_profile(&profile(), None);
        let kinds: Vec<_> = view.links.iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            vec![LinkType::Github, LinkType::Website, LinkType::Unknown]
        );
        assert_eq!(view.links[0].label, "GitHub");
        assert_eq!(view.links[1].url, "example.com");
    }

    #[test]
    fn test_address_forms() {
        let p = profile();
        let view = render_profile(&p, None);
        let full = p.owner.to_string();
        assert_eq!(view.address, full);
        assert_eq!(view.short_address.len(), 11);
        assert!(view.short_address.starts_with(&full[..4]));
        assert!(view.short_address.ends_with(&full[full.len() - 4..]));
        assert_eq!(short_address("abcd"), "abcd");
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("alice"), "AL");
        assert_eq!(initials("a"), "A");
        assert_eq!(initials(""), "");
        assert_eq!(initials("ñu"), "ÑU");
    }

    #[test]
    fn test_share_url() {
        assert_eq!(share_url("https://gm.bio", "alice").unwrap(), "https://gm.bio/u/alice");
        assert_eq!(share_url("https://gm.bio/", "alice").unwrap(), "https://gm.bio/u/alice");
        assert_eq!(
            share_url("http://localhost:3000/app", "bob").unwrap(),
            "http://localhost:3000/app/u/bob"
        );
        assert_eq!(share_url("https://gm.bio", "a b").unwrap(), "https://gm.bio/u/a%20b");
        assert!(share_url("not a url", "alice").is_err());
    }
}
