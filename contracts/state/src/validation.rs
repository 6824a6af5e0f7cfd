//! Length checks enforced by the program.
//!
//! Lengths are measured in bytes, which is what the fixed account
//! allocation reserves.

use crate::{ProfileError, MAX_BIO_LEN, MAX_LINKS, MAX_LINK_LEN, MAX_USERNAME_LEN};

pub fn validate_username(username: &str) -> Result<(), ProfileError> {
    if username.len() > MAX_USERNAME_LEN {
        return Err(ProfileError::UsernameTooLong);
    }
    Ok(())
}

pub fn validate_bio(bio: &str) -> Result<(), ProfileError> {
    if bio.len() > MAX_BIO_LEN {
        return Err(ProfileError::BioTooLong);
    }
    Ok(())
}

pub fn validate_links(links: &[String]) -> Result<(), ProfileError> {
    if links.len() > MAX_LINKS {
        return Err(ProfileError::TooManyLinks);
    }
    if links.iter().any(|l| l.len() > MAX_LINK_LEN) {
        return Err(ProfileError::LinkTooLong);
    }
    Ok(())
}

/// Checks applied by `create_profile`, in the order the program applies them.
pub fn validate_create(username: &str, bio: &str, links: &[String]) -> Result<(), ProfileError> {
    validate_username(username)?;
    validate_bio(bio)?;
    validate_links(links)
}
