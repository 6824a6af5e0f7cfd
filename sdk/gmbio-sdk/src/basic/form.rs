//! Editable profile form shared by the create and update flows.
//!
//! Field errors are recomputed on every edit and are only ever strings for
//! display. Whether a submit may proceed is decided by [`ProfileForm::plan`].

use gmbio_state::{MAX_BIO_LEN, MAX_LINKS, MAX_LINK_LEN, MAX_USERNAME_LEN};

use crate::error::{GmBioError, Result};
use crate::types::{LinkEntry, Profile};
use crate::upload::AvatarFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// Editing an existing profile, as last loaded
    Update(Profile),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkField {
    Title,
    Url,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkErrors {
    pub title: Option<String>,
    pub url: Option<String>,
}

impl LinkErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.url.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub username: Option<String>,
    pub bio: Option<String>,
    /// One entry per link row
    pub links: Vec<LinkErrors>,
    pub avatar: Option<String>,
}

impl FormErrors {
    /// Any field error that blocks submission. Avatar errors do not block;
    /// a rejected file is simply never staged.
    pub fn has_field_errors(&self) -> bool {
        self.username.is_some() || self.bio.is_some() || self.links.iter().any(|l| !l.is_empty())
    }
}

/// Arguments for `create_profile` plus the staged avatar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePlan {
    pub username: String,
    pub bio: String,
    pub links: Vec<String>,
    pub avatar: Option<AvatarFile>,
}

/// What differs from the loaded profile. `None` fields are unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub bio: Option<String>,
    pub links: Option<Vec<String>>,
    pub avatar: Option<AvatarFile>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.bio.is_none() && self.links.is_none() && self.avatar.is_none()
    }

    /// Bio or links changed, so an `update_profile` is needed
    pub fn touches_chain(&self) -> bool {
        self.bio.is_some() || self.links.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitPlan {
    Create(CreatePlan),
    Update(ProfileChanges),
    NoChanges,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileForm {
    mode: FormMode,
    username: String,
    bio: String,
    links: Vec<LinkEntry>,
    avatar: Option<AvatarFile>,
    errors: FormErrors,
}

impl Default for ProfileForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileForm {
    /// Empty create form with a single blank link row.
    pub fn new() -> Self {
        Self {
            mode: FormMode::Create,
            username: String::new(),
            bio: String::new(),
            links: vec![LinkEntry::default()],
            avatar: None,
            errors: FormErrors {
                links: vec![LinkErrors::default()],
                ..Default::default()
            },
        }
    }

    pub fn for_profile(profile: Profile) -> Self {
        let mut form = Self::new();
        form.load_profile(profile);
        form
    }

    /// Switch to update mode for `profile`, replacing every field.
    pub fn load_profile(&mut self, profile: Profile) {
        self.username = profile.username.clone();
        self.bio = profile.bio.clone();
        self.links = profile
            .links
            .iter()
            .map(|url| LinkEntry::new("", url.clone()))
            .collect();
        if self.links.is_empty() {
            self.links.push(LinkEntry::default());
        }
        self.avatar = None;
        self.mode = FormMode::Update(profile);
        self.revalidate();
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_update(&self) -> bool {
        matches!(self.mode, FormMode::Update(_))
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn bio(&self) -> &str {
        &self.bio
    }

    pub fn links(&self) -> &[LinkEntry] {
        &self.links
    }

    pub fn avatar(&self) -> Option<&AvatarFile> {
        self.avatar.as_ref()
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// Usernames are immutable once created; ignored in update mode.
    pub fn set_username(&mut self, value: impl Into<String>) {
        if self.is_update() {
            return;
        }
        self.username = value.into();
        self.errors.username = username_error(&self.username);
    }

    pub fn set_bio(&mut self, value: impl Into<String>) {
        self.bio = value.into();
        self.errors.bio = bio_error(&self.bio);
    }

    /// Appends a blank row. Returns false when already at the link limit.
    pub fn add_link(&mut self) -> bool {
        if self.links.len() >= MAX_LINKS {
            return false;
        }
        self.links.push(LinkEntry::default());
        self.errors.links.push(LinkErrors::default());
        true
    }

    /// Removes a row and its errors. The last remaining row is kept.
    pub fn remove_link(&mut self, index: usize) -> bool {
        if self.links.len() <= 1 || index >= self.links.len() {
            return false;
        }
        self.links.remove(index);
        self.errors.links.remove(index);
        true
    }

    pub fn update_link(&mut self, index: usize, field: LinkField, value: impl Into<String>) {
        let Some(link) = self.links.get_mut(index) else {
            return;
        };
        let value = value.into();
        let error = link_field_error(field, &value);
        let errors = &mut self.errors.links[index];
        match field {
            LinkField::Title => {
                link.title = value;
                errors.title = error;
            },
            LinkField::Url => {
                link.url = value;
                errors.url = error;
            },
        }
    }

    /// Stage an avatar for upload on the next submit. A file that fails
    /// type or size checks is not staged and its message is recorded.
    pub fn stage_avatar(&mut self, file: AvatarFile) -> bool {
        match file.validate() {
            Ok(()) => {
                self.avatar = Some(file);
                self.errors.avatar = None;
                true
            },
            Err(e) => {
                self.errors.avatar = Some(e.to_string());
                false
            },
        }
    }

    pub fn clear_avatar(&mut self) {
        self.avatar = None;
        self.errors.avatar = None;
    }

    /// URLs of rows with both a title and a URL, as sent by `create_profile`.
    pub fn valid_links(&self) -> Vec<String> {
        self.links
            .iter()
            .filter(|l| l.is_complete())
            .map(|l| l.url.trim().to_string())
            .collect()
    }

    /// Every non-blank URL in row order, as compared and sent on update.
    pub fn link_urls(&self) -> Vec<String> {
        self.links
            .iter()
            .map(|l| l.url.trim())
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Create-mode gate.
    pub fn is_form_valid(&self, wallet_connected: bool) -> bool {
        wallet_connected && self.create_blocker().is_none()
    }

    /// Differences from the loaded profile. Always empty in create mode.
    pub fn changes(&self) -> ProfileChanges {
        let FormMode::Update(profile) = &self.mode else {
            return ProfileChanges::default();
        };

        let bio = (self.bio != profile.bio).then(|| self.bio.clone());
        let urls = self.link_urls();
        let links = (urls != profile.links).then_some(urls);

        ProfileChanges {
            bio,
            links,
            avatar: self.avatar.clone(),
        }
    }

    pub fn has_changes(&self) -> bool {
        !self.changes().is_empty()
    }

    /// Decide what a submit should do without touching the network.
    pub fn plan(&self) -> Result<SubmitPlan> {
        match &self.mode {
            FormMode::Create => {
                if let Some(reason) = self.create_blocker() {
                    return Err(GmBioError::Validation(reason));
                }
                Ok(SubmitPlan::Create(CreatePlan {
                    username: self.username.clone(),
                    bio: self.bio.clone(),
                    links: self.valid_links(),
                    avatar: self.avatar.clone(),
                }))
            },
            FormMode::Update(_) => {
                let changes = self.changes();
                if changes.is_empty() {
                    return Ok(SubmitPlan::NoChanges);
                }
                if let Some(reason) = self.update_blocker(&changes) {
                    return Err(GmBioError::Validation(reason));
                }
                Ok(SubmitPlan::Update(changes))
            },
        }
    }

    fn create_blocker(&self) -> Option<String> {
        if self.username.trim().is_empty() {
            return Some("Username is required".into());
        }
        if let Some(e) = username_error(&self.username) {
            return Some(e);
        }
        if self.bio.trim().is_empty() {
            return Some("Bio is required".into());
        }
        if let Some(e) = bio_error(&self.bio) {
            return Some(e);
        }
        if !self.links.iter().any(LinkEntry::is_complete) {
            return Some("At least one link with a title and URL is required".into());
        }
        self.first_link_error()
    }

    fn update_blocker(&self, changes: &ProfileChanges) -> Option<String> {
        if changes.bio.is_some() {
            if let Some(e) = bio_error(&self.bio) {
                return Some(e);
            }
        }
        if changes.links.is_some() {
            return self.first_link_error();
        }
        None
    }

    fn first_link_error(&self) -> Option<String> {
        self.errors
            .links
            .iter()
            .find_map(|e| e.title.clone().or_else(|| e.url.clone()))
    }

    fn revalidate(&mut self) {
        self.errors = FormErrors {
            username: username_error(&self.username),
            bio: bio_error(&self.bio),
            links: self
                .links
                .iter()
                .map(|l| LinkErrors {
                    title: link_field_error(LinkField::Title, &l.title),
                    url: link_field_error(LinkField::Url, &l.url),
                })
                .collect(),
            avatar: None,
        };
    }
}

fn username_error(value: &str) -> Option<String> {
    (value.len() > MAX_USERNAME_LEN)
        .then(|| format!("Username must be {MAX_USERNAME_LEN} characters or less"))
}

fn bio_error(value: &str) -> Option<String> {
    (value.len() > MAX_BIO_LEN).then(|| format!("Bio must be {MAX_BIO_LEN} characters or less"))
}

fn link_field_error(field: LinkField, value: &str) -> Option<String> {
    let name = match field {
        LinkField::Title => "Title",
        LinkField::Url => "URL",
    };
    (value.len() > MAX_LINK_LEN).then(|| format!("{name} must be {MAX_LINK_LEN} characters or less"))
}
