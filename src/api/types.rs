//! Wire types for the portfolio backend.

use serde::{Deserialize, Serialize};

/// Placeholder answer used when the backend returns no text.
pub const EMPTY_ANSWER_PLACEHOLDER: &str = "…";

/// `POST /api/ask` request body.
#[derive(Debug, Clone, Serialize)]
pub struct AskRequest<'a> {
    pub q: &'a str,
}

/// `POST /api/ask` response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    pub a: Option<String>,
}

impl AskResponse {
    /// Answer text, with absent or empty answers replaced by the placeholder.
    pub fn into_answer(self) -> String {
        match self.a {
            Some(text) if !text.is_empty() => text,
            _ => EMPTY_ANSWER_PLACEHOLDER.to_string(),
        }
    }
}

/// `GET /api/ping` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct PingResponse {
    pub now: String,
}

/// Labelled outbound link on the profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProfileLink {
    pub label: String,
    pub url: String,
}

/// `GET /api/profile` response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub role: String,
    pub location: String,
    pub email: String,
    pub links: Vec<ProfileLink>,
    pub skills: Vec<String>,
}

impl Profile {
    /// Banner lines shown at boot and registered as the `brand` section.
    pub fn banner_lines(&self) -> Vec<String> {
        let mut lines = vec![self.name.clone(), self.role.clone()];
        if !self.location.is_empty() {
            lines.push(self.location.clone());
        }
        if !self.links.is_empty() {
            let links: Vec<String> = self
                .links
                .iter()
                .map(|link| format!("↗ {} <{}>", link.label, link.url))
                .collect();
            lines.push(links.join("  "));
        }
        if !self.skills.is_empty() {
            lines.push(format!("Skills: {}", self.skills.join(", ")));
        }
        if !self.email.is_empty() {
            lines.push(format!("Contact: {}", self.email));
        }
        lines
    }
}
