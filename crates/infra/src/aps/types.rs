//! Wire shapes of the APS endpoints this crate calls.

use attrsync_domain::constants::UNKNOWN_DISPLAY_NAME;
use attrsync_domain::{EntryKind, FolderEntry};
use serde::{Deserialize, Serialize};

/// Form body of the client-credentials token request.
#[derive(Debug, Serialize)]
pub(crate) struct TokenRequest<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub grant_type: &'static str,
    pub scope: &'static str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 {
    3599
}

/// One page of `GET .../folders/{id}/contents`.
#[derive(Debug, Deserialize)]
pub(crate) struct FolderContents {
    #[serde(default)]
    pub data: Vec<ContentResource>,
    #[serde(default)]
    pub links: Option<PageLinks>,
}

impl FolderContents {
    pub fn next_page(&self) -> Option<&str> {
        self.links.as_ref()?.next.as_ref().map(|link| link.href.as_str())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PageLinks {
    #[serde(default)]
    pub next: Option<Link>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Link {
    pub href: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContentResource {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    #[serde(default)]
    pub attributes: ContentAttributes,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ContentAttributes {
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

impl From<ContentResource> for FolderEntry {
    fn from(resource: ContentResource) -> Self {
        let kind = match resource.kind.as_str() {
            "items" => EntryKind::File,
            "folders" => EntryKind::Folder,
            _ => EntryKind::Other(resource.kind),
        };
        Self {
            id: resource.id,
            display_name: resource
                .attributes
                .display_name
                .unwrap_or_else(|| UNKNOWN_DISPLAY_NAME.to_string()),
            kind,
        }
    }
}

/// `GET .../items/{id}/tip`
#[derive(Debug, Deserialize)]
pub(crate) struct TipResponse {
    pub data: TipVersion,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TipVersion {
    pub id: String,
}
