//! Movie record model, download-link shapes, and admin input validation.
//!
//! The catalog has carried two incompatible download-link shapes over its
//! lifetime: a plain list of URLs (`link`) and a fixed set of named quality
//! variants (`downloadLinks`). Both are modelled by [`DownloadLinks`], but a
//! deployment accepts exactly one of them, chosen by [`LinkSchema`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::ValidateUrl;

use crate::error::CoreError;
use crate::types::{MovieId, Timestamp};

/// Message returned when name, image, or links are absent.
pub const MISSING_FIELDS: &str = "Missing required fields";

// ---------------------------------------------------------------------------
// Download links
// ---------------------------------------------------------------------------

/// Named quality variants. At least one must be present on a valid record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p480: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p720: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p1080: Option<String>,
}

impl QualityLinks {
    fn variants(&self) -> impl Iterator<Item = &String> {
        [&self.p480, &self.p720, &self.p1080]
            .into_iter()
            .filter_map(Option::as_ref)
    }
}

/// Download references of a movie.
///
/// Serialized externally tagged, so when flattened into [`MovieRecord`] the
/// wire shows either a `link` array or a `downloadLinks` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DownloadLinks {
    #[serde(rename = "link")]
    List(Vec<String>),
    #[serde(rename = "downloadLinks")]
    Qualities(QualityLinks),
}

impl DownloadLinks {
    pub fn schema(&self) -> LinkSchema {
        match self {
            DownloadLinks::List(_) => LinkSchema::List,
            DownloadLinks::Qualities(_) => LinkSchema::Qualities,
        }
    }
}

/// The single download-link shape a deployment stores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkSchema {
    /// Ordered list of URLs, wire field `link`.
    List,
    /// Named quality variants, wire field `downloadLinks`.
    #[default]
    Qualities,
}

impl LinkSchema {
    /// Wire field name carrying links of this shape.
    pub fn field(self) -> &'static str {
        match self {
            LinkSchema::List => "link",
            LinkSchema::Qualities => "downloadLinks",
        }
    }
}

impl fmt::Display for LinkSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkSchema::List => f.write_str("list"),
            LinkSchema::Qualities => f.write_str("qualities"),
        }
    }
}

impl FromStr for LinkSchema {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "list" | "link" => Ok(LinkSchema::List),
            "qualities" | "downloadlinks" => Ok(LinkSchema::Qualities),
            other => Err(format!(
                "unknown link schema '{other}' (expected 'list' or 'qualities')"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A persisted movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    pub id: MovieId,
    pub name: String,
    pub image: String,
    #[serde(flatten)]
    pub links: DownloadLinks,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MovieRecord {
    /// Build a record from validated input, stamping both timestamps with `now`.
    pub fn from_new(id: MovieId, input: NewMovie, now: Timestamp) -> Self {
        Self {
            id,
            name: input.name,
            image: input.image,
            links: input.links,
            created_at: now,
            updated_at: now,
        }
    }

    /// Full replace of the mutable attributes. `id` and `created_at` are kept.
    pub fn replace(&mut self, input: NewMovie, now: Timestamp) {
        self.name = input.name;
        self.image = input.image;
        self.links = input.links;
        self.updated_at = now;
    }
}

/// Validated create/update payload. Only produced by [`MovieInput::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovie {
    pub name: String,
    pub image: String,
    pub links: DownloadLinks,
}

/// Raw admin submission for create and full-replace update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieInput {
    pub name: Option<String>,
    pub image: Option<String>,
    pub link: Option<Vec<String>>,
    pub download_links: Option<QualityLinks>,
}

impl MovieInput {
    /// Check required fields and the link shape against the deployment schema.
    ///
    /// Values are trimmed; blank strings count as missing.
    pub fn validate(self, schema: LinkSchema) -> Result<NewMovie, CoreError> {
        let name = non_blank(self.name).ok_or_else(missing)?;
        let image = non_blank(self.image).ok_or_else(missing)?;

        let links = match (self.link, self.download_links) {
            (None, None) => return Err(missing()),
            (Some(_), Some(_)) => {
                return Err(CoreError::Validation(
                    "Provide either \"link\" or \"downloadLinks\", not both".into(),
                ))
            }
            (Some(list), None) => {
                let list: Vec<String> = list
                    .into_iter()
                    .map(|l| l.trim().to_string())
                    .collect();
                if list.is_empty() || list.iter().any(String::is_empty) {
                    return Err(missing());
                }
                DownloadLinks::List(list)
            }
            (None, Some(q)) => {
                let q = QualityLinks {
                    p480: non_blank(q.p480),
                    p720: non_blank(q.p720),
                    p1080: non_blank(q.p1080),
                };
                if q.variants().next().is_none() {
                    return Err(missing());
                }
                DownloadLinks::Qualities(q)
            }
        };

        if links.schema() != schema {
            return Err(CoreError::Validation(format!(
                "This catalog stores download links as \"{}\"",
                schema.field()
            )));
        }

        if !image.validate_url() {
            return Err(CoreError::Validation("image must be a valid URL".into()));
        }
        let bad_link = match &links {
            DownloadLinks::List(list) => list.iter().any(|l| !l.validate_url()),
            DownloadLinks::Qualities(q) => q.variants().any(|l| !l.validate_url()),
        };
        if bad_link {
            return Err(CoreError::Validation(
                "download links must be valid URLs".into(),
            ));
        }

        Ok(NewMovie { name, image, links })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn missing() -> CoreError {
    CoreError::Validation(MISSING_FIELDS.into())
}
