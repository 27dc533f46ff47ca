//! # Domain Types
//!
//! Core domain types used throughout Marquee.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Movie       │   │   MovieDraft    │   │      User       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (server)    │   │  (no id)        │   │  id (server)    │       │
//! │  │  title          │   │  title          │   │  username       │       │
//! │  │  description    │   │  description    │   │  email          │       │
//! │  │  image          │   │  image          │   │  password       │       │
//! │  │  rating 0..5    │   │  rating         │   └─────────────────┘       │
//! │  │  category       │   │  category       │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────────────────────┐         │
//! │  │    Category     │   │            ImageSource              │         │
//! │  │  Trending       │   │  Remote("https://...")              │         │
//! │  │  New            │   │  Inline { mime, data } (data URL)   │         │
//! │  │  TopRated       │   │  Missing                            │         │
//! │  └─────────────────┘   └─────────────────────────────────────┘         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lenient Wire Decoding
//! The mock REST service stores whatever the admin form posted, so an `id`
//! may come back as `"3"` or `3` and a `rating` as `4.5` or `"4.5"`. Both
//! shapes decode to the same canonical value.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Identifiers
// =============================================================================

/// Visitor accepting an identifier encoded as a JSON string or integer.
struct LenientIdVisitor;

impl<'de> Visitor<'de> for LenientIdVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or integer identifier")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }
}

macro_rules! lenient_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, TS)]
        #[ts(export)]
        pub struct $name(String);

        impl $name {
            /// Returns the identifier as a string slice.
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer.deserialize_any(LenientIdVisitor).map($name)
            }
        }
    };
}

lenient_id!(
    /// Movie identifier assigned by the remote service.
    ///
    /// Opaque, unique and stable. Only ever compared for equality.
    MovieId
);

lenient_id!(
    /// User identifier assigned by the remote service.
    UserId
);

// =============================================================================
// Rating
// =============================================================================

/// Deserializes a rating sent as a number or a numeric string.
///
/// An empty string decodes as `0.0`; anything else non-numeric is an error.
fn lenient_rating<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    struct RatingVisitor;

    impl<'de> Visitor<'de> for RatingVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number or numeric string")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            let v = v.trim();
            if v.is_empty() {
                return Ok(0.0);
            }
            v.parse::<f64>()
                .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
        }

        fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
            Ok(0.0)
        }
    }

    deserializer.deserialize_any(RatingVisitor)
}

// =============================================================================
// Category
// =============================================================================

/// Catalog section a movie is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Category {
    /// "Trending" carousel. Default for new movies.
    #[default]
    #[serde(rename = "trending")]
    Trending,
    /// "New Release" carousel.
    #[serde(rename = "new")]
    New,
    /// "Top Rated" carousel.
    #[serde(rename = "topRated")]
    TopRated,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 3] = [Category::Trending, Category::New, Category::TopRated];

    /// Returns the wire name of the category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Trending => "trending",
            Category::New => "new",
            Category::TopRated => "topRated",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trending" => Ok(Category::Trending),
            "new" | "new-release" | "new_release" => Ok(Category::New),
            "toprated" | "top-rated" | "top_rated" => Ok(Category::TopRated),
            _ => Err(ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: Category::ALL.iter().map(|c| c.as_str().to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Image Source
// =============================================================================

/// Prefix of an inlined image payload.
const DATA_URL_PREFIX: &str = "data:";

/// Where a movie poster comes from.
///
/// The wire format is a single string: either a remote URL or a
/// `data:<mime>;base64,<payload>` URL produced by a poster upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Poster hosted elsewhere.
    Remote(String),
    /// Poster inlined into the record.
    Inline { mime: String, data: String },
    /// No poster (the presentation layer shows a placeholder).
    Missing,
}

impl ImageSource {
    /// Classifies an image string.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return ImageSource::Missing;
        }

        if let Some(rest) = raw.strip_prefix(DATA_URL_PREFIX) {
            if let Some((mime, data)) = rest.split_once(";base64,") {
                return ImageSource::Inline {
                    mime: mime.to_string(),
                    data: data.to_string(),
                };
            }
        }

        ImageSource::Remote(raw.to_string())
    }

    /// Encodes raw image bytes as a data URL.
    ///
    /// ## Example
    /// ```rust
    /// use marquee_core::ImageSource;
    ///
    /// let url = ImageSource::encode_inline("image/png", b"abc");
    /// assert_eq!(url, "data:image/png;base64,YWJj");
    /// ```
    pub fn encode_inline(mime: &str, bytes: &[u8]) -> String {
        format!("{DATA_URL_PREFIX}{mime};base64,{}", STANDARD.encode(bytes))
    }

    /// Decodes the payload of an inline image.
    ///
    /// Returns `None` for remote or missing images and for payloads that are
    /// not valid base64.
    pub fn decode_inline(&self) -> Option<Vec<u8>> {
        match self {
            ImageSource::Inline { data, .. } => STANDARD.decode(data).ok(),
            _ => None,
        }
    }

    /// Guesses an image mime type from a file extension.
    pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
        match ext.to_lowercase().as_str() {
            "png" => Some("image/png"),
            "jpg" | "jpeg" => Some("image/jpeg"),
            "gif" => Some("image/gif"),
            "webp" => Some("image/webp"),
            "svg" => Some("image/svg+xml"),
            _ => None,
        }
    }

    /// Returns true if the image is inlined.
    pub fn is_inline(&self) -> bool {
        matches!(self, ImageSource::Inline { .. })
    }
}

// =============================================================================
// Movie
// =============================================================================

/// A movie in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Movie {
    /// Identifier assigned by the remote service.
    pub id: MovieId,

    /// Display title.
    pub title: String,

    /// Synopsis shown on the detail card.
    #[serde(default)]
    pub description: String,

    /// Remote URL or inline data URL (see [`ImageSource`]).
    #[serde(default)]
    pub image: String,

    /// Rating on a 0–5 scale.
    #[serde(default, deserialize_with = "lenient_rating")]
    #[ts(type = "number")]
    pub rating: f64,

    /// Catalog section.
    #[serde(default)]
    pub category: Category,
}

impl Movie {
    /// Classifies this movie's poster.
    #[inline]
    pub fn image_source(&self) -> ImageSource {
        ImageSource::parse(&self.image)
    }

    /// Returns the editable fields of this movie.
    pub fn to_draft(&self) -> MovieDraft {
        MovieDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            rating: self.rating,
            category: self.category,
        }
    }
}

// =============================================================================
// Movie Draft / Patch
// =============================================================================

/// The body sent to create or replace a movie (everything except the id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub rating: f64,
    #[serde(default)]
    pub category: Category,
}

impl MovieDraft {
    /// Attaches a server-assigned id.
    pub fn with_id(self, id: impl Into<MovieId>) -> Movie {
        Movie {
            id: id.into(),
            title: self.title,
            description: self.description,
            image: self.image,
            rating: self.rating,
            category: self.category,
        }
    }
}

/// A partial edit of an existing movie.
///
/// Fields left as `None` keep the current value. In particular an edit that
/// does not upload a new poster keeps the existing image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub rating: Option<f64>,
    pub category: Option<Category>,
}

impl MoviePatch {
    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.image.is_none()
            && self.rating.is_none()
            && self.category.is_none()
    }

    /// Produces the full replacement body for `movie`.
    pub fn apply_to(&self, movie: &Movie) -> MovieDraft {
        let mut draft = movie.to_draft();
        if let Some(title) = &self.title {
            draft.title = title.clone();
        }
        if let Some(description) = &self.description {
            draft.description = description.clone();
        }
        if let Some(image) = &self.image {
            draft.image = image.clone();
        }
        if let Some(rating) = self.rating {
            draft.rating = rating;
        }
        if let Some(category) = self.category {
            draft.category = category;
        }
        draft
    }
}

// =============================================================================
// Users
// =============================================================================

/// A registered user, as returned by the remote users resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    /// Stored in clear by the mock service. Never echoed back out.
    #[serde(default, skip_serializing)]
    pub password: String,
}

/// The body sent to register or update a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDraft {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login form input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Returns true if `user` carries exactly these credentials.
    pub fn matches(&self, user: &User) -> bool {
        user.username == self.username && user.password == self.password
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
