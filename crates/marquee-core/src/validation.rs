//! # Validation Module
//!
//! Input validation for the admin movie form and user accounts.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI argument parsing (clap)                                  │
//! │  └── Types, category names, numeric parsing                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields, lengths                                          │
//! │  └── Rating range, image URL shape                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Remote service                                               │
//! │  └── Assigns ids, may still refuse the write                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use marquee_core::validation::{validate_title, validate_rating};
//!
//! validate_title("Inception").unwrap();
//! validate_rating(4.5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::{ImageSource, MovieDraft, UserDraft};
use crate::{MAX_RATING, MIN_RATING};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted movie title.
pub const MAX_TITLE_LEN: usize = 200;

/// Longest accepted movie description.
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Username length bounds.
pub const MIN_USERNAME_LEN: usize = 3;
pub const MAX_USERNAME_LEN: usize = 50;

/// Shortest accepted password.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Whether a draft creates a new movie or replaces an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftMode {
    /// New movie: a poster is mandatory.
    Create,
    /// Replacement: an empty poster is allowed.
    Update,
}

// =============================================================================
// Movie Validators
// =============================================================================

/// Validates a movie title.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use marquee_core::validation::validate_title;
///
/// assert!(validate_title("Inception").is_ok());
/// assert!(validate_title("   ").is_err());
/// ```
pub fn validate_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: MAX_TITLE_LEN,
        });
    }

    Ok(())
}

/// Validates a movie description.
pub fn validate_description(description: &str) -> ValidationResult<()> {
    let description = description.trim();

    if description.is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

/// Validates a rating.
///
/// ## Rules
/// - Must be a finite number
/// - Between 0 and 5 inclusive
///
/// ## Example
/// ```rust
/// use marquee_core::validation::validate_rating;
///
/// assert!(validate_rating(0.0).is_ok());
/// assert!(validate_rating(5.0).is_ok());
/// assert!(validate_rating(5.5).is_err());
/// assert!(validate_rating(f64::NAN).is_err());
/// ```
pub fn validate_rating(rating: f64) -> ValidationResult<()> {
    if !rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: MIN_RATING,
            max: MAX_RATING,
        });
    }

    Ok(())
}

/// Validates a poster reference.
///
/// ## Rules
/// - Required when creating a movie
/// - Remote posters must be `http://` or `https://` URLs
/// - Inline posters must be `data:image/...;base64,` with a decodable payload
pub fn validate_image(image: &str, mode: DraftMode) -> ValidationResult<()> {
    match ImageSource::parse(image) {
        ImageSource::Missing => match mode {
            DraftMode::Create => Err(ValidationError::Required {
                field: "image".to_string(),
            }),
            DraftMode::Update => Ok(()),
        },
        ImageSource::Remote(url) => {
            if url.starts_with("http://") || url.starts_with("https://") {
                Ok(())
            } else {
                Err(ValidationError::InvalidFormat {
                    field: "image".to_string(),
                    reason: "must be an http(s) URL or an uploaded image".to_string(),
                })
            }
        }
        inline @ ImageSource::Inline { .. } => {
            let is_image = matches!(&inline, ImageSource::Inline { mime, .. } if mime.starts_with("image/"));
            if !is_image {
                return Err(ValidationError::InvalidFormat {
                    field: "image".to_string(),
                    reason: "uploaded file is not an image".to_string(),
                });
            }
            if inline.decode_inline().is_none() {
                return Err(ValidationError::InvalidFormat {
                    field: "image".to_string(),
                    reason: "uploaded image is not valid base64".to_string(),
                });
            }
            Ok(())
        }
    }
}

/// Validates a complete movie form. Stops at the first failing field.
pub fn validate_movie_draft(draft: &MovieDraft, mode: DraftMode) -> ValidationResult<()> {
    validate_title(&draft.title)?;
    validate_description(&draft.description)?;
    validate_image(&draft.image, mode)?;
    validate_rating(draft.rating)?;
    Ok(())
}

// =============================================================================
// User Validators
// =============================================================================

/// Validates a username (3 to 50 characters).
pub fn validate_username(username: &str) -> ValidationResult<()> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    let len = username.chars().count();
    if len < MIN_USERNAME_LEN {
        return Err(ValidationError::TooShort {
            field: "username".to_string(),
            min: MIN_USERNAME_LEN,
        });
    }
    if len > MAX_USERNAME_LEN {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: MAX_USERNAME_LEN,
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// Only the shape `local@domain` is checked.
///
/// ## Example
/// ```rust
/// use marquee_core::validation::validate_email;
///
/// assert!(validate_email("ana@example.com").is_ok());
/// assert!(validate_email("ana@").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@domain".to_string(),
        }),
    }
}

/// Validates a password (at least 6 characters).
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }

    Ok(())
}

/// Validates a registration form.
pub fn validate_user_draft(draft: &UserDraft) -> ValidationResult<()> {
    validate_username(&draft.username)?;
    validate_email(&draft.email)?;
    validate_password(&draft.password)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn draft() -> MovieDraft {
        MovieDraft {
            title: "Inception".to_string(),
            description: "Dreams within dreams".to_string(),
            image: "https://img.example/inception.png".to_string(),
            rating: 4.8,
            category: Category::TopRated,
        }
    }

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Inception").is_ok());
        assert!(validate_title(&"A".repeat(MAX_TITLE_LEN)).is_ok());

        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"A".repeat(MAX_TITLE_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(0.0).is_ok());
        assert!(validate_rating(2.5).is_ok());
        assert!(validate_rating(5.0).is_ok());

        assert!(validate_rating(-0.1).is_err());
        assert!(validate_rating(5.01).is_err());
        assert!(validate_rating(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_image() {
        assert!(validate_image("https://img.example/a.png", DraftMode::Create).is_ok());
        assert!(validate_image("data:image/png;base64,YWJj", DraftMode::Create).is_ok());
        assert!(validate_image("", DraftMode::Update).is_ok());

        assert!(validate_image("", DraftMode::Create).is_err());
        assert!(validate_image("ftp://img.example/a.png", DraftMode::Create).is_err());
        assert!(validate_image("data:text/plain;base64,YWJj", DraftMode::Create).is_err());
        assert!(validate_image("data:image/png;base64,***", DraftMode::Create).is_err());
    }

    #[test]
    fn test_validate_movie_draft() {
        assert!(validate_movie_draft(&draft(), DraftMode::Create).is_ok());

        let mut bad = draft();
        bad.rating = 9.0;
        let err = validate_movie_draft(&bad, DraftMode::Create).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));

        let mut bad = draft();
        bad.title.clear();
        let err = validate_movie_draft(&bad, DraftMode::Update).unwrap_err();
        assert!(matches!(err, ValidationError::Required { ref field } if field == "title"));
    }

    #[test]
    fn test_validate_user_fields() {
        assert!(validate_username("ana").is_ok());
        assert!(validate_username("an").is_err());
        assert!(validate_username(&"a".repeat(51)).is_err());

        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ana@@example.com").is_err());
        assert!(validate_email("plain").is_err());

        assert!(validate_password("secret").is_ok());
        assert!(validate_password("12345").is_err());
    }

    #[test]
    fn test_validate_user_draft() {
        let draft = UserDraft {
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "secret1".to_string(),
        };
        assert!(validate_user_draft(&draft).is_ok());

        let bad = UserDraft {
            email: "nope".to_string(),
            ..draft
        };
        assert!(validate_user_draft(&bad).is_err());
    }
}
