//! The two HTML forms and their validation.
//!
//! Forms are rehydrated from the submitted body and validated as a whole; an
//! invalid form is redisplayed with the user's input and its [`FormErrors`],
//! and nothing is written.

use axum_extra::extract::CookieJar;
use cookie::{Cookie, SameSite};
use serde::Deserialize;

use crate::models::Review;

pub const CSRF_COOKIE: &str = "csrf_token";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("This field is required.")]
    Required,

    #[error("\"{0}\" is not a valid number.")]
    Format(String),

    #[error("The CSRF token is missing or invalid.")]
    Csrf,
}

/// Validation errors, keyed by the name of the offending field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormErrors(Vec<(&'static str, FieldError)>);

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|(name, _)| *name == field).map(|(_, err)| err)
    }

    fn push(&mut self, field: &'static str, err: FieldError) {
        self.0.push((field, err));
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FormErrors> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

/// Rating and review for a stored movie or a TMDB candidate.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct EditMovieForm {
    #[serde(default)]
    pub new_rating: String,
    #[serde(default)]
    pub new_review: String,
    #[serde(default)]
    pub csrf_token: String,
}

impl EditMovieForm {
    pub fn validate(&self, csrf_cookie: Option<&str>) -> Result<Review, FormErrors> {
        let mut errors = FormErrors::default();
        check_csrf(&mut errors, &self.csrf_token, csrf_cookie);

        let raw = self.new_rating.trim();
        let rating = match raw.parse::<f64>() {
            Ok(r) if r.is_finite() => Some(r),
            _ if raw.is_empty() => {
                errors.push("new_rating", FieldError::Required);
                None
            },
            _ => {
                errors.push("new_rating", FieldError::Format(raw.to_string()));
                None
            },
        };

        let review = self.new_review.trim();
        errors.into_result(|| Review {
            rating: rating.unwrap_or_default(),
            review: (!review.is_empty()).then(|| review.to_string()),
        })
    }
}

/// Title search that starts the add flow.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AddMovieForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub csrf_token: String,
}

impl AddMovieForm {
    /// Returns the search query.
    pub fn validate(&self, csrf_cookie: Option<&str>) -> Result<String, FormErrors> {
        let mut errors = FormErrors::default();
        check_csrf(&mut errors, &self.csrf_token, csrf_cookie);

        let title = self.title.trim();
        if title.is_empty() {
            errors.push("title", FieldError::Required);
        }
        errors.into_result(|| title.to_string())
    }
}

fn check_csrf(errors: &mut FormErrors, submitted: &str, cookie: Option<&str>) {
    match cookie {
        Some(expected) if !submitted.is_empty() && submitted == expected => {},
        _ => errors.push("csrf_token", FieldError::Csrf),
    }
}

pub fn csrf_cookie(jar: &CookieJar) -> Option<&str> {
    jar.get(CSRF_COOKIE).map(|c| c.value())
}

/// Returns the token to embed in a rendered form, issuing a new cookie when
/// the browser does not have one yet.
pub fn issue_csrf_token(jar: CookieJar) -> (CookieJar, String) {
    if let Some(token) = csrf_cookie(&jar) {
        let token = token.to_string();
        return (jar, token);
    }

    let token = uuid::Uuid::new_v4().simple().to_string();
    let cookie = Cookie::build((CSRF_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::hours(2));
    (jar.add(cookie), token)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "5d1c0c4e2f0a4e7b9a3b6c1d2e3f4a5b";

    fn edit(rating: &str, review: &str) -> EditMovieForm {
        EditMovieForm {
            new_rating: rating.to_string(),
            new_review: review.to_string(),
            csrf_token: TOKEN.to_string(),
        }
    }

    #[test]
    fn edit_accepts_numeric_rating() {
        let review = edit(" 7.5 ", "Great twist.").validate(Some(TOKEN)).unwrap();

        assert_eq!(review.rating, 7.5);
        assert_eq!(review.review.as_deref(), Some("Great twist."));
    }

    #[test]
    fn edit_rejects_non_numeric_rating() {
        let errors = edit("abc", "").validate(Some(TOKEN)).unwrap_err();

        assert_eq!(errors.get("new_rating"), Some(&FieldError::Format("abc".to_string())));
    }

    #[test]
    fn edit_rejects_missing_and_non_finite_rating() {
        let errors = edit("", "").validate(Some(TOKEN)).unwrap_err();
        assert_eq!(errors.get("new_rating"), Some(&FieldError::Required));

        let errors = edit("NaN", "").validate(Some(TOKEN)).unwrap_err();
        assert!(matches!(errors.get("new_rating"), Some(FieldError::Format(_))));
    }

    #[test]
    fn blank_review_is_stored_as_none() {
        let review = edit("6", "   ").validate(Some(TOKEN)).unwrap();
        assert_eq!(review.review, None);
    }

    #[test]
    fn csrf_token_must_match_cookie() {
        let errors = edit("6", "").validate(None).unwrap_err();
        assert_eq!(errors.get("csrf_token"), Some(&FieldError::Csrf));

        let errors = edit("6", "").validate(Some("other")).unwrap_err();
        assert_eq!(errors.get("csrf_token"), Some(&FieldError::Csrf));
    }

    #[test]
    fn add_requires_title() {
        let form = AddMovieForm { title: "  ".to_string(), csrf_token: TOKEN.to_string() };
        let errors = form.validate(Some(TOKEN)).unwrap_err();
        assert_eq!(errors.get("title"), Some(&FieldError::Required));

        let form = AddMovieForm { title: " Inception ".to_string(), csrf_token: TOKEN.to_string() };
        assert_eq!(form.validate(Some(TOKEN)).unwrap(), "Inception");
    }

    #[test]
    fn issued_token_is_reused() {
        let (jar, first) = issue_csrf_token(CookieJar::new());
        let (_, second) = issue_csrf_token(jar);

        assert_eq!(first.len(), 32);
        assert_eq!(first, second);
    }
}
