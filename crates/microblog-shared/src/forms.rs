//! Form payloads (`application/x-www-form-urlencoded`) and query strings.

use serde::Deserialize;

/// Longest accepted post body and "about me" text.
pub const MAX_TEXT_LENGTH: usize = 140;

/// Column widths of `users.username` and `users.email`.
pub const MAX_USERNAME_LENGTH: usize = 64;
pub const MAX_EMAIL_LENGTH: usize = 120;

const REQUIRED: &str = "This field is required.";

/// Validation messages keyed by form field, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: Vec<(&'static str, String)>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push((field, message.into()));
    }

    /// Messages for one field.
    pub fn field(&self, name: &str) -> impl Iterator<Item = &str> {
        self.errors
            .iter()
            .filter(move |(field, _)| *field == name)
            .map(|(_, msg)| msg.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    fn required(&mut self, field: &'static str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.add(field, REQUIRED);
            return false;
        }
        true
    }

    fn max_length(&mut self, field: &'static str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.add(field, format!("Field cannot be longer than {max} characters."));
        }
    }

    fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Loose structural email check: one `@`, something before it, a dotted domain after it.
fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Checkbox; absent when unticked.
    pub remember_me: Option<String>,
}

impl LoginForm {
    pub fn remember(&self) -> bool {
        self.remember_me.is_some()
    }

    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();
        errors.required("username", &self.username);
        errors.required("password", &self.password);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password2: String,
}

impl RegistrationForm {
    /// Field checks only; uniqueness is decided against the user store.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();
        if errors.required("username", &self.username) {
            errors.max_length("username", self.username.trim(), MAX_USERNAME_LENGTH);
        }
        if errors.required("email", &self.email) {
            let email = self.email.trim();
            if !looks_like_email(email) {
                errors.add("email", "Invalid email address.");
            }
            errors.max_length("email", email, MAX_EMAIL_LENGTH);
        }
        errors.required("password", &self.password);
        if errors.required("password2", &self.password2) && self.password2 != self.password {
            errors.add("password2", "Field must be equal to password.");
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditProfileForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub about_me: String,
}

impl EditProfileForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();
        if errors.required("username", &self.username) {
            errors.max_length("username", self.username.trim(), MAX_USERNAME_LENGTH);
        }
        errors.max_length("about_me", self.about_me.trim(), MAX_TEXT_LENGTH);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub post: String,
}

impl PostForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();
        if errors.required("post", &self.post) {
            errors.max_length("post", self.post.trim(), MAX_TEXT_LENGTH);
        }
        errors.into_result()
    }
}

/// `?page=N`. Anything that is not a positive integer means the first page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    pub fn page(&self) -> Option<u64> {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<u64>().ok())
            .filter(|p| *p >= 1)
    }
}

/// `?next=/path` carried from a protected page through the login form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

impl LoginQuery {
    /// The redirect target, only if it stays on this site.
    pub fn safe_next(&self) -> Option<&str> {
        self.next.as_deref().filter(|next| {
            next.starts_with('/') && !next.starts_with("//") && !next.starts_with("/\\")
        })
    }
}
