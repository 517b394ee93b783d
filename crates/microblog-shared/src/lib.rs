//! # Microblog Shared
//!
//! Form payloads posted by the HTML pages, and their field validation.

pub mod forms;

pub use forms::{
    EditProfileForm, FormErrors, LoginForm, LoginQuery, MAX_EMAIL_LENGTH, MAX_USERNAME_LENGTH,
    PageQuery, PostForm, RegistrationForm,
};
