//! One-shot messages carried across a redirect in a cookie.
//!
//! A handler that redirects attaches the cookie with [`redirect_with_flash`];
//! the next page that renders shows the messages and expires the cookie.

use std::future::{Ready, ready};

use actix_web::cookie::{Cookie, SameSite};
use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, http::header};

pub const FLASH_COOKIE: &str = "flash";

/// Messages flashed by the previous response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flashes(pub Vec<String>);

impl Flashes {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    fn decode(raw: &str) -> Self {
        urlencoding::decode(raw)
            .ok()
            .and_then(|json| serde_json::from_str::<Vec<String>>(&json).ok())
            .map(Flashes)
            .unwrap_or_default()
    }

    fn encode(messages: &[String]) -> String {
        let json = serde_json::to_string(messages).unwrap_or_else(|_| "[]".to_string());
        urlencoding::encode(&json).into_owned()
    }
}

impl FromRequest for Flashes {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let flashes = req
            .cookie(FLASH_COOKIE)
            .map(|c| Flashes::decode(c.value()))
            .unwrap_or_default();
        ready(Ok(flashes))
    }
}

fn base_cookie(value: String) -> Cookie<'static> {
    Cookie::build(FLASH_COOKIE, value)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

/// Cookie holding `messages` for the next page.
pub fn flash_cookie(messages: &[String]) -> Cookie<'static> {
    base_cookie(Flashes::encode(messages))
}

/// Cookie that expires any pending messages.
pub fn clear_flash_cookie() -> Cookie<'static> {
    let mut cookie = base_cookie(String::new());
    cookie.make_removal();
    cookie
}

/// 303 See Other to `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// 303 See Other to `location`, showing `message` there.
pub fn redirect_with_flash(location: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .cookie(flash_cookie(&[message.into()]))
        .finish()
}
