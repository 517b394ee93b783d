//! Server-side HTML rendering.
//!
//! Pages are plain strings assembled with `format!`. Every user-supplied value
//! goes through [`text`] or [`attr`] before it is interpolated.

mod components;
mod pages;

use actix_web::HttpResponse;
use actix_web::http::header::ContentType;
use chrono::{DateTime, Utc};

use microblog_core::domain::User;

use crate::middleware::flash::{Flashes, clear_flash_cookie};

pub use pages::{
    edit_profile_page, error_page, explore_page, index_page, login_page, profile_page,
    register_page,
};

/// Escape for element content.
pub(crate) fn text(value: &str) -> String {
    html_escape::encode_text(value).into_owned()
}

/// Escape for a double-quoted attribute value.
pub(crate) fn attr(value: &str) -> String {
    html_escape::encode_double_quoted_attribute(value).into_owned()
}

/// Path segment for a username inside a URL.
pub(crate) fn user_path(username: &str) -> String {
    format!("/user/{}", urlencoding::encode(username))
}

pub(crate) fn timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// What every page needs besides its own body.
pub struct PageContext<'a> {
    pub title: &'a str,
    pub user: Option<&'a User>,
    pub flashes: &'a Flashes,
}

impl<'a> PageContext<'a> {
    pub fn new(title: &'a str, user: Option<&'a User>, flashes: &'a Flashes) -> Self {
        Self {
            title,
            user,
            flashes,
        }
    }
}

const STYLE: &str = "body{font-family:sans-serif;max-width:46em;margin:1em auto;padding:0 1em}\
nav a{margin-right:.6em}.flashes{color:#1b5e20}.error{color:#b71c1c}\
table.post td{vertical-align:top;padding:.3em 0}.pager{display:flex;justify-content:space-between}";

fn layout(ctx: &PageContext<'_>, body: &str) -> String {
    let nav_user = match ctx.user {
        Some(user) => format!(
            r#"<a href="{}">Profile</a><a href="/logout">Logout</a>"#,
            attr(&user_path(&user.username))
        ),
        None => r#"<a href="/login">Login</a>"#.to_string(),
    };

    let flashes = if ctx.flashes.is_empty() {
        String::new()
    } else {
        let items: String = ctx
            .flashes
            .iter()
            .map(|m| format!("<li>{}</li>", text(m)))
            .collect();
        format!(r#"<ul class="flashes">{items}</ul>"#)
    };

    let title = if ctx.title.is_empty() {
        "Welcome to Microblog".to_string()
    } else {
        format!("{} - Microblog", text(ctx.title))
    };

    format!(
        r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<nav>Microblog: <a href="/index">Home</a><a href="/explore">Explore</a>{nav_user}</nav>
<hr>
{flashes}
{body}
</body>
</html>
"#
    )
}

/// 200 OK with the page wrapped in the site layout. Flashed messages are
/// shown once, so their cookie is expired here.
pub fn render(ctx: &PageContext<'_>, body: &str) -> HttpResponse {
    let mut response = HttpResponse::Ok();
    response.content_type(ContentType::html());
    if !ctx.flashes.is_empty() {
        response.cookie(clear_flash_cookie());
    }
    response.body(layout(ctx, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_escapes_flashes_and_title() {
        let flashes = Flashes(vec!["<b>hi</b>".to_string()]);
        let ctx = PageContext::new("<script>", None, &flashes);

        let html = layout(&ctx, "");

        assert!(html.contains("<li>&lt;b&gt;hi&lt;/b&gt;</li>"));
        assert!(html.contains("&lt;script&gt; - Microblog"));
        assert!(html.contains(r#"href="/login""#));
    }

    #[test]
    fn test_user_path_encodes_username() {
        assert_eq!(user_path("john"), "/user/john");
        assert_eq!(user_path("a b"), "/user/a%20b");
    }
}
