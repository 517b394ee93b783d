//! Page bodies. Each returns the markup placed inside the layout.

use microblog_core::domain::{AuthoredPost, Page, User};
use microblog_core::services::FollowStats;
use microblog_shared::{EditProfileForm, FormErrors, LoginForm, RegistrationForm};

use super::components::{field_errors, input, pager, post_list};
use super::{attr, text, timestamp, user_path};

/// Home page: greeting, the post form and the personalized feed.
pub fn index_page(
    user: &User,
    draft: &str,
    errors: &FormErrors,
    feed: &Page<AuthoredPost>,
) -> String {
    format!(
        r#"<h1>Hi, {name}!</h1>
<form action="/index" method="post">
<p><label for="post">Say something</label><br>
<textarea id="post" name="post" cols="32" rows="4">{draft}</textarea>{errors}</p>
<p><input type="submit" value="Submit"></p>
</form>
{posts}
{pager}"#,
        name = text(&user.username),
        draft = text(draft),
        errors = field_errors(errors, "post"),
        posts = post_list(feed),
        pager = pager(feed, "/index"),
    )
}

pub fn explore_page(posts: &Page<AuthoredPost>) -> String {
    format!(
        "<h1>Explore</h1>\n{}\n{}",
        post_list(posts),
        pager(posts, "/explore")
    )
}

pub fn login_page(form: &LoginForm, errors: &FormErrors, next: Option<&str>) -> String {
    let action = match next {
        Some(next) => format!("/login?next={}", urlencoding::encode(next)),
        None => "/login".to_string(),
    };
    let checked = if form.remember() { " checked" } else { "" };

    format!(
        r#"<h1>Sign In</h1>
<form action="{action}" method="post">
{username}
{password}
<p><input type="checkbox" id="remember_me" name="remember_me" value="y"{checked}> <label for="remember_me">Remember Me</label></p>
<p><input type="submit" value="Sign In"></p>
</form>
<p>New User? <a href="/register">Click to Register!</a></p>"#,
        action = attr(&action),
        username = input("text", "username", "Username", &form.username, errors),
        password = input("password", "password", "Password", "", errors),
    )
}

pub fn register_page(form: &RegistrationForm, errors: &FormErrors) -> String {
    format!(
        r#"<h1>Register</h1>
<form action="/register" method="post">
{username}
{email}
{password}
{password2}
<p><input type="submit" value="Register"></p>
</form>"#,
        username = input("text", "username", "Username", &form.username, errors),
        email = input("text", "email", "Email", &form.email, errors),
        password = input("password", "password", "Password", "", errors),
        password2 = input("password", "password2", "Repeat Password", "", errors),
    )
}

/// Profile of `subject` as seen by `viewer`.
pub fn profile_page(
    viewer: &User,
    subject: &User,
    stats: &FollowStats,
    posts: &Page<AuthoredPost>,
) -> String {
    let about = subject
        .about_me
        .as_deref()
        .map(|about| format!("<p>{}</p>", text(about)))
        .unwrap_or_default();

    let path = user_path(&subject.username);
    let action = if viewer.id == subject.id {
        r#"<p><a href="/edit_profile">Edit your profile</a></p>"#.to_string()
    } else {
        let (verb, label) = if stats.viewer_follows {
            ("unfollow", "Unfollow")
        } else {
            ("follow", "Follow")
        };
        format!(
            r#"<form action="/{verb}/{name}" method="post"><input type="submit" value="{label}"></form>"#,
            name = attr(&urlencoding::encode(&subject.username)),
        )
    };

    format!(
        r#"<h1>User: {name}</h1>
{about}
<p>Last seen on: {seen}</p>
<p>{followers} followers, {following} following.</p>
{action}
<hr>
{posts}
{pager}"#,
        name = text(&subject.username),
        seen = timestamp(&subject.last_seen),
        followers = stats.followers,
        following = stats.following,
        posts = post_list(posts),
        pager = pager(posts, &path),
    )
}

pub fn edit_profile_page(form: &EditProfileForm, errors: &FormErrors) -> String {
    format!(
        r#"<h1>Edit Profile</h1>
<form action="/edit_profile" method="post">
{username}
<p><label for="about_me">About me</label><br>
<textarea id="about_me" name="about_me" cols="50" rows="4">{about}</textarea>{about_errors}</p>
<p><input type="submit" value="Submit"></p>
</form>"#,
        username = input("text", "username", "Username", &form.username, errors),
        about = text(&form.about_me),
        about_errors = field_errors(errors, "about_me"),
    )
}

/// Standalone page for error responses, which have no session or flashes.
pub fn error_page(title: &str, detail: &str) -> String {
    format!(
        r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>{title} - Microblog</title></head>
<body>
<nav>Microblog: <a href="/index">Home</a><a href="/explore">Explore</a></nav>
<hr>
<h1>{title}</h1>
<p>{detail}</p>
<p><a href="/index">Back</a></p>
</body>
</html>
"#,
        title = text(title),
        detail = text(detail),
    )
}
