//! Fragments reused across pages.

use microblog_core::domain::{AuthoredPost, Page};
use microblog_shared::FormErrors;

use super::{attr, text, timestamp, user_path};

pub(super) fn post_list(page: &Page<AuthoredPost>) -> String {
    if page.is_empty() {
        return "<p>No posts here yet.</p>".to_string();
    }

    page.items
        .iter()
        .map(|item| {
            format!(
                r#"<table class="post"><tr><td><a href="{href}">{author}</a> said at {when}:<br>{body}</td></tr></table>"#,
                href = attr(&user_path(&item.author)),
                author = text(&item.author),
                when = timestamp(&item.post.timestamp),
                body = text(&item.post.body),
            )
        })
        .collect()
}

/// "Newer posts" / "Older posts" links. `base` may already carry a query.
pub(super) fn pager<T>(page: &Page<T>, base: &str) -> String {
    let link = |n: u64| {
        let sep = if base.contains('?') { '&' } else { '?' };
        attr(&format!("{base}{sep}page={n}"))
    };

    let newer = page
        .prev_num()
        .map(|n| format!(r#"<a href="{}">&larr; Newer posts</a>"#, link(n)))
        .unwrap_or_default();
    let older = page
        .next_num()
        .map(|n| format!(r#"<a href="{}">Older posts &rarr;</a>"#, link(n)))
        .unwrap_or_default();

    format!(r#"<nav class="pager"><span>{newer}</span><span>{older}</span></nav>"#)
}

pub(super) fn field_errors(errors: &FormErrors, field: &str) -> String {
    errors
        .field(field)
        .map(|msg| format!(r#"<br><span class="error">[{}]</span>"#, text(msg)))
        .collect()
}

/// A labelled single-line input with its validation messages.
pub(super) fn input(
    kind: &str,
    name: &str,
    label: &str,
    value: &str,
    errors: &FormErrors,
) -> String {
    format!(
        r#"<p><label for="{name}">{label}</label><br><input type="{kind}" id="{name}" name="{name}" value="{value}">{errors}</p>"#,
        value = attr(value),
        errors = field_errors(errors, name),
    )
}
