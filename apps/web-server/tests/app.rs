//! End-to-end tests: the full route table over an in-memory SQLite database.

use std::collections::BTreeMap;

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use migration::{Migrator, MigratorTrait};

use microblog_infra::database::connect;
use microblog_infra::{DatabaseConfig, JwtConfig};
use web_server::handlers::configure_routes;
use web_server::{AppConfig, AppState};

const PASSWORD: &str = "cat";

async fn state() -> AppState {
    let config = AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database: DatabaseConfig::new("sqlite::memory:"),
        posts_per_page: 3,
        auto_migrate: true,
        session: JwtConfig::default(),
    };
    let db = connect(&config.database).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    AppState::new(db, &config)
}

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(state().await))
                .configure(configure_routes),
        )
        .await
    };
}

/// Send a request from `browser` and let it keep the cookies it gets back.
macro_rules! call {
    ($app:expr, $browser:expr, $req:expr) => {{
        let req = $req.to_request();
        let resp = test::call_service(&$app, req).await;
        $browser.absorb(resp).await
    }};
}

/// Register `name` and sign in, returning the signed-in browser.
macro_rules! sign_up {
    ($app:expr, $name:expr) => {{
        let mut browser = Browser::default();
        let email = format!("{}@example.com", $name);
        let reply = call!(
            $app,
            browser,
            browser.post(
                "/register",
                &[
                    ("username", $name),
                    ("email", email.as_str()),
                    ("password", PASSWORD),
                    ("password2", PASSWORD),
                ],
            )
        );
        assert_eq!(reply.location.as_deref(), Some("/login"));
        let reply = call!(
            $app,
            browser,
            browser.post("/login", &[("username", $name), ("password", PASSWORD)])
        );
        assert_eq!(reply.location.as_deref(), Some("/index"));
        browser
    }};
}

struct Reply {
    status: StatusCode,
    location: Option<String>,
    body: String,
}

impl Reply {
    fn posts(&self) -> usize {
        self.body.matches(r#"class="post""#).count()
    }
}

/// Cookie jar that forwards `name=value` pairs like a browser does.
#[derive(Default)]
struct Browser {
    cookies: BTreeMap<String, String>,
}

impl Browser {
    fn with_cookies(&self, req: TestRequest) -> TestRequest {
        if self.cookies.is_empty() {
            return req;
        }
        let header = self
            .cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ");
        req.insert_header((header::COOKIE, header))
    }

    fn get(&self, uri: &str) -> TestRequest {
        self.with_cookies(TestRequest::get().uri(uri))
    }

    fn post(&self, uri: &str, form: &[(&str, &str)]) -> TestRequest {
        self.with_cookies(TestRequest::post().uri(uri).set_form(form))
    }

    fn has_session(&self) -> bool {
        self.cookies.contains_key("session")
    }

    async fn absorb<B: MessageBody>(&mut self, resp: ServiceResponse<B>) -> Reply {
        for value in resp.headers().get_all(header::SET_COOKIE) {
            let raw = value.to_str().unwrap();
            let pair = raw.split(';').next().unwrap();
            let (name, value) = pair.split_once('=').unwrap();
            if value.is_empty() {
                self.cookies.remove(name.trim());
            } else {
                self.cookies.insert(name.trim().to_string(), value.to_string());
            }
        }

        let status = resp.status();
        let location = resp
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = test::read_body(resp).await;

        Reply {
            status,
            location,
            body: String::from_utf8(body.to_vec()).unwrap(),
        }
    }
}

#[actix_web::test]
async fn test_anonymous_visitor_is_sent_to_login() {
    let app = app!();
    let mut anon = Browser::default();

    let reply = call!(app, anon, anon.get("/index"));
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(reply.location.as_deref(), Some("/login?next=%2Findex"));

    let reply = call!(app, anon, anon.get("/explore"));
    assert_eq!(reply.location.as_deref(), Some("/login?next=%2Fexplore"));

    let reply = call!(app, anon, anon.get("/login"));
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("Sign In"));
}

#[actix_web::test]
async fn test_register_then_post_to_own_feed() {
    let app = app!();
    let mut susan = sign_up!(app, "susan");
    assert!(susan.has_session());

    let reply = call!(app, susan, susan.get("/index"));
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("Hi, susan!"));
    // Flashed once after registering, shown on the first rendered page.
    assert!(reply.body.contains("Congratulations, you are now a registered user!"));

    let reply = call!(
        app,
        susan,
        susan.post("/index", &[("post", "The Avengers movie was so cool!")])
    );
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(reply.location.as_deref(), Some("/index"));

    let reply = call!(app, susan, susan.get("/index"));
    assert!(reply.body.contains("Your post is now live!"));
    assert!(reply.body.contains("The Avengers movie was so cool!"));

    let reply = call!(app, susan, susan.get("/index"));
    assert!(!reply.body.contains("Your post is now live!"));
}

#[actix_web::test]
async fn test_invalid_post_is_rerendered_with_errors() {
    let app = app!();
    let mut susan = sign_up!(app, "susan");

    let long = "x".repeat(141);
    let reply = call!(app, susan, susan.post("/index", &[("post", long.as_str())]));
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("Field cannot be longer than 140 characters."));
    assert!(reply.body.contains(&long));

    let reply = call!(app, susan, susan.post("/index", &[("post", "   ")]));
    assert!(reply.body.contains("This field is required."));
    assert_eq!(reply.posts(), 0);
}

#[actix_web::test]
async fn test_follow_brings_posts_into_the_feed() {
    let app = app!();
    let mut susan = sign_up!(app, "susan");
    let mut john = sign_up!(app, "john");
    let mut mary = sign_up!(app, "mary");

    call!(
        app,
        john,
        john.post("/index", &[("post", "Beautiful day in Portland!")])
    );

    let reply = call!(app, susan, susan.get("/index"));
    assert!(!reply.body.contains("Beautiful day in Portland!"));

    let reply = call!(app, susan, susan.post("/follow/john", &[]));
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(reply.location.as_deref(), Some("/user/john"));

    let reply = call!(app, susan, susan.get("/user/john"));
    assert!(reply.body.contains("You are following john!"));
    assert!(reply.body.contains("1 followers, 0 following."));
    assert!(reply.body.contains(r#"action="/unfollow/john""#));

    let reply = call!(app, susan, susan.get("/index"));
    assert!(reply.body.contains("Beautiful day in Portland!"));

    // mary follows nobody: not in her feed, but on explore.
    let reply = call!(app, mary, mary.get("/index"));
    assert!(!reply.body.contains("Beautiful day in Portland!"));
    let reply = call!(app, mary, mary.get("/explore"));
    assert!(reply.body.contains("Beautiful day in Portland!"));

    let reply = call!(app, susan, susan.post("/unfollow/john", &[]));
    assert_eq!(reply.location.as_deref(), Some("/user/john"));
    let reply = call!(app, susan, susan.get("/user/john"));
    assert!(reply.body.contains("You are not following john."));
    assert!(reply.body.contains("0 followers, 0 following."));

    let reply = call!(app, susan, susan.get("/index"));
    assert!(!reply.body.contains("Beautiful day in Portland!"));
}

#[actix_web::test]
async fn test_invalid_follow_targets_are_flashed() {
    let app = app!();
    let mut susan = sign_up!(app, "susan");

    let reply = call!(app, susan, susan.post("/follow/susan", &[]));
    assert_eq!(reply.location.as_deref(), Some("/user/susan"));
    let reply = call!(app, susan, susan.get("/user/susan"));
    assert!(reply.body.contains("You cannot follow yourself!"));
    assert!(reply.body.contains("0 followers, 0 following."));

    let reply = call!(app, susan, susan.post("/unfollow/susan", &[]));
    assert_eq!(reply.location.as_deref(), Some("/user/susan"));
    let reply = call!(app, susan, susan.get("/user/susan"));
    assert!(reply.body.contains("You cannot unfollow yourself!"));

    let reply = call!(app, susan, susan.post("/follow/nobody", &[]));
    assert_eq!(reply.location.as_deref(), Some("/index"));
    let reply = call!(app, susan, susan.get("/index"));
    assert!(reply.body.contains("User nobody not found."));
}

#[actix_web::test]
async fn test_unknown_profile_is_404() {
    let app = app!();
    let mut susan = sign_up!(app, "susan");

    let reply = call!(app, susan, susan.get("/user/nobody"));
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert!(reply.body.contains("File Not Found"));
}

#[actix_web::test]
async fn test_profile_pages_through_posts() {
    let app = app!();
    let mut john = sign_up!(app, "john");
    for i in 0..4 {
        let body = format!("john post {i}");
        call!(app, john, john.post("/index", &[("post", body.as_str())]));
    }

    let first = call!(app, john, john.get("/user/john"));
    assert_eq!(first.posts(), 3);
    assert!(first.body.contains(r#"href="/user/john?page=2""#));
    assert!(!first.body.contains("Newer posts"));

    let second = call!(app, john, john.get("/user/john?page=2"));
    assert_eq!(second.posts(), 1);
    assert!(second.body.contains(r#"href="/user/john?page=1""#));

    for i in 0..4 {
        let body = format!("john post {i}");
        assert!(first.body.contains(&body) || second.body.contains(&body));
    }

    let beyond = call!(app, john, john.get("/user/john?page=9"));
    assert_eq!(beyond.status, StatusCode::OK);
    assert_eq!(beyond.posts(), 0);

    let garbage = call!(app, john, john.get("/user/john?page=abc"));
    assert_eq!(garbage.posts(), 3);
}

#[actix_web::test]
async fn test_largest_page_number_renders_empty() {
    let app = app!();
    let mut john = sign_up!(app, "john");
    call!(app, john, john.post("/index", &[("post", "hello")]));

    for uri in [
        "/explore?page=18446744073709551615",
        "/index?page=18446744073709551615",
        "/user/john?page=18446744073709551615",
    ] {
        let reply = call!(app, john, john.get(uri));
        assert_eq!(reply.status, StatusCode::OK, "{uri}");
        assert_eq!(reply.posts(), 0, "{uri}");
        assert!(reply.body.contains("Newer posts"), "{uri}");
    }
}

#[actix_web::test]
async fn test_login_failures_and_next() {
    let app = app!();
    sign_up!(app, "john");
    let mut anon = Browser::default();

    let reply = call!(
        app,
        anon,
        anon.post("/login", &[("username", "john"), ("password", "dog")])
    );
    assert_eq!(reply.location.as_deref(), Some("/login"));
    assert!(!anon.has_session());
    let reply = call!(app, anon, anon.get("/login"));
    assert!(reply.body.contains("Invalid username or password"));

    let reply = call!(app, anon, anon.post("/login", &[("username", "john")]));
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("This field is required."));

    let reply = call!(
        app,
        anon,
        anon.post(
            "/login?next=%2Fuser%2Fjohn",
            &[("username", "john"), ("password", PASSWORD)]
        )
    );
    assert_eq!(reply.location.as_deref(), Some("/user/john"));
    assert!(anon.has_session());

    let reply = call!(app, anon, anon.get("/logout"));
    assert_eq!(reply.location.as_deref(), Some("/index"));
    assert!(!anon.has_session());
}

#[actix_web::test]
async fn test_offsite_next_is_ignored() {
    let app = app!();
    sign_up!(app, "john");
    let mut anon = Browser::default();

    let reply = call!(
        app,
        anon,
        anon.post(
            "/login?next=https%3A%2F%2Fevil.example",
            &[("username", "john"), ("password", PASSWORD)]
        )
    );
    assert_eq!(reply.location.as_deref(), Some("/index"));
}

#[actix_web::test]
async fn test_duplicate_registration_is_rejected() {
    let app = app!();
    sign_up!(app, "susan");
    let mut other = Browser::default();

    let reply = call!(
        app,
        other,
        other.post(
            "/register",
            &[
                ("username", "susan"),
                ("email", "new@example.com"),
                ("password", PASSWORD),
                ("password2", PASSWORD),
            ],
        )
    );
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("Please use a different username."));

    let reply = call!(
        app,
        other,
        other.post(
            "/register",
            &[
                ("username", "other"),
                ("email", "susan@example.com"),
                ("password", PASSWORD),
                ("password2", PASSWORD),
            ],
        )
    );
    assert!(reply.body.contains("Please use a different email address."));
}

#[actix_web::test]
async fn test_overlong_username_is_a_field_error() {
    let app = app!();
    let mut anon = Browser::default();
    let long = "u".repeat(200);

    let reply = call!(
        app,
        anon,
        anon.post(
            "/register",
            &[
                ("username", long.as_str()),
                ("email", "long@example.com"),
                ("password", PASSWORD),
                ("password2", PASSWORD),
            ],
        )
    );
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("Field cannot be longer than 64 characters."));

    // Nothing was stored under that name.
    let reply = call!(
        app,
        anon,
        anon.post("/login", &[("username", long.as_str()), ("password", PASSWORD)])
    );
    assert_eq!(reply.location.as_deref(), Some("/login"));
    assert!(!anon.has_session());

    let mut susan = sign_up!(app, "susan");
    let reply = call!(
        app,
        susan,
        susan.post("/edit_profile", &[("username", long.as_str()), ("about_me", "")])
    );
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("Field cannot be longer than 64 characters."));
}

#[actix_web::test]
async fn test_edit_profile() {
    let app = app!();
    let mut susan = sign_up!(app, "susan");
    sign_up!(app, "john");

    let reply = call!(
        app,
        susan,
        susan.post(
            "/edit_profile",
            &[("username", "susan"), ("about_me", "Portland native")]
        )
    );
    assert_eq!(reply.location.as_deref(), Some("/edit_profile"));

    let reply = call!(app, susan, susan.get("/edit_profile"));
    assert!(reply.body.contains("Your changes have been saved."));
    assert!(reply.body.contains(">Portland native</textarea>"));

    let reply = call!(app, susan, susan.get("/user/susan"));
    assert!(reply.body.contains("<p>Portland native</p>"));

    let reply = call!(
        app,
        susan,
        susan.post("/edit_profile", &[("username", "john"), ("about_me", "")])
    );
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("Please use a different username."));
}

#[actix_web::test]
async fn test_health() {
    let app = app!();
    let mut anon = Browser::default();

    let reply = call!(app, anon, anon.get("/health"));
    assert_eq!(reply.status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&reply.body).unwrap();
    assert_eq!(json["status"], "ok");
}
