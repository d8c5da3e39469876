//! Integration tests for registration, login, and logout.

mod common;

use common::{count_rows, get, login_user, post_form, register_user, spawn_app};

#[tokio::test]
async fn test_register_creates_user_and_logs_in() {
    let t = spawn_app().await;

    let cookie = register_user(&t.app, "Ada", "ada@example.com", "correct horse").await;

    assert_eq!(count_rows(&t.pool, "users").await, 1);

    // The new session is live: the listing greets a logged-in user
    let home = get(&t.app, "/", Some(&cookie)).await;
    assert!(home.status.is_success());
    assert!(home.body.contains("Log Out"));
    assert!(home.body.contains("Ada"));
}

#[tokio::test]
async fn test_duplicate_registration_creates_nothing_and_redirects_to_login() {
    let t = spawn_app().await;
    register_user(&t.app, "Ada", "ada@example.com", "correct horse").await;

    let resp = post_form(
        &t.app,
        "/register",
        &[
            ("name", "Imposter"),
            ("email", "ada@example.com"),
            ("password", "another pass"),
        ],
        None,
    )
    .await;

    resp.assert_redirects_to("/login?notice=registered");
    assert!(resp.set_cookie.is_none(), "no session for a failed signup");
    assert_eq!(count_rows(&t.pool, "users").await, 1);

    // The login page spells the notice out
    let login = get(&t.app, "/login?notice=registered", None).await;
    assert!(login.body.contains("already signed up"));
}

#[tokio::test]
async fn test_email_comparison_is_case_sensitive() {
    let t = spawn_app().await;
    register_user(&t.app, "Ada", "ada@example.com", "correct horse").await;

    // Different case is a different stored value, so a second row appears
    register_user(&t.app, "Ada", "Ada@example.com", "correct horse").await;
    assert_eq!(count_rows(&t.pool, "users").await, 2);
}

#[tokio::test]
async fn test_login_succeeds_with_correct_credentials() {
    let t = spawn_app().await;
    register_user(&t.app, "Ada", "ada@example.com", "correct horse").await;

    let cookie = login_user(&t.app, "ada@example.com", "correct horse").await;

    let home = get(&t.app, "/", Some(&cookie)).await;
    assert!(home.body.contains("Log Out"));
}

#[tokio::test]
async fn test_login_fails_with_wrong_password() {
    let t = spawn_app().await;
    register_user(&t.app, "Ada", "ada@example.com", "correct horse").await;

    let resp = post_form(
        &t.app,
        "/login",
        &[("email", "ada@example.com"), ("password", "wrong pass")],
        None,
    )
    .await;

    resp.assert_redirects_to("/login?error=bad_password");
    assert!(resp.set_cookie.is_none(), "no session after a bad password");

    let login = get(&t.app, "/login?error=bad_password", None).await;
    assert!(login.body.contains("Incorrect password."));
}

#[tokio::test]
async fn test_login_fails_with_unknown_email() {
    let t = spawn_app().await;

    let resp = post_form(
        &t.app,
        "/login",
        &[("email", "nobody@example.com"), ("password", "whatever1")],
        None,
    )
    .await;

    resp.assert_redirects_to("/login?error=unknown_email");
    assert!(resp.set_cookie.is_none(), "no session for an unknown email");

    let login = get(&t.app, "/login?error=unknown_email", None).await;
    assert!(login.body.contains("This email does not exist."));
}

#[tokio::test]
async fn test_registration_rejects_short_password() {
    let t = spawn_app().await;

    let resp = post_form(
        &t.app,
        "/register",
        &[
            ("name", "Ada"),
            ("email", "ada@example.com"),
            ("password", "short"),
        ],
        None,
    )
    .await;

    resp.assert_redirects_to("/register?error=weak_password");
    assert_eq!(count_rows(&t.pool, "users").await, 0);
}

#[tokio::test]
async fn test_logout_clears_the_session() {
    let t = spawn_app().await;
    let cookie = register_user(&t.app, "Ada", "ada@example.com", "correct horse").await;

    let resp = get(&t.app, "/logout", Some(&cookie)).await;
    resp.assert_redirects_to("/");

    let home = get(&t.app, "/", Some(&cookie)).await;
    assert!(home.body.contains("Log In"));
    assert!(!home.body.contains("Log Out"));
}

#[tokio::test]
async fn test_logout_without_a_session_is_harmless() {
    let t = spawn_app().await;

    let resp = get(&t.app, "/logout", None).await;
    resp.assert_redirects_to("/");
}
