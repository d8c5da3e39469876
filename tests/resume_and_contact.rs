//! Integration tests for the resume gate and the contact form.

mod common;

use std::path::PathBuf;

use common::{TEST_ACCESS_CODE, get, post_form, register_user, spawn_app, spawn_app_with_resume};

const RESUME_BYTES: &[u8] = b"%PDF-1.4 fake resume for tests";

/// Write a uniquely named resume file for one test and return its path.
async fn temp_resume(tag: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("blog-test-resume-{}-{tag}.pdf", std::process::id()));
    tokio::fs::write(&path, RESUME_BYTES)
        .await
        .expect("write temp resume");
    path
}

// ============================================================================
// Resume gate
// ============================================================================

#[tokio::test]
async fn test_about_page_renders_the_form() {
    let t = spawn_app().await;

    let resp = get(&t.app, "/about", None).await;
    assert!(resp.status.is_success());
    assert!(resp.body.contains("access code"));
}

#[tokio::test]
async fn test_wrong_code_redirects_with_error() {
    let t = spawn_app().await;

    let resp = post_form(&t.app, "/about", &[("code", "not-the-code")], None).await;
    resp.assert_redirects_to("/about?error=bad_code");

    let about = get(&t.app, "/about?error=bad_code", None).await;
    assert!(about.body.contains("Incorrect code."));
}

#[tokio::test]
async fn test_correct_code_streams_the_file() {
    let path = temp_resume("correct-code").await;
    let t = spawn_app_with_resume(path).await;

    let resp = post_form(&t.app, "/about", &[("code", TEST_ACCESS_CODE)], None).await;

    assert!(resp.status.is_success());
    let disposition = resp.content_disposition.expect("attachment disposition");
    assert!(disposition.contains("attachment"));
    assert_eq!(resp.body.as_bytes(), RESUME_BYTES);
}

#[tokio::test]
async fn test_download_is_admin_only() {
    let path = temp_resume("download-gate").await;
    let t = spawn_app_with_resume(path).await;
    let admin = register_user(&t.app, "Admin", "admin@example.com", "admin password").await;
    let reader = register_user(&t.app, "Reader", "reader@example.com", "reader password").await;

    assert_eq!(get(&t.app, "/download", None).await.status, 403);
    assert_eq!(get(&t.app, "/download", Some(&reader)).await.status, 403);

    let resp = get(&t.app, "/download", Some(&admin)).await;
    assert!(resp.status.is_success());
    assert_eq!(resp.body.as_bytes(), RESUME_BYTES);
}

#[tokio::test]
async fn test_missing_resume_file_is_a_server_error() {
    let t = spawn_app().await; // configured with a nonexistent file

    let resp = post_form(&t.app, "/about", &[("code", TEST_ACCESS_CODE)], None).await;
    assert_eq!(resp.status, 500);
}

// ============================================================================
// Contact form
// ============================================================================

#[tokio::test]
async fn test_contact_page_renders_the_form() {
    let t = spawn_app().await;

    let resp = get(&t.app, "/contact", None).await;
    assert!(resp.status.is_success());
    assert!(resp.body.contains("Contact"));
}

#[tokio::test]
async fn test_contact_rejects_missing_fields() {
    let t = spawn_app().await;

    let resp = post_form(
        &t.app,
        "/contact",
        &[
            ("name", "Ada"),
            ("email", "ada@example.com"),
            ("phone", "555-0100"),
            ("message", "   "),
        ],
        None,
    )
    .await;

    assert!(resp.status.is_success());
    assert!(resp.body.contains("All fields are required."));
}

#[tokio::test]
async fn test_contact_surfaces_relay_failure() {
    // The test config points the email API at an unroutable address, so a
    // complete submission exercises the failure path without the network.
    let t = spawn_app().await;

    let resp = post_form(
        &t.app,
        "/contact",
        &[
            ("name", "Ada"),
            ("email", "ada@example.com"),
            ("phone", "555-0100"),
            ("message", "Hello there"),
        ],
        None,
    )
    .await;

    assert!(resp.status.is_success());
    assert!(resp.body.contains("could not be sent"));
    assert!(!resp.body.contains("Successfully sent"));
}
