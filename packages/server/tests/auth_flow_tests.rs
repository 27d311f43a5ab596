//! Integration tests for registration, login, and the password lifecycle.

mod common;

use common::{fixtures, TestHarness};
use server_core::common::Error;
use server_core::domains::auth::actions::{
    self as auth, ChangePasswordInput, LoginInput, RegisterInput, ResetPasswordInput,
};
use server_core::domains::users::actions as users;
use server_core::domains::users::models::User;
use server_core::kernel::{test_deps, test_deps_with, MockMailer, MockUploader};
use test_context::test_context;

fn register_input(email: &str) -> RegisterInput {
    RegisterInput {
        full_name: "Ada Lovelace".to_string(),
        email: email.to_string(),
        password: "correct horse".to_string(),
    }
}

// ============================================================================
// Registration
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn test_register_login_and_profile_roundtrip(ctx: &TestHarness) {
    let test = test_deps(ctx.db_pool.clone());
    let email = fixtures::unique_email("ada");

    let registered = auth::register_user(register_input(&email), &test.deps)
        .await
        .unwrap();
    assert_eq!(registered.user.email, email);
    assert!(!registered.user.is_admin);

    // The token it hands back verifies against the same service
    let claims = test
        .deps
        .jwt_service
        .verify_token(&registered.token)
        .unwrap();
    assert_eq!(claims.email, email);

    // The welcome mail went out
    assert!(test.mailer.sent_to(&email));

    let logged_in = auth::login_user(
        LoginInput {
            email: email.clone(),
            password: "correct horse".to_string(),
        },
        &test.deps,
    )
    .await
    .unwrap();
    assert_eq!(logged_in.user.id, registered.user.id);

    let profile = users::get_profile(registered.user.id, &test.deps)
        .await
        .unwrap();
    assert_eq!(profile.full_name, "Ada Lovelace");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_register_normalizes_email_case(ctx: &TestHarness) {
    let test = test_deps(ctx.db_pool.clone());
    let email = fixtures::unique_email("case");
    let mixed_case = email.to_uppercase();

    let registered = auth::register_user(register_input(&mixed_case), &test.deps)
        .await
        .unwrap();
    assert_eq!(registered.user.email, email);

    // Logging in with the original casing still works
    let logged_in = auth::login_user(
        LoginInput {
            email: mixed_case,
            password: "correct horse".to_string(),
        },
        &test.deps,
    )
    .await
    .unwrap();
    assert_eq!(logged_in.user.id, registered.user.id);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_register_rejects_duplicate_email(ctx: &TestHarness) {
    let test = test_deps(ctx.db_pool.clone());
    let email = fixtures::unique_email("dup");

    auth::register_user(register_input(&email), &test.deps)
        .await
        .unwrap();

    let err = auth::register_user(register_input(&email), &test.deps)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_register_rejects_short_password_and_bad_email(ctx: &TestHarness) {
    let test = test_deps(ctx.db_pool.clone());

    let mut input = register_input(&fixtures::unique_email("short"));
    input.password = "seven77".to_string();
    let err = auth::register_user(input, &test.deps).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let mut input = register_input("");
    input.email = "not-an-email".to_string();
    let err = auth::register_user(input, &test.deps).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    // Nothing was mailed for failed registrations
    assert!(test.mailer.sent().is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_admin_allowlist_grants_admin(ctx: &TestHarness) {
    let test = test_deps(ctx.db_pool.clone());

    // test_deps allowlists dean@university.edu; the check ignores case
    let registered = auth::register_user(
        RegisterInput {
            full_name: "The Dean".to_string(),
            email: "Dean@University.edu".to_string(),
            password: "correct horse".to_string(),
        },
        &test.deps,
    )
    .await
    .unwrap();

    assert!(registered.user.is_admin);
    let claims = test
        .deps
        .jwt_service
        .verify_token(&registered.token)
        .unwrap();
    assert!(claims.is_admin);

    // Clean up the fixed address so the test can rerun on a shared database
    sqlx::query("DELETE FROM users WHERE email = 'dean@university.edu'")
        .execute(&ctx.db_pool)
        .await
        .unwrap();
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_welcome_mail_failure_does_not_fail_registration(ctx: &TestHarness) {
    let test = test_deps_with(
        ctx.db_pool.clone(),
        MockUploader::new(),
        MockMailer::new().with_failure("smtp on fire"),
    );
    let email = fixtures::unique_email("unlucky");

    let registered = auth::register_user(register_input(&email), &test.deps)
        .await
        .unwrap();

    // The attempt was made, the failure swallowed
    assert!(test.mailer.sent_to(&email));
    assert!(!registered.token.is_empty());
}

// ============================================================================
// Login
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn test_login_failures_are_uniform(ctx: &TestHarness) {
    let test = test_deps(ctx.db_pool.clone());
    let email = fixtures::unique_email("uniform");
    fixtures::create_test_user(&ctx.db_pool, "Ada", &email, false)
        .await
        .unwrap();

    let wrong_password = auth::login_user(
        LoginInput {
            email: email.clone(),
            password: "wrong password".to_string(),
        },
        &test.deps,
    )
    .await
    .unwrap_err();

    let unknown_email = auth::login_user(
        LoginInput {
            email: fixtures::unique_email("ghost"),
            password: fixtures::TEST_PASSWORD.to_string(),
        },
        &test.deps,
    )
    .await
    .unwrap_err();

    // Same kind, same message: the response must not reveal which part failed
    match (&wrong_password, &unknown_email) {
        (Error::Unauthorized(a), Error::Unauthorized(b)) => assert_eq!(a, b),
        other => panic!("expected two Unauthorized errors, got {:?}", other),
    }
}

// ============================================================================
// Password change
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn test_change_password_flow(ctx: &TestHarness) {
    let test = test_deps(ctx.db_pool.clone());
    let email = fixtures::unique_email("changer");
    let user = fixtures::create_test_user(&ctx.db_pool, "Ada", &email, false)
        .await
        .unwrap();

    // Wrong old password is refused
    let err = auth::change_password(
        user.id,
        ChangePasswordInput {
            old_password: "not the password".to_string(),
            new_password: "brand new pass".to_string(),
        },
        &test.deps,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    auth::change_password(
        user.id,
        ChangePasswordInput {
            old_password: fixtures::TEST_PASSWORD.to_string(),
            new_password: "brand new pass".to_string(),
        },
        &test.deps,
    )
    .await
    .unwrap();

    // Old password no longer works, new one does
    assert!(auth::login_user(
        LoginInput {
            email: email.clone(),
            password: fixtures::TEST_PASSWORD.to_string(),
        },
        &test.deps,
    )
    .await
    .is_err());

    auth::login_user(
        LoginInput {
            email,
            password: "brand new pass".to_string(),
        },
        &test.deps,
    )
    .await
    .unwrap();
}

// ============================================================================
// Forgot / verify / reset
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn test_forgot_verify_reset_flow(ctx: &TestHarness) {
    let test = test_deps(ctx.db_pool.clone());
    let email = fixtures::unique_email("forgetful");
    fixtures::create_test_user(&ctx.db_pool, "Ada", &email, false)
        .await
        .unwrap();

    auth::forgot_password(&email, &test.deps).await.unwrap();
    assert!(test.mailer.sent_to(&email));

    // The emailed code is what landed on the row
    let user = User::find_by_email(&email, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();
    let code = user.reset_code.clone().unwrap();
    assert_eq!(code.len(), 4);
    assert!(test.mailer.sent()[0].html.contains(&code));

    // A wrong code is refused, without consuming the right one
    let err = auth::verify_reset_code(&email, "0000x", &test.deps)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    auth::verify_reset_code(&email, &code, &test.deps)
        .await
        .unwrap();

    auth::reset_password(
        ResetPasswordInput {
            email: email.clone(),
            code: code.clone(),
            new_password: "rebuilt password".to_string(),
        },
        &test.deps,
    )
    .await
    .unwrap();

    // The code was consumed
    let user = User::find_by_email(&email, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert!(user.reset_code.is_none());
    assert!(user.reset_code_expires_at.is_none());

    let err = auth::verify_reset_code(&email, &code, &test.deps)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    // And the new password works
    auth::login_user(
        LoginInput {
            email,
            password: "rebuilt password".to_string(),
        },
        &test.deps,
    )
    .await
    .unwrap();
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_forgot_password_unknown_email_is_not_found(ctx: &TestHarness) {
    let test = test_deps(ctx.db_pool.clone());

    let err = auth::forgot_password(&fixtures::unique_email("nobody"), &test.deps)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert!(test.mailer.sent().is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_reset_mail_failure_fails_the_request(ctx: &TestHarness) {
    let test = test_deps_with(
        ctx.db_pool.clone(),
        MockUploader::new(),
        MockMailer::new().with_failure("smtp on fire"),
    );
    let email = fixtures::unique_email("undelivered");
    fixtures::create_test_user(&ctx.db_pool, "Ada", &email, false)
        .await
        .unwrap();

    // Unlike the welcome mail, the reset mail IS the point of the request
    let err = auth::forgot_password(&email, &test.deps).await.unwrap_err();
    assert!(matches!(err, Error::Internal(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_expired_reset_code_is_rejected(ctx: &TestHarness) {
    let test = test_deps(ctx.db_pool.clone());
    let email = fixtures::unique_email("late");
    let user = fixtures::create_test_user(&ctx.db_pool, "Ada", &email, false)
        .await
        .unwrap();

    // Plant a code that expired an hour ago
    User::set_reset_code(
        user.id,
        "1234",
        chrono::Utc::now() - chrono::Duration::hours(1),
        &ctx.db_pool,
    )
    .await
    .unwrap();

    let err = auth::verify_reset_code(&email, "1234", &test.deps)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}
