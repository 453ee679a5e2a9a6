use auth_adapters::PasswordScheme;
use axum::http::StatusCode;
use domains::{CredentialHasher, TokenIssuer, User, UserRepository};
use integration_tests::{Credentials, TestApp};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn signup_returns_the_user_without_the_password() {
    let app = TestApp::new();
    let credentials = Credentials::fake();

    let response = app.post("/api/signup", credentials.signup_body()).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["message"], "User created successfully");
    let user = &response.body["user"];
    assert_eq!(user["email"], credentials.email.as_str());
    assert_eq!(user["name"], credentials.name.as_str());
    assert!(user["adminId"].is_null());
    assert!(user.get("password").is_none());
    assert!(!response.body.to_string().contains("$2"));
}

#[tokio::test]
async fn duplicate_signup_is_rejected_and_creates_nothing() {
    let app = TestApp::new();
    let body = json!({ "name": "A", "email": "a@x.com", "password": "pw12345" });

    let first = app.post("/api/signup", body.clone()).await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app
        .post(
            "/api/signup",
            json!({ "name": "B", "email": "a@x.com", "password": "other" }),
        )
        .await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.error(), Some("User already exists"));

    let stored = app.store.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_eq!(stored.name, "A");
}

#[tokio::test]
async fn signup_requires_every_field() {
    let app = TestApp::new();
    for body in [
        json!({ "email": "a@x.com", "password": "pw" }),
        json!({ "name": "A", "password": "pw" }),
        json!({ "name": "A", "email": "a@x.com", "password": "" }),
    ] {
        let response = app.post("/api/signup", body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error(), Some("Name, email, and password are required"));
    }
}

#[tokio::test]
async fn login_issues_a_token_for_the_signed_up_user() {
    let app = TestApp::new();
    let user = app.signup_user().await;

    let response = app.post("/api/login", user.credentials.login_body()).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Login successful");
    assert_eq!(response.body["user"]["id"], user.id.to_string());
    assert!(response.body["user"]["admin"].is_null());
    assert!(response.body["user"].get("password").is_none());

    let token = response.body["token"].as_str().unwrap();
    let claims = app.tokens.verify(token).unwrap();
    assert_eq!(claims.user_id, user.id);
    assert!(!claims.admin);
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_unauthorized() {
    let app = TestApp::new();
    let user = app.signup_user().await;

    let wrong_password = app
        .post(
            "/api/login",
            json!({ "email": user.credentials.email, "password": "definitely-wrong" }),
        )
        .await;
    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.error(), Some("Invalid email or password"));

    let unknown = app
        .post(
            "/api/login",
            json!({ "email": "nobody@example.com", "password": "whatever" }),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.error(), Some("Invalid email or password"));
}

#[tokio::test]
async fn login_requires_email_and_password() {
    let app = TestApp::new();
    let response = app.post("/api/login", json!({ "email": "a@x.com" })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), Some("Email and password are required"));
}

#[tokio::test]
async fn promoted_users_log_in_as_admin() {
    let app = TestApp::new();
    let user = app.signup_user().await;
    let admin = app.auth.grant_admin(user.id).await.unwrap();

    let response = app.post("/api/login", user.credentials.login_body()).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["admin"]["id"], admin.id.to_string());
    assert_eq!(response.body["user"]["admin"]["userId"], user.id.to_string());
    let claims = app
        .tokens
        .verify(response.body["token"].as_str().unwrap())
        .unwrap();
    assert!(claims.admin);
}

#[tokio::test]
async fn argon2_deployments_still_accept_bcrypt_accounts() {
    let app = TestApp::with_scheme(PasswordScheme::Argon2);
    let legacy_hash = auth_adapters::SchemeHasher::new(PasswordScheme::Bcrypt { cost: 4 })
        .hash("legacy-pass")
        .await
        .unwrap();
    app.store
        .insert(&User {
            id: Uuid::new_v4(),
            name: "Legacy".into(),
            email: "legacy@example.com".into(),
            password_hash: legacy_hash,
            admin_id: None,
        })
        .await
        .unwrap();

    let response = app
        .post(
            "/api/login",
            json!({ "email": "legacy@example.com", "password": "legacy-pass" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let fresh = app.signup_user().await;
    let stored = app
        .store
        .find_by_email(&fresh.credentials.email)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.password_hash.starts_with("$argon2"));
}

#[tokio::test]
async fn a_whitespace_password_is_a_real_password() {
    let app = TestApp::new();
    let credentials = Credentials {
        password: "   ".into(),
        ..Credentials::fake()
    };

    let signup = app.post("/api/signup", credentials.signup_body()).await;
    assert_eq!(signup.status, StatusCode::CREATED, "{:?}", signup.body);

    let login = app.post("/api/login", credentials.login_body()).await;
    assert_eq!(login.status, StatusCode::OK);

    let blank = app
        .post(
            "/api/login",
            json!({ "email": credentials.email, "password": "" }),
        )
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn form_encoded_credentials_are_accepted() {
    let app = TestApp::new();
    let user = app.signup_user().await;
    let encoded = serde_urlencoded::to_string([
        ("email", user.credentials.email.as_str()),
        ("password", user.credentials.password.as_str()),
    ])
    .unwrap();

    let response = app.post_form("/api/login", &encoded).await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["user"]["id"], user.id.to_string());
    assert!(response.body["token"].is_string());
}

#[tokio::test]
async fn form_encoded_signup_creates_the_user() {
    let app = TestApp::new();

    let response = app
        .post_form("/api/signup", "name=Ada+Lovelace&email=ada%40example.com&password=pw12345")
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["user"]["name"], "Ada Lovelace");
    assert_eq!(response.body["user"]["email"], "ada@example.com");
}

