//! API integration tests
//!
//! These tests run against a live server at localhost:8080 with two seeded
//! users: `admin`/`admin` holding every catalog permission and
//! `borrower`/`borrower` with none. Run with: `cargo test -- --ignored`

use chrono::{Duration, Utc};
use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";

/// Helper to log in as one of the seeded users
async fn get_token_for(client: &Client, username: &str, password: &str) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": username,
            "password": password
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response
        .json()
        .await
        .expect("Failed to parse login response");
    body["token"]
        .as_str()
        .expect("No token in response")
        .to_string()
}

/// Helper to get an authenticated token for the seeded admin user
async fn get_auth_token(client: &Client) -> String {
    get_token_for(client, "admin", "admin").await
}

/// Id of the user a token belongs to
async fn current_user_id(client: &Client, token: &str) -> i64 {
    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to fetch current user");
    let body: Value = response.json().await.expect("Failed to parse user");
    body["id"].as_i64().expect("No user id")
}

/// Unique suffix so repeated runs against the same database do not collide
fn unique_suffix() -> String {
    format!("{}", Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

/// A 13-character ISBN that is unique per call
fn unique_isbn() -> String {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{:013}", nanos % 10_000_000_000_000)
}

async fn create_author(client: &Client, token: &str, last_name: &str) -> i64 {
    let response = client
        .post(format!("{}/catalog/authors", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "first_name": "Test",
            "last_name": last_name
        }))
        .send()
        .await
        .expect("Failed to create author");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse author");
    body["id"].as_i64().expect("No author id")
}

async fn create_book(client: &Client, token: &str, author_id: i64, isbn: &str) -> i64 {
    let response = client
        .post(format!("{}/catalog/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": format!("Test Book {}", isbn),
            "summary": "A book created by the integration tests",
            "isbn": isbn,
            "author_id": author_id
        }))
        .send()
        .await
        .expect("Failed to create book");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse book");
    body["id"].as_i64().expect("No book id")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_reports_database_reachable() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["username"], "admin");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_get_current_user() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["username"], "admin");
}

#[tokio::test]
#[ignore]
async fn test_index_visit_counter_increments_per_session() {
    let client = Client::new();

    let first = client
        .get(format!("{}/catalog", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(first.status().is_success());

    // The first visit issues a session cookie; replaying it must bump the
    // counter for that session only.
    let cookie = first
        .headers()
        .get("set-cookie")
        .expect("No session cookie issued")
        .to_str()
        .expect("Invalid cookie header")
        .split(';')
        .next()
        .expect("Empty cookie header")
        .to_string();

    let first_body: Value = first.json().await.expect("Failed to parse response");
    let first_visits = first_body["num_visits"].as_i64().expect("No visit count");
    assert_eq!(first_visits, 1);

    let second = client
        .get(format!("{}/catalog", BASE_URL))
        .header("Cookie", &cookie)
        .send()
        .await
        .expect("Failed to send request");
    assert!(second.status().is_success());

    let second_body: Value = second.json().await.expect("Failed to parse response");
    assert_eq!(second_body["num_visits"].as_i64(), Some(first_visits + 1));

    // A request without the cookie starts a fresh session back at 1.
    let fresh = client
        .get(format!("{}/catalog", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let fresh_body: Value = fresh.json().await.expect("Failed to parse response");
    assert_eq!(fresh_body["num_visits"].as_i64(), Some(1));
}

#[tokio::test]
#[ignore]
async fn test_genre_duplicate_is_case_insensitive() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let name = format!("Space Opera {}", unique_suffix());

    let response = client
        .post(format!("{}/catalog/genres", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to create genre");
    assert_eq!(response.status(), 201);

    let duplicate = client
        .post(format!("{}/catalog/genres", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": name.to_uppercase() }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(duplicate.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_isbn_rejected() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let author_id = create_author(&client, &token, &format!("Isbn{}", unique_suffix())).await;
    let isbn = unique_isbn();
    create_book(&client, &token, author_id, &isbn).await;

    let duplicate = client
        .post(format!("{}/catalog/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": "Duplicate ISBN",
            "summary": "Should be rejected",
            "isbn": isbn,
            "author_id": author_id
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(duplicate.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_isbn_must_be_thirteen_characters() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/catalog/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": "Short ISBN",
            "summary": "Should be rejected",
            "isbn": "12345"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_author_delete_blocked_while_books_exist() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let author_id = create_author(&client, &token, &format!("Keep{}", unique_suffix())).await;
    let book_id = create_book(&client, &token, author_id, &unique_isbn()).await;

    let blocked = client
        .delete(format!("{}/catalog/authors/{}", BASE_URL, author_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(blocked.status(), 409);

    let delete_book = client
        .delete(format!("{}/catalog/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(delete_book.status(), 204);

    let allowed = client
        .delete(format!("{}/catalog/authors/{}", BASE_URL, author_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(allowed.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_language_delete_clears_book_language() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let language = client
        .post(format!("{}/catalog/languages", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": format!("Lang {}", unique_suffix()) }))
        .send()
        .await
        .expect("Failed to create language");
    assert_eq!(language.status(), 201);
    let language_body: Value = language.json().await.expect("Failed to parse language");
    let language_id = language_body["id"].as_i64().expect("No language id");

    let author_id = create_author(&client, &token, &format!("Lang{}", unique_suffix())).await;
    let book = client
        .post(format!("{}/catalog/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": "Language Test Book",
            "summary": "Loses its language when the language is deleted",
            "isbn": unique_isbn(),
            "author_id": author_id,
            "language_id": language_id
        }))
        .send()
        .await
        .expect("Failed to create book");
    assert_eq!(book.status(), 201);
    let book_body: Value = book.json().await.expect("Failed to parse book");
    let book_id = book_body["id"].as_i64().expect("No book id");

    // Language deletes never conflict, referencing books fall back to null.
    let deleted = client
        .delete(format!("{}/catalog/languages/{}", BASE_URL, language_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(deleted.status(), 204);

    let detail = client
        .get(format!("{}/catalog/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to fetch book");
    assert!(detail.status().is_success());
    let detail_body: Value = detail.json().await.expect("Failed to parse book");
    assert!(detail_body["language"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_book_list_page_size_is_five() {
    let client = Client::new();

    let response = client
        .get(format!("{}/catalog/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["per_page"].as_i64(), Some(5));
    assert!(body["items"].as_array().expect("No items array").len() <= 5);
}

#[tokio::test]
#[ignore]
async fn test_book_write_requires_authentication() {
    let client = Client::new();

    let response = client
        .post(format!("{}/catalog/books", BASE_URL))
        .json(&json!({
            "title": "No Token",
            "summary": "Should be rejected",
            "isbn": unique_isbn()
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_renewal_defaults_to_three_weeks() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let author_id = create_author(&client, &token, &format!("Renew{}", unique_suffix())).await;
    let book_id = create_book(&client, &token, author_id, &unique_isbn()).await;

    let overdue_date = (Utc::now().date_naive() - Duration::days(3)).to_string();
    let instance = client
        .post(format!("{}/catalog/bookinstances", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "book_id": book_id,
            "imprint": "Test Press, 2020",
            "status": "onloan",
            "due_back": overdue_date
        }))
        .send()
        .await
        .expect("Failed to create instance");
    assert_eq!(instance.status(), 201);
    let instance_body: Value = instance.json().await.expect("Failed to parse instance");
    let instance_id = instance_body["id"].as_str().expect("No instance id");
    assert_eq!(instance_body["is_overdue"], true);

    let expected = (Utc::now().date_naive() + Duration::days(21)).to_string();

    let proposal = client
        .get(format!(
            "{}/catalog/bookinstances/{}/renew",
            BASE_URL, instance_id
        ))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to fetch proposal");
    assert!(proposal.status().is_success());
    let proposal_body: Value = proposal.json().await.expect("Failed to parse proposal");
    assert_eq!(proposal_body["proposed_due_back"].as_str(), Some(expected.as_str()));

    let renewed = client
        .post(format!(
            "{}/catalog/bookinstances/{}/renew",
            BASE_URL, instance_id
        ))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to renew");
    assert!(renewed.status().is_success());
    let renewed_body: Value = renewed.json().await.expect("Failed to parse renewal");
    assert_eq!(renewed_body["due_back"].as_str(), Some(expected.as_str()));
    assert_eq!(renewed_body["is_overdue"], false);
}

#[tokio::test]
#[ignore]
async fn test_book_delete_blocked_while_copies_exist() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let author_id = create_author(&client, &token, &format!("Copy{}", unique_suffix())).await;
    let book_id = create_book(&client, &token, author_id, &unique_isbn()).await;

    let instance = client
        .post(format!("{}/catalog/bookinstances", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "book_id": book_id,
            "imprint": "Test Press, 2021"
        }))
        .send()
        .await
        .expect("Failed to create instance");
    assert_eq!(instance.status(), 201);
    let instance_body: Value = instance.json().await.expect("Failed to parse instance");

    // New copies default to maintenance status.
    assert_eq!(instance_body["status"], "maintenance");

    let blocked = client
        .delete(format!("{}/catalog/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(blocked.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_my_loans_lists_only_own_borrowings() {
    let client = Client::new();
    let admin_token = get_auth_token(&client).await;
    let borrower_token = get_token_for(&client, "borrower", "borrower").await;
    let borrower_id = current_user_id(&client, &borrower_token).await;

    // Put a copy on loan to the second user so admin's list has something
    // to leak.
    let author_id = create_author(&client, &admin_token, &format!("Loan{}", unique_suffix())).await;
    let book_id = create_book(&client, &admin_token, author_id, &unique_isbn()).await;
    let due = (Utc::now().date_naive() + Duration::days(7)).to_string();

    let instance = client
        .post(format!("{}/catalog/bookinstances", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({
            "book_id": book_id,
            "imprint": "Test Press, 2022",
            "status": "onloan",
            "due_back": due,
            "borrower_id": borrower_id
        }))
        .send()
        .await
        .expect("Failed to create instance");
    assert_eq!(instance.status(), 201);
    let instance_body: Value = instance.json().await.expect("Failed to parse instance");
    let instance_id = instance_body["id"].as_str().expect("No instance id").to_string();

    let own = client
        .get(format!("{}/catalog/mybooks", BASE_URL))
        .header("Authorization", format!("Bearer {}", borrower_token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(own.status().is_success());
    let own_body: Value = own.json().await.expect("Failed to parse response");
    let own_loans = own_body["items"].as_array().expect("Expected a loan array");
    assert!(own_loans.iter().any(|loan| loan["id"] == instance_id.as_str()));
    for loan in own_loans {
        assert_eq!(loan["borrower_username"], "borrower");
        assert_eq!(loan["status"], "onloan");
    }

    // The same loan must not show up for a different borrower.
    let other = client
        .get(format!("{}/catalog/mybooks", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin_token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(other.status().is_success());
    let other_body: Value = other.json().await.expect("Failed to parse response");
    let other_loans = other_body["items"].as_array().expect("Expected a loan array");
    assert!(other_loans.iter().all(|loan| loan["id"] != instance_id.as_str()));
}

#[tokio::test]
#[ignore]
async fn test_all_loans_requires_mark_returned_permission() {
    let client = Client::new();

    let response = client
        .get(format!("{}/catalog/borrowed", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_api_author_list_is_open() {
    let client = Client::new();

    let response = client
        .get(format!("{}/api/v1/authors", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore]
async fn test_api_author_create_requires_authentication() {
    let client = Client::new();

    let unauthenticated = client
        .post(format!("{}/api/v1/authors", BASE_URL))
        .json(&json!({
            "first_name": "Ursula",
            "last_name": format!("Api{}", unique_suffix())
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(unauthenticated.status(), 401);

    let token = get_auth_token(&client).await;
    let authenticated = client
        .post(format!("{}/api/v1/authors", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "first_name": "Ursula",
            "last_name": format!("Api{}", unique_suffix())
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(authenticated.status(), 201);

    let body: Value = authenticated.json().await.expect("Failed to parse response");
    assert!(body["id"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_returning_a_copy_clears_loan_fields() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let borrower_id = current_user_id(&client, &token).await;

    let author_id = create_author(&client, &token, &format!("Return{}", unique_suffix())).await;
    let book_id = create_book(&client, &token, author_id, &unique_isbn()).await;
    let due = (Utc::now().date_naive() + Duration::days(14)).to_string();

    let instance = client
        .post(format!("{}/catalog/bookinstances", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "book_id": book_id,
            "imprint": "Test Press, 2023",
            "status": "onloan",
            "due_back": due,
            "borrower_id": borrower_id
        }))
        .send()
        .await
        .expect("Failed to create instance");
    assert_eq!(instance.status(), 201);
    let instance_body: Value = instance.json().await.expect("Failed to parse instance");
    let instance_id = instance_body["id"].as_str().expect("No instance id").to_string();

    // Returning the copy: explicit nulls clear the loan fields, which an
    // absent field would leave untouched.
    let returned = client
        .put(format!("{}/catalog/bookinstances/{}", BASE_URL, instance_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "status": "available",
            "due_back": null,
            "borrower_id": null
        }))
        .send()
        .await
        .expect("Failed to update instance");
    assert!(returned.status().is_success());
    let returned_body: Value = returned.json().await.expect("Failed to parse instance");
    assert_eq!(returned_body["status"], "available");
    assert!(returned_body["due_back"].is_null());
    assert!(returned_body["borrower_id"].is_null());
    assert_eq!(returned_body["is_overdue"], false);

    // An update that omits the loan fields leaves them alone.
    let relabelled = client
        .put(format!("{}/catalog/bookinstances/{}", BASE_URL, instance_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "imprint": "Test Press, 2nd ed." }))
        .send()
        .await
        .expect("Failed to update instance");
    assert!(relabelled.status().is_success());
    let relabelled_body: Value = relabelled.json().await.expect("Failed to parse instance");
    assert_eq!(relabelled_body["imprint"], "Test Press, 2nd ed.");
    assert!(relabelled_body["due_back"].is_null());
    assert!(relabelled_body["borrower_id"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_book_update_null_clears_language() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let language = client
        .post(format!("{}/catalog/languages", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": format!("Clear {}", unique_suffix()) }))
        .send()
        .await
        .expect("Failed to create language");
    assert_eq!(language.status(), 201);
    let language_body: Value = language.json().await.expect("Failed to parse language");
    let language_id = language_body["id"].as_i64().expect("No language id");

    let author_id = create_author(&client, &token, &format!("Clear{}", unique_suffix())).await;
    let book = client
        .post(format!("{}/catalog/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": "Clearable Language",
            "summary": "Loses its language on request",
            "isbn": unique_isbn(),
            "author_id": author_id,
            "language_id": language_id
        }))
        .send()
        .await
        .expect("Failed to create book");
    assert_eq!(book.status(), 201);
    let book_body: Value = book.json().await.expect("Failed to parse book");
    let book_id = book_body["id"].as_i64().expect("No book id");

    // An update that omits language_id keeps it.
    let untouched = client
        .put(format!("{}/catalog/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "title": "Clearable Language, revised" }))
        .send()
        .await
        .expect("Failed to update book");
    assert!(untouched.status().is_success());
    let untouched_body: Value = untouched.json().await.expect("Failed to parse book");
    assert_eq!(untouched_body["language_id"].as_i64(), Some(language_id));

    // An explicit null detaches the language.
    let cleared = client
        .put(format!("{}/catalog/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "language_id": null }))
        .send()
        .await
        .expect("Failed to update book");
    assert!(cleared.status().is_success());
    let cleared_body: Value = cleared.json().await.expect("Failed to parse book");
    assert!(cleared_body["language_id"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_instance_create_names_the_missing_reference() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let author_id = create_author(&client, &token, &format!("Ref{}", unique_suffix())).await;
    let book_id = create_book(&client, &token, author_id, &unique_isbn()).await;

    let bad_borrower = client
        .post(format!("{}/catalog/bookinstances", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "book_id": book_id,
            "imprint": "Test Press, 2024",
            "borrower_id": 999_999_999
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(bad_borrower.status(), 400);
    let borrower_body: Value = bad_borrower.json().await.expect("Failed to parse error");
    assert!(borrower_body["message"]
        .as_str()
        .expect("No error message")
        .contains("Borrower"));

    let bad_book = client
        .post(format!("{}/catalog/bookinstances", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "book_id": 999_999_999,
            "imprint": "Test Press, 2024"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(bad_book.status(), 400);
    let book_body: Value = bad_book.json().await.expect("Failed to parse error");
    assert!(book_body["message"]
        .as_str()
        .expect("No error message")
        .contains("Book"));
}
