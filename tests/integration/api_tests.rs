//! API integration tests
//!
//! These talk to a running server with a live database and Redis, so
//! they are ignored by default. Run with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Register a throwaway customer and return its ID
async fn create_customer(client: &Client, username: &str) -> i64 {
    let response = client
        .post(format!("{}/customers", BASE_URL))
        .json(&json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "book_allowance": 3
        }))
        .send()
        .await
        .expect("Failed to send create customer request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No customer ID")
}

#[tokio::test]
#[ignore]
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
async fn test_list_books() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["books"].is_array());
    assert!(body["total"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_create_book_rejects_invalid_isbn() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({ "isbn": "not-an-isbn" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "InvalidIsbn");
}

#[tokio::test]
#[ignore]
async fn test_create_book_rejects_non_english_identifier() {
    let client = Client::new();

    // Valid ISBN, French registrant group
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({ "isbn": "9782226052575" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 422);
}

#[tokio::test]
#[ignore]
async fn test_create_and_delete_book() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "isbn": "978-1-59327-281-4",
            "copies": 2
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["isbn"], "9781593272814");

    // Detail view reports the registered copies
    let response = client
        .get(format!("{}/books/9781593272814", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let details: Value = response.json().await.expect("Failed to parse response");
    let nb_copies = details["nb_copies"].as_i64().unwrap();
    assert!(nb_copies >= 2);
    let authors = details["authors"].clone();
    let genres = details["genres"].clone();

    // Adding the same ISBN again returns the stored book unchanged and
    // only registers another copy
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({ "isbn": "1593272812", "copies": 1 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let again: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(again["isbn"], body["isbn"]);
    assert_eq!(again["title"], body["title"]);
    assert_eq!(again["created_at"], body["created_at"]);

    let response = client
        .get(format!("{}/books/9781593272814", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let details: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(details["nb_copies"].as_i64().unwrap(), nb_copies + 1);
    // No duplicate author or genre rows appear
    assert_eq!(details["authors"], authors);
    assert_eq!(details["genres"], genres);

    // Cleanup
    let response = client
        .delete(format!("{}/books/9781593272814", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_checkout_return_cycle() {
    let client = Client::new();
    let customer_id = create_customer(&client, "loan_cycle_tester").await;

    // Catalog a book with one copy
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({ "isbn": "9780306406157", "copies": 1 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    // Checkout
    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({ "customer_id": customer_id, "isbn": "9780306406157" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let loan: Value = response.json().await.expect("Failed to parse response");
    let loan_id = loan["id"].as_i64().expect("No loan ID");

    // A second checkout of the same book is refused
    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({ "customer_id": customer_id, "isbn": "9780306406157" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // The reading list now tracks the book as being read
    let response = client
        .get(format!("{}/customers/{}/reading-list", BASE_URL, customer_id))
        .send()
        .await
        .expect("Failed to send request");
    let entries: Value = response.json().await.expect("Failed to parse response");
    assert!(entries
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e["isbn"] == "9780306406157" && e["status"] == "R"));

    // Return
    let response = client
        .post(format!("{}/loans/{}/return", BASE_URL, loan_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // Returning again conflicts
    let response = client
        .post(format!("{}/loans/{}/return", BASE_URL, loan_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Cleanup
    let _ = client
        .delete(format!("{}/books/9780306406157", BASE_URL))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_renew_too_early_is_refused() {
    let client = Client::new();
    let customer_id = create_customer(&client, "renew_tester").await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({ "isbn": "9781581820089", "copies": 1 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({ "customer_id": customer_id, "isbn": "9781581820089" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let loan: Value = response.json().await.expect("Failed to parse response");
    let loan_id = loan["id"].as_i64().expect("No loan ID");

    // A fresh loan is a full duration away from its due date
    let response = client
        .post(format!("{}/loans/{}/renew", BASE_URL, loan_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);

    // Cleanup
    let _ = client
        .post(format!("{}/customers/{}/returns", BASE_URL, customer_id))
        .send()
        .await;
    let _ = client
        .delete(format!("{}/books/9781581820089", BASE_URL))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_bulk_return_closes_every_open_loan() {
    let client = Client::new();
    let customer_id = create_customer(&client, "bulk_return_tester").await;

    for isbn in ["9780134685991", "9780330284981"] {
        let response = client
            .post(format!("{}/books", BASE_URL))
            .json(&json!({ "isbn": isbn, "copies": 1 }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 201);

        let response = client
            .post(format!("{}/loans", BASE_URL))
            .json(&json!({ "customer_id": customer_id, "isbn": isbn }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 201);
    }

    let response = client
        .post(format!("{}/customers/{}/returns", BASE_URL, customer_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let returned = body["returned"].as_array().expect("Expected an array");
    assert_eq!(returned.len(), 2);
    assert!(returned.iter().all(|loan| loan["returned"] == true));

    // No loan remains open
    let response = client
        .get(format!("{}/customers/{}/loans", BASE_URL, customer_id))
        .send()
        .await
        .expect("Failed to send request");
    let open: Value = response.json().await.expect("Failed to parse response");
    assert!(open.as_array().unwrap().is_empty());

    // Both books moved to the read bucket
    let response = client
        .get(format!("{}/customers/{}/reading-list", BASE_URL, customer_id))
        .send()
        .await
        .expect("Failed to send request");
    let entries: Value = response.json().await.expect("Failed to parse response");
    for isbn in ["9780134685991", "9780330284981"] {
        assert!(entries
            .as_array()
            .unwrap()
            .iter()
            .any(|e| e["isbn"] == isbn && e["status"] == "D"));
    }

    // Cleanup
    for isbn in ["9780134685991", "9780330284981"] {
        let _ = client
            .delete(format!("{}/books/{}", BASE_URL, isbn))
            .send()
            .await;
    }
}

#[tokio::test]
#[ignore]
async fn test_overdue_listing_is_well_formed() {
    let client = Client::new();

    let response = client
        .get(format!("{}/loans/overdue", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    for loan in body.as_array().expect("Expected an array") {
        assert_eq!(loan["is_overdue"], true);
        assert_eq!(loan["warn_level"], "overdue");
    }
}
