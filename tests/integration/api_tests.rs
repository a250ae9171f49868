//! API integration tests

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

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
async fn test_session_availability_check() {
    let client = Client::new();

    let response = client
        .post(format!("{}/availability/check", BASE_URL))
        .json(&json!({
            "resource": { "kind": "session", "date": "2030-01-15", "shift": "A" },
            "party_size": 1
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["available"].is_boolean());
    assert!(body["remaining_units"].as_i64().is_some());
}

#[tokio::test]
#[ignore]
async fn test_malformed_event_date_filter_is_a_bad_request() {
    let client = Client::new();

    let response = client
        .get(format!("{}/events?start_date=not-a-date", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_booking_on_full_shift_is_rejected() {
    let client = Client::new();

    // Fill the shift, then one more individual booking must come back 422
    let date = "2030-02-01";
    for i in 0..5 {
        let response = client
            .post(format!("{}/bookings", BASE_URL))
            .json(&json!({
                "resource": { "kind": "session", "date": date, "shift": "B" },
                "requester_name": format!("Visitor {}", i),
                "members": ["A", "B", "C"]
            }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 201);
    }

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&json!({
            "resource": { "kind": "session", "date": date, "shift": "B" },
            "requester_name": "Latecomer"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 422);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["decision"]["reason"], "fully booked");
}

#[tokio::test]
#[ignore]
async fn test_loan_extension_flow() {
    let client = Client::new();

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({
            "user_id": 1,
            "book_id1": 42
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let loan: Value = response.json().await.expect("Failed to parse response");
    let loan_id = loan["id"].as_i64().expect("No loan id");

    // Phase 1: propose
    let response = client
        .post(format!("{}/loans/{}/extend", BASE_URL, loan_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let proposal: Value = response.json().await.expect("Failed to parse response");

    // Phase 2: payment callback commits
    let response = client
        .post(format!("{}/payments/callback", BASE_URL))
        .json(&json!({
            "purpose": "extension",
            "status": "succeeded",
            "amount": 0,
            "proposal": proposal
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // Replaying the same callback must hit the stale guard
    let response = client
        .post(format!("{}/payments/callback", BASE_URL))
        .json(&json!({
            "purpose": "extension",
            "status": "succeeded",
            "amount": 0,
            "proposal": proposal
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_return_loan_twice_is_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({
            "user_id": 1,
            "book_id1": 43
        }))
        .send()
        .await
        .expect("Failed to send request");
    let loan: Value = response.json().await.expect("Failed to parse response");
    let loan_id = loan["id"].as_i64().expect("No loan id");

    let response = client
        .post(format!("{}/loans/{}/return", BASE_URL, loan_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .post(format!("{}/loans/{}/return", BASE_URL, loan_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_client_error());
}
