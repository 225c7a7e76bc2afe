//! API integration tests
//!
//! These run against a live server with a seeded database.
//! Run with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

async fn create_product(client: &Client, name: &str, quantity: i32, lock_days: i32) -> i64 {
    let response = client
        .post(format!("{}/products", BASE_URL))
        .json(&json!({
            "name": name,
            "quantity": quantity,
            "lock_period_days": lock_days
        }))
        .send()
        .await
        .expect("Failed to create product");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No product ID")
}

async fn delete_product(client: &Client, id: i64) {
    let _ = client
        .delete(format!("{}/products/{}", BASE_URL, id))
        .send()
        .await;
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
async fn test_availability_of_unbooked_product() {
    let client = Client::new();
    let product_id = create_product(&client, "Test Tripod", 4, 0).await;

    let response = client
        .get(format!(
            "{}/products/{}/availability?start_date=2031-01-01&end_date=2031-01-05&quantity=4",
            BASE_URL, product_id
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["is_available"], true);
    assert_eq!(body["booked_quantity"], 0);
    assert_eq!(body["remaining_quantity"], 4);

    delete_product(&client, product_id).await;
}

#[tokio::test]
#[ignore]
async fn test_availability_rejects_inverted_range() {
    let client = Client::new();
    let product_id = create_product(&client, "Test Slider", 1, 0).await;

    let response = client
        .get(format!(
            "{}/products/{}/availability?start_date=2031-01-05&end_date=2031-01-01&quantity=1",
            BASE_URL, product_id
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    delete_product(&client, product_id).await;
}

#[tokio::test]
#[ignore]
async fn test_overlapping_booking_blocks_availability() {
    let client = Client::new();
    let product_id = create_product(&client, "Test Camera A", 2, 0).await;

    // Booking takes both units over Jan 1-5
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&json!({
            "customer_name": "Ada Test",
            "customer_email": "ada@example.com",
            "items": [{
                "product_id": product_id,
                "start_date": "2031-01-01",
                "end_date": "2031-01-05",
                "quantity": 2
            }]
        }))
        .send()
        .await
        .expect("Failed to create booking");
    assert_eq!(response.status(), 201);

    // A request inside the window finds nothing left
    let response = client
        .get(format!(
            "{}/products/{}/availability?start_date=2031-01-03&end_date=2031-01-04&quantity=1",
            BASE_URL, product_id
        ))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["is_available"], false);
    assert_eq!(body["remaining_quantity"], 0);
}

#[tokio::test]
#[ignore]
async fn test_lock_period_extends_blocked_window() {
    let client = Client::new();
    let product_id = create_product(&client, "Test Camera B", 1, 3).await;

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&json!({
            "customer_name": "Grace Test",
            "customer_email": "grace@example.com",
            "items": [{
                "product_id": product_id,
                "start_date": "2031-01-01",
                "end_date": "2031-01-05",
                "quantity": 1
            }]
        }))
        .send()
        .await
        .expect("Failed to create booking");
    assert_eq!(response.status(), 201);

    // Jan 6-8 falls inside the 3-day lock window after Jan 5
    let response = client
        .get(format!(
            "{}/products/{}/availability?start_date=2031-01-06&end_date=2031-01-08&quantity=1",
            BASE_URL, product_id
        ))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["is_available"], false);

    // From Jan 9 the product is free again
    let response = client
        .get(format!(
            "{}/products/{}/availability?start_date=2031-01-09&end_date=2031-01-12&quantity=1",
            BASE_URL, product_id
        ))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["is_available"], true);
}

#[tokio::test]
#[ignore]
async fn test_lock_period_coupling_extends_sibling_items() {
    let client = Client::new();
    let locked_id = create_product(&client, "Test Drone", 1, 5).await;
    let free_id = create_product(&client, "Test Gimbal", 1, 0).await;

    // One booking takes both products; the drone's 5-day lock period
    // widens the reservation window of the gimbal too.
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&json!({
            "customer_name": "Coupled Customer",
            "customer_email": "coupled@example.com",
            "items": [
                {"product_id": locked_id, "start_date": "2031-05-01", "end_date": "2031-05-05", "quantity": 1},
                {"product_id": free_id, "start_date": "2031-05-01", "end_date": "2031-05-05", "quantity": 1}
            ]
        }))
        .send()
        .await
        .expect("Failed to create booking");
    assert_eq!(response.status(), 201);
    let booking: Value = response.json().await.expect("Failed to parse response");
    for item in booking["items"].as_array().expect("Expected items") {
        assert_eq!(item["blocked_until"], "2031-05-10");
    }

    // The gimbal has lock_period_days=0, yet stays blocked through the
    // booking-wide window ending May 10
    let response = client
        .get(format!(
            "{}/products/{}/availability?start_date=2031-05-06&end_date=2031-05-08&quantity=1",
            BASE_URL, free_id
        ))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["is_available"], false);

    // Free again from May 11
    let response = client
        .get(format!(
            "{}/products/{}/availability?start_date=2031-05-11&end_date=2031-05-14&quantity=1",
            BASE_URL, free_id
        ))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["is_available"], true);
}

#[tokio::test]
#[ignore]
async fn test_create_booking_fails_atomically_when_one_item_unavailable() {
    let client = Client::new();
    let free_id = create_product(&client, "Test Mic", 5, 0).await;
    let scarce_id = create_product(&client, "Test Recorder", 1, 0).await;

    // Take the only recorder
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&json!({
            "customer_name": "First Customer",
            "customer_email": "first@example.com",
            "items": [{
                "product_id": scarce_id,
                "start_date": "2031-02-01",
                "end_date": "2031-02-10",
                "quantity": 1
            }]
        }))
        .send()
        .await
        .expect("Failed to create booking");
    assert_eq!(response.status(), 201);

    // Second booking wants the mic (free) and the recorder (taken)
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&json!({
            "customer_name": "Second Customer",
            "customer_email": "second@example.com",
            "items": [
                {
                    "product_id": free_id,
                    "start_date": "2031-02-01",
                    "end_date": "2031-02-10",
                    "quantity": 1
                },
                {
                    "product_id": scarce_id,
                    "start_date": "2031-02-05",
                    "end_date": "2031-02-08",
                    "quantity": 1
                }
            ]
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["product"], "Test Recorder");
    assert_eq!(body["remaining"], 0);

    // Nothing was reserved for the mic either
    let response = client
        .get(format!(
            "{}/products/{}/availability?start_date=2031-02-01&end_date=2031-02-10&quantity=5",
            BASE_URL, free_id
        ))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["is_available"], true);
}

#[tokio::test]
#[ignore]
async fn test_return_flow_completes_booking_and_frees_units() {
    let client = Client::new();
    let a = create_product(&client, "Test Light A", 1, 0).await;
    let b = create_product(&client, "Test Light B", 1, 0).await;

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&json!({
            "customer_name": "Returner",
            "customer_email": "returner@example.com",
            "items": [
                {"product_id": a, "start_date": "2031-03-01", "end_date": "2031-03-05", "quantity": 1},
                {"product_id": b, "start_date": "2031-03-01", "end_date": "2031-03-05", "quantity": 1}
            ]
        }))
        .send()
        .await
        .expect("Failed to create booking");
    assert_eq!(response.status(), 201);
    let booking: Value = response.json().await.expect("Failed to parse response");
    let booking_id = booking["id"].as_i64().expect("No booking ID");

    // Partial return: status unchanged
    let response = client
        .post(format!("{}/bookings/{}/return", BASE_URL, booking_id))
        .json(&json!({
            "items": [{"product_id": a, "return_status": "returned"}]
        }))
        .send()
        .await
        .expect("Failed to record return");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "pending");

    // Final return: booking completes
    let response = client
        .post(format!("{}/bookings/{}/return", BASE_URL, booking_id))
        .json(&json!({
            "items": [{"product_id": b, "return_status": "returned"}]
        }))
        .send()
        .await
        .expect("Failed to record return");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "completed");

    // Completed bookings no longer block availability
    let response = client
        .get(format!(
            "{}/products/{}/availability?start_date=2031-03-01&end_date=2031-03-05&quantity=1",
            BASE_URL, a
        ))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["is_available"], true);
}

#[tokio::test]
#[ignore]
async fn test_cancel_completed_booking_is_rejected() {
    let client = Client::new();
    let product_id = create_product(&client, "Test Monitor", 1, 0).await;

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&json!({
            "customer_name": "Canceller",
            "customer_email": "canceller@example.com",
            "items": [{"product_id": product_id, "start_date": "2031-04-01", "end_date": "2031-04-03", "quantity": 1}]
        }))
        .send()
        .await
        .expect("Failed to create booking");
    let booking: Value = response.json().await.expect("Failed to parse response");
    let booking_id = booking["id"].as_i64().expect("No booking ID");

    let response = client
        .post(format!("{}/bookings/{}/return", BASE_URL, booking_id))
        .json(&json!({"items": [{"product_id": product_id, "return_status": "returned"}]}))
        .send()
        .await
        .expect("Failed to record return");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "completed");

    let response = client
        .put(format!("{}/bookings/{}/status", BASE_URL, booking_id))
        .json(&json!({"status": "cancelled"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_unknown_status_value_is_rejected() {
    let client = Client::new();

    let response = client
        .put(format!("{}/bookings/1/status", BASE_URL))
        .json(&json!({"status": "archived"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_category_ordering_stays_dense() {
    let client = Client::new();

    let mut ids = Vec::new();
    for label in ["Test Cat One", "Test Cat Two", "Test Cat Three"] {
        let response = client
            .post(format!("{}/categories", BASE_URL))
            .json(&json!({"label": label}))
            .send()
            .await
            .expect("Failed to create category");
        assert_eq!(response.status(), 201);
        let body: Value = response.json().await.expect("Failed to parse response");
        ids.push(body["id"].as_i64().expect("No category ID"));
    }

    // Move the last one to the front
    let response = client
        .put(format!("{}/categories/{}/reorder", BASE_URL, ids[2]))
        .json(&json!({"order": 0}))
        .send()
        .await
        .expect("Failed to reorder");
    assert!(response.status().is_success());

    // Delete the middle one
    let response = client
        .delete(format!("{}/categories/{}", BASE_URL, ids[1]))
        .send()
        .await
        .expect("Failed to delete");
    assert_eq!(response.status(), 204);

    // Remaining orders are exactly 0..N-1
    let response = client
        .get(format!("{}/categories", BASE_URL))
        .send()
        .await
        .expect("Failed to list categories");
    let body: Value = response.json().await.expect("Failed to parse response");
    let mut orders: Vec<i64> = body
        .as_array()
        .expect("Expected array")
        .iter()
        .map(|c| c["sort_order"].as_i64().unwrap())
        .collect();
    orders.sort_unstable();
    let expected: Vec<i64> = (0..orders.len() as i64).collect();
    assert_eq!(orders, expected);

    // Cleanup
    for id in [ids[0], ids[2]] {
        let _ = client
            .delete(format!("{}/categories/{}", BASE_URL, id))
            .send()
            .await;
    }
}

#[tokio::test]
#[ignore]
async fn test_reorder_succeeds_in_both_directions() {
    let client = Client::new();

    let mut ids = Vec::new();
    for label in ["Test Shift A", "Test Shift B", "Test Shift C"] {
        let response = client
            .post(format!("{}/categories", BASE_URL))
            .json(&json!({"label": label}))
            .send()
            .await
            .expect("Failed to create category");
        assert_eq!(response.status(), 201);
        let body: Value = response.json().await.expect("Failed to parse response");
        ids.push(body["id"].as_i64().expect("No category ID"));
    }

    let list: Value = client
        .get(format!("{}/categories", BASE_URL))
        .send()
        .await
        .expect("Failed to list categories")
        .json()
        .await
        .expect("Failed to parse response");
    let order_of = |body: &Value, id: i64| -> i64 {
        body.as_array()
            .expect("Expected array")
            .iter()
            .find(|c| c["id"].as_i64() == Some(id))
            .expect("Category missing")["sort_order"]
            .as_i64()
            .unwrap()
    };
    let first_order = order_of(&list, ids[0]);
    let last_order = order_of(&list, ids[2]);

    // Upward move: shifted siblings pass through the still-held position
    let response = client
        .put(format!("{}/categories/{}/reorder", BASE_URL, ids[0]))
        .json(&json!({"order": last_order}))
        .send()
        .await
        .expect("Failed to reorder");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["sort_order"].as_i64(), Some(last_order));

    // Downward move back to where it started
    let response = client
        .put(format!("{}/categories/{}/reorder", BASE_URL, ids[0]))
        .json(&json!({"order": first_order}))
        .send()
        .await
        .expect("Failed to reorder");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["sort_order"].as_i64(), Some(first_order));

    // Ordering is dense after the round trip
    let list: Value = client
        .get(format!("{}/categories", BASE_URL))
        .send()
        .await
        .expect("Failed to list categories")
        .json()
        .await
        .expect("Failed to parse response");
    let mut orders: Vec<i64> = list
        .as_array()
        .expect("Expected array")
        .iter()
        .map(|c| c["sort_order"].as_i64().unwrap())
        .collect();
    orders.sort_unstable();
    let expected: Vec<i64> = (0..orders.len() as i64).collect();
    assert_eq!(orders, expected);

    for id in ids {
        let _ = client
            .delete(format!("{}/categories/{}", BASE_URL, id))
            .send()
            .await;
    }
}

#[tokio::test]
#[ignore]
async fn test_duplicate_category_label_is_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/categories", BASE_URL))
        .json(&json!({"label": "Test Dup"}))
        .send()
        .await
        .expect("Failed to create category");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let id = body["id"].as_i64().expect("No category ID");

    let response = client
        .post(format!("{}/categories", BASE_URL))
        .json(&json!({"label": "test dup"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    let _ = client
        .delete(format!("{}/categories/{}", BASE_URL, id))
        .send()
        .await;
}
