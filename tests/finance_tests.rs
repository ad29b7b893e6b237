mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use rust_decimal::Decimal;
use tower::ServiceExt;

fn dec(v: &serde_json::Value) -> Decimal {
    v.as_str()
        .expect("expected decimal serialized as string")
        .parse()
        .expect("expected parseable decimal")
}

async fn post_json(
    app: &axum::Router,
    uri: &str,
    payload: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(payload).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let resp = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_entry_financials_computed_on_create() {
    let (app, _pool) = common::build_test_app().await;

    let payload = serde_json::json!({
        "category": "B2C_ALGERIA",
        "label": "Tucson 2021 import",
        "auction_fees": "1000",
        "transport_fees": "2000",
        "buying_costs": "500000",
        "transaction_fees": "1500",
        "papers_fees": "3000",
        "selling_price": "520000",
    });

    let (status, json) = post_json(&app, "/api/finance", &payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);

    let data = &json["data"];
    assert_eq!(data["category"], "B2C_ALGERIA");
    assert_eq!(dec(&data["revenue"]), Decimal::from(44_000));
    assert_eq!(dec(&data["total_cost"]), Decimal::from(507_500));
    assert_eq!(dec(&data["net_profit"]), Decimal::from(56_500));
}

#[tokio::test]
async fn test_extra_expense_entry() {
    let (app, _pool) = common::build_test_app().await;

    let payload = serde_json::json!({
        "category": "EXTRA_EXPENSE",
        "label": "Showroom repairs",
        "amount": "7500",
    });

    let (status, json) = post_json(&app, "/api/finance", &payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dec(&json["data"]["total_cost"]), Decimal::from(7_500));
    assert_eq!(dec(&json["data"]["net_profit"]), Decimal::from(-7_500));
}

#[tokio::test]
async fn test_unknown_category_rejected() {
    let (app, _pool) = common::build_test_app().await;

    let payload = serde_json::json!({
        "category": "WHOLESALE",
        "buying_costs": "1000",
    });

    let (status, json) = post_json(&app, "/api/finance", &payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("invalid finance category"));
}

#[tokio::test]
async fn test_absent_fields_default_to_zero() {
    let (app, _pool) = common::build_test_app().await;

    // Only the selling price given: revenue and total cost stay zero.
    let payload = serde_json::json!({
        "category": "B2C_KOREA",
        "selling_price": "1000",
    });

    let (status, json) = post_json(&app, "/api/finance", &payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dec(&json["data"]["revenue"]), Decimal::ZERO);
    assert_eq!(dec(&json["data"]["total_cost"]), Decimal::ZERO);
    assert_eq!(dec(&json["data"]["net_profit"]), Decimal::from(1_000));
}

#[tokio::test]
async fn test_duplicate_order_link_rejected() {
    let (app, _pool) = common::build_test_app().await;

    // An order to finance
    let (status, json) = post_json(
        &app,
        "/api/orders",
        &serde_json::json!({
            "client_name": "Karim B.",
            "category": "B2B",
            "sale_price": "110000",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let order_id = json["data"]["id"].as_str().unwrap().to_string();

    // Not financed yet
    let (status, json) = get_json(&app, &format!("/api/orders/{order_id}/finance")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["financed"], false);
    assert_eq!(json["data"]["net_profit"], serde_json::Value::Null);

    // First linked entry is accepted
    let entry = serde_json::json!({
        "category": "B2B",
        "linked_order_id": order_id,
        "buying_costs": "100000",
        "papers_fees": "2000",
        "transport_fees": "3000",
        "other_fees": "1000",
        "selling_price": "110000",
    });
    let (status, json) = post_json(&app, "/api/finance", &entry).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dec(&json["data"]["net_profit"]), Decimal::from(12_800));

    // Second entry for the same order is rejected
    let (status, json) = post_json(&app, "/api/finance", &entry).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("already has a finance entry"));

    // The order still reports exactly one linked entry
    let (status, json) = get_json(&app, &format!("/api/orders/{order_id}/finance")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["financed"], true);
    assert_eq!(dec(&json["data"]["net_profit"]), Decimal::from(12_800));

    let (status, json) = get_json(&app, "/api/finance").await;
    assert_eq!(status, StatusCode::OK);
    let linked: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|e| e["linked_order_id"] == serde_json::Value::String(order_id.clone()))
        .collect();
    assert_eq!(linked.len(), 1);
}

#[tokio::test]
async fn test_expense_cannot_link_to_order() {
    let (app, _pool) = common::build_test_app().await;

    let (status, json) = post_json(
        &app,
        "/api/orders",
        &serde_json::json!({
            "client_name": "Lina T.",
            "category": "B2C_ALGERIA",
            "sale_price": "90000",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let order_id = json["data"]["id"].as_str().unwrap().to_string();

    let (status, _json) = post_json(
        &app,
        "/api/finance",
        &serde_json::json!({
            "category": "EXTRA_EXPENSE",
            "linked_order_id": order_id,
            "amount": "500",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_order_rejects_expense_category() {
    let (app, _pool) = common::build_test_app().await;

    let (status, _json) = post_json(
        &app,
        "/api/orders",
        &serde_json::json!({
            "client_name": "Nour Z.",
            "category": "EXTRA_EXPENSE",
            "sale_price": "500",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_rederives_financials() {
    let (app, _pool) = common::build_test_app().await;

    let (status, json) = post_json(
        &app,
        "/api/finance",
        &serde_json::json!({
            "category": "B2C_KOREA",
            "buying_costs": "200000",
            "selling_price": "230000",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let entry_id = json["data"]["id"].as_str().unwrap().to_string();
    // 230000 − 200000 + 17600
    assert_eq!(dec(&json["data"]["net_profit"]), Decimal::from(47_600));

    // Re-submit with different fields; derived values follow atomically
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/finance/{entry_id}"))
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::json!({
                        "buying_costs": "200000",
                        "auction_fees": "5000",
                        "selling_price": "230000",
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(dec(&json["data"]["total_cost"]), Decimal::from(205_000));
    assert_eq!(dec(&json["data"]["net_profit"]), Decimal::from(42_600));
    // Category is immutable across edits
    assert_eq!(json["data"]["category"], "B2C_KOREA");
}

#[tokio::test]
async fn test_list_category_filter() {
    let (app, _pool) = common::build_test_app().await;

    let (status, _json) = post_json(
        &app,
        "/api/finance",
        &serde_json::json!({ "category": "EXTRA_EXPENSE", "amount": "100" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = get_json(&app, "/api/finance?category=EXTRA_EXPENSE").await;
    assert_eq!(status, StatusCode::OK);
    let entries = json["data"].as_array().unwrap();
    assert!(!entries.is_empty());
    assert!(entries.iter().all(|e| e["category"] == "EXTRA_EXPENSE"));

    // Window-scoped list: today's fetch still contains the fresh entry
    let (status, json) = get_json(&app, "/api/finance?category=EXTRA_EXPENSE&window=today").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!json["data"].as_array().unwrap().is_empty());

    // Unknown category filter is rejected, not treated as empty
    let (status, _json) = get_json(&app, "/api/finance?category=RETAIL").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_summary_totals_are_consistent() {
    let (app, _pool) = common::build_test_app().await;

    // Ensure at least one entry exists in each bucket
    for payload in [
        serde_json::json!({ "category": "B2B", "buying_costs": "10000", "selling_price": "12000" }),
        serde_json::json!({ "category": "B2C_ALGERIA", "buying_costs": "10000", "selling_price": "12000" }),
        serde_json::json!({ "category": "EXTRA_EXPENSE", "amount": "300" }),
    ] {
        let (status, _json) = post_json(&app, "/api/finance", &payload).await;
        assert_eq!(status, StatusCode::OK);
    }

    for window in ["all", "today", "week", "month", "year"] {
        let (status, json) = get_json(&app, &format!("/api/finance/summary?window={window}")).await;
        assert_eq!(status, StatusCode::OK);

        let total_profit = dec(&json["total_profit"]);
        let channel_sum =
            dec(&json["total_b2b"]) + dec(&json["total_b2c_algeria"]) + dec(&json["total_b2c_korea"]);
        assert_eq!(total_profit, channel_sum, "window {window}");

        // Expenses are tracked separately, never folded into the profit sum
        assert!(dec(&json["total_extra_expenses"]) >= Decimal::ZERO);
        assert!(json["count"].as_i64().unwrap() >= 0);
    }

    // The just-created entries are inside every window of the `today` fetch
    let (status, json) = get_json(&app, "/api/finance/summary?window=today").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["count"].as_i64().unwrap() >= 3);
}

#[tokio::test]
async fn test_entry_delete() {
    let (app, _pool) = common::build_test_app().await;

    let (status, json) = post_json(
        &app,
        "/api/finance",
        &serde_json::json!({ "category": "EXTRA_EXPENSE", "amount": "42" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let entry_id = json["data"]["id"].as_str().unwrap().to_string();

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/finance/{entry_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let (status, _json) = get_json(&app, &format!("/api/finance/{entry_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_order_list_annotates_financed_state() {
    let (app, _pool) = common::build_test_app().await;

    let (status, json) = post_json(
        &app,
        "/api/orders",
        &serde_json::json!({
            "client_name": "Yacine M.",
            "category": "B2C_KOREA",
            "sale_price": "80000",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let order_id = json["data"]["id"].as_str().unwrap().to_string();

    let (status, _json) = post_json(
        &app,
        "/api/finance",
        &serde_json::json!({
            "category": "B2C_KOREA",
            "linked_order_id": order_id,
            "buying_costs": "70000",
            "selling_price": "80000",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = get_json(&app, "/api/orders").await;
    assert_eq!(status, StatusCode::OK);
    let row = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|o| o["id"] == serde_json::Value::String(order_id.clone()))
        .expect("created order missing from list");
    assert_eq!(row["financed"], true);
    // 80000 − 70000 + 6160
    assert_eq!(dec(&row["net_profit"]), Decimal::from(16_160));
}
