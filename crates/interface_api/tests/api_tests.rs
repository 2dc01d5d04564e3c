//! HTTP API tests
//!
//! Each test boots the full router against the in-memory stores, so a
//! request exercises routing, extraction, validation, the service layer and
//! the JSON error mapping end to end without a database or a filesystem.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use serde_json::{json, Value};
use uuid::Uuid;

use domain_ledger::ports::mock::{MockLedgerStore, MockReceiptStore};
use domain_ledger::LedgerService;
use interface_api::{config::ApiConfig, create_router};
use test_utils::{IdFixtures, StringFixtures};

fn test_server() -> TestServer {
    let store = Arc::new(MockLedgerStore::new());
    let receipts = Arc::new(MockReceiptStore::new());
    let service = Arc::new(LedgerService::new(store, receipts));
    TestServer::new(create_router(service, ApiConfig::default())).unwrap()
}

async fn register_customer(server: &TestServer, full_name: &str) -> Value {
    let response = server
        .post("/api/v1/customers")
        .json(&json!({
            "full_name": full_name,
            "phone": StringFixtures::random_phone(),
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<Value>()
}

async fn install_meter(server: &TestServer, customer_id: &Value, initial_reading: i64) -> Value {
    let response = server
        .post("/api/v1/meters")
        .json(&json!({
            "serial_number": StringFixtures::random_serial_number(),
            "customer_id": customer_id,
            "initial_reading": initial_reading,
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<Value>()
}

async fn record_reading(server: &TestServer, meter_id: &Value, current_reading: i64) -> Value {
    let response = server
        .post("/api/v1/readings")
        .json(&json!({
            "meter_id": meter_id,
            "current_reading": current_reading,
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<Value>()
}

fn expense_form(title: &str, amount: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("title", title)
        .add_text("amount", amount)
}

fn jpeg_part(bytes: Vec<u8>) -> Part {
    Part::bytes(bytes).file_name("receipt.jpg").mime_type("image/jpeg")
}

mod health {
    use super::*;

    #[tokio::test]
    async fn test_liveness_reports_version() {
        let server = test_server();

        let response = server.get("/health").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body = response.json::<Value>();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_readiness_pings_the_store() {
        let server = test_server();

        let response = server.get("/health/ready").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>()["status"], "ready");
    }
}

mod customers {
    use super::*;

    #[tokio::test]
    async fn test_registered_customer_starts_with_zero_balance() {
        let server = test_server();

        let customer = register_customer(&server, "Amina Okello").await;
        assert_eq!(customer["full_name"], "Amina Okello");
        assert_eq!(customer["wallet_balance"], "0");
        assert_eq!(customer["debt"], "0");
        assert!(customer["id"].as_str().is_some_and(|id| Uuid::parse_str(id).is_ok()));
    }

    #[tokio::test]
    async fn test_customers_listed_in_registration_order() {
        let server = test_server();
        register_customer(&server, "First Customer").await;
        register_customer(&server, "Second Customer").await;

        let response = server.get("/api/v1/customers").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let listed = response.json::<Vec<Value>>();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0]["full_name"], "First Customer");
        assert_eq!(listed[1]["full_name"], "Second Customer");
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected_with_details() {
        let server = test_server();

        let response = server
            .post("/api/v1/customers")
            .json(&json!({ "full_name": "", "phone": "0712000001" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = response.json::<Value>();
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["details"][0], "full_name: must not be empty");
    }

    #[tokio::test]
    async fn test_short_phone_is_rejected() {
        let server = test_server();

        let response = server
            .post("/api/v1/customers")
            .json(&json!({ "full_name": "Amina Okello", "phone": "12" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_duplicate_phone_is_a_domain_rejection() {
        let server = test_server();
        let phone = StringFixtures::random_phone();

        for expected in [StatusCode::CREATED, StatusCode::BAD_REQUEST] {
            let response = server
                .post("/api/v1/customers")
                .json(&json!({ "full_name": "Amina Okello", "phone": phone }))
                .await;
            assert_eq!(response.status_code(), expected);
        }

        let body = server.get("/api/v1/customers").await.json::<Vec<Value>>();
        assert_eq!(body.len(), 1);
    }

    #[tokio::test]
    async fn test_get_customer_roundtrip() {
        let server = test_server();
        let customer = register_customer(&server, "Joseph Mwangi").await;

        let response = server
            .get(&format!("/api/v1/customers/{}", customer["id"].as_str().unwrap()))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>()["full_name"], "Joseph Mwangi");
    }

    #[tokio::test]
    async fn test_unknown_customer_is_404() {
        let server = test_server();
        let unknown = Uuid::from(IdFixtures::customer_id());

        let response = server.get(&format!("/api/v1/customers/{unknown}")).await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["error"], "not_found");
    }
}

mod meters {
    use super::*;

    #[tokio::test]
    async fn test_meter_lookup_uses_sentinel_not_404() {
        let server = test_server();
        let customer = register_customer(&server, "Grace Auma").await;
        let lookup_path = format!(
            "/api/v1/customers/{}/meter",
            customer["id"].as_str().unwrap()
        );

        let response = server.get(&lookup_path).await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>(), json!({ "status": "no_meter" }));

        let meter = install_meter(&server, &customer["id"], 25).await;

        let body = server.get(&lookup_path).await.json::<Value>();
        assert_eq!(body["status"], "found");
        assert_eq!(body["meter"]["id"], meter["id"]);
        assert_eq!(body["meter"]["last_reading"], 25);
    }

    #[tokio::test]
    async fn test_meter_for_unknown_customer_is_404() {
        let server = test_server();

        let response = server
            .post("/api/v1/meters")
            .json(&json!({
                "serial_number": "WM-2025-9999",
                "customer_id": Uuid::from(IdFixtures::customer_id()),
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_second_meter_is_rejected() {
        let server = test_server();
        let customer = register_customer(&server, "Peter Otieno").await;
        install_meter(&server, &customer["id"], 0).await;

        let response = server
            .post("/api/v1/meters")
            .json(&json!({
                "serial_number": "WM-EXTRA",
                "customer_id": customer["id"],
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_baseline_adjustment_settles_the_wallet() {
        let server = test_server();
        let customer = register_customer(&server, "Mary Njeri").await;
        let meter = install_meter(&server, &customer["id"], 100).await;

        let response = server
            .put(&format!("/api/v1/meters/{}", meter["id"].as_str().unwrap()))
            .json(&json!({ "last_reading": 130 }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body = response.json::<Value>();
        assert_eq!(body["previous_baseline"], 100);
        assert_eq!(body["new_baseline"], 130);
        assert_eq!(body["charge"], "3000");
        assert_eq!(body["new_balance"], "-3000");
    }

    #[tokio::test]
    async fn test_reset_meter_zeroes_the_counter() {
        let server = test_server();
        let customer = register_customer(&server, "Daniel Kiprop").await;
        let meter = install_meter(&server, &customer["id"], 340).await;

        let response = server
            .put(&format!(
                "/api/v1/meters/{}/reset",
                meter["id"].as_str().unwrap()
            ))
            .await;
        assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

        let meters = server.get("/api/v1/meters").await.json::<Vec<Value>>();
        assert_eq!(meters[0]["last_reading"], 0);
    }

    #[tokio::test]
    async fn test_delete_meter_keeps_reading_history() {
        let server = test_server();
        let customer = register_customer(&server, "Sarah Wanjiku").await;
        let meter = install_meter(&server, &customer["id"], 0).await;
        record_reading(&server, &meter["id"], 40).await;

        let meter_id = meter["id"].as_str().unwrap();
        let response = server.delete(&format!("/api/v1/meters/{meter_id}")).await;
        assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

        let lookup = server
            .get(&format!(
                "/api/v1/customers/{}/meter",
                customer["id"].as_str().unwrap()
            ))
            .await
            .json::<Value>();
        assert_eq!(lookup["status"], "no_meter");

        let readings = server
            .get(&format!("/api/v1/meters/{meter_id}/readings"))
            .await
            .json::<Vec<Value>>();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0]["consumption"], 40);
    }
}

mod billing {
    use super::*;

    #[tokio::test]
    async fn test_reading_bills_consumption_into_the_wallet() {
        let server = test_server();
        let customer = register_customer(&server, "Esther Achieng").await;
        let meter = install_meter(&server, &customer["id"], 100).await;

        let outcome = record_reading(&server, &meter["id"], 150).await;
        assert_eq!(outcome["consumption"], 50);
        assert_eq!(outcome["cost"], "5000");
        assert_eq!(outcome["new_balance"], "-5000");

        let customer_id = customer["id"].as_str().unwrap();
        let invoices = server
            .get(&format!("/api/v1/customers/{customer_id}/invoices"))
            .await
            .json::<Vec<Value>>();
        assert_eq!(invoices.len(), 1);
        assert_eq!(invoices[0]["amount"], "5000");
    }

    #[tokio::test]
    async fn test_non_increasing_reading_is_rejected_with_both_values() {
        let server = test_server();
        let customer = register_customer(&server, "James Baraka").await;
        let meter = install_meter(&server, &customer["id"], 100).await;

        for submitted in [90, 100] {
            let response = server
                .post("/api/v1/readings")
                .json(&json!({
                    "meter_id": meter["id"],
                    "current_reading": submitted,
                }))
                .await;
            assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

            let message = response.json::<Value>()["message"]
                .as_str()
                .unwrap()
                .to_string();
            assert!(message.contains(&submitted.to_string()));
            assert!(message.contains("100"));
        }
    }

    #[tokio::test]
    async fn test_reading_for_unknown_meter_is_404() {
        let server = test_server();

        let response = server
            .post("/api/v1/readings")
            .json(&json!({
                "meter_id": Uuid::from(IdFixtures::meter_id()),
                "current_reading": 10,
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_overlong_note_is_shape_rejected() {
        let server = test_server();
        let customer = register_customer(&server, "Lydia Wairimu").await;
        let meter = install_meter(&server, &customer["id"], 0).await;

        let response = server
            .post("/api/v1/readings")
            .json(&json!({
                "meter_id": meter["id"],
                "current_reading": 10,
                "note": "x".repeat(501),
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_payment_credits_the_wallet() {
        let server = test_server();
        let customer = register_customer(&server, "Brian Odhiambo").await;

        let response = server
            .post("/api/v1/payments")
            .json(&json!({ "customer_id": customer["id"], "amount": 2500 }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
        assert_eq!(response.json::<Value>()["new_balance"], "2500");

        let payments = server
            .get(&format!(
                "/api/v1/customers/{}/payments",
                customer["id"].as_str().unwrap()
            ))
            .await
            .json::<Vec<Value>>();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0]["amount"], "2500");
    }

    #[tokio::test]
    async fn test_non_positive_payment_is_rejected() {
        let server = test_server();
        let customer = register_customer(&server, "Nancy Chebet").await;

        for amount in [0, -50] {
            let response = server
                .post("/api/v1/payments")
                .json(&json!({ "customer_id": customer["id"], "amount": amount }))
                .await;
            assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn test_payment_for_unknown_customer_is_404() {
        let server = test_server();

        let response = server
            .post("/api/v1/payments")
            .json(&json!({
                "customer_id": Uuid::from(IdFixtures::customer_id()),
                "amount": 100,
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_history_for_unknown_customer_is_404() {
        let server = test_server();
        let unknown = Uuid::from(IdFixtures::customer_id());

        for suffix in ["invoices", "payments"] {
            let response = server
                .get(&format!("/api/v1/customers/{unknown}/{suffix}"))
                .await;
            assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        }
    }
}

mod expenses {
    use super::*;

    #[tokio::test]
    async fn test_create_expense_with_receipt() {
        let server = test_server();

        let response = server
            .post("/api/v1/expenses")
            .multipart(expense_form("Pump fuel", "1200").add_part("file", jpeg_part(vec![0xFF, 0xD8])))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);

        let body = response.json::<Value>();
        assert_eq!(body["title"], "Pump fuel");
        assert_eq!(body["amount"], "1200");
        assert!(body["receipt_path"].as_str().is_some());
        assert!(body["receipt_url"]
            .as_str()
            .is_some_and(|url| url.starts_with("/uploads/")));
    }

    #[tokio::test]
    async fn test_create_expense_without_file_part() {
        let server = test_server();

        let response = server
            .post("/api/v1/expenses")
            .multipart(expense_form("Pipe clamps", "450.50"))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);

        let body = response.json::<Value>();
        assert_eq!(body["amount"], "450.50");
        assert!(body["receipt_path"].is_null());
        assert!(body["receipt_url"].is_null());
    }

    #[tokio::test]
    async fn test_missing_fields_are_collected() {
        let server = test_server();

        let response = server
            .post("/api/v1/expenses")
            .multipart(MultipartForm::new().add_part("file", jpeg_part(vec![1])))
            .await;
        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let details = response.json::<Value>()["details"]
            .as_array()
            .unwrap()
            .clone();
        assert_eq!(details.len(), 2);
        assert!(details.contains(&json!("title: is required")));
        assert!(details.contains(&json!("amount: is required")));
    }

    #[tokio::test]
    async fn test_unparseable_amount_is_rejected() {
        let server = test_server();

        let response = server
            .post("/api/v1/expenses")
            .multipart(expense_form("Pump fuel", "a lot"))
            .await;
        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = response.json::<Value>();
        assert_eq!(body["details"][0], "amount: 'a lot' is not a valid decimal");
    }

    #[tokio::test]
    async fn test_update_without_file_keeps_the_receipt() {
        let server = test_server();

        let created = server
            .post("/api/v1/expenses")
            .multipart(expense_form("Pump fuel", "1200").add_part("file", jpeg_part(vec![2])))
            .await
            .json::<Value>();
        let original_path = created["receipt_path"].as_str().unwrap().to_string();

        let response = server
            .put(&format!("/api/v1/expenses/{}", created["id"].as_str().unwrap()))
            .multipart(expense_form("Pump fuel (diesel)", "1300"))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body = response.json::<Value>();
        assert_eq!(body["title"], "Pump fuel (diesel)");
        assert_eq!(body["receipt_path"], original_path.as_str());
    }

    #[tokio::test]
    async fn test_update_with_file_replaces_the_receipt() {
        let server = test_server();

        let created = server
            .post("/api/v1/expenses")
            .multipart(expense_form("Generator oil", "900").add_part("file", jpeg_part(vec![3])))
            .await
            .json::<Value>();
        let original_path = created["receipt_path"].as_str().unwrap().to_string();

        let response = server
            .put(&format!("/api/v1/expenses/{}", created["id"].as_str().unwrap()))
            .multipart(expense_form("Generator oil", "950").add_part("file", jpeg_part(vec![4])))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let new_path = response.json::<Value>()["receipt_path"]
            .as_str()
            .unwrap()
            .to_string();
        assert_ne!(new_path, original_path);
    }

    #[tokio::test]
    async fn test_update_missing_expense_is_404() {
        let server = test_server();
        let unknown = Uuid::from(IdFixtures::expense_id());

        let response = server
            .put(&format!("/api/v1/expenses/{unknown}"))
            .multipart(expense_form("Ghost", "1"))
            .await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_expense_removes_the_row() {
        let server = test_server();

        let created = server
            .post("/api/v1/expenses")
            .multipart(expense_form("Trench digging", "2000"))
            .await
            .json::<Value>();

        let response = server
            .delete(&format!("/api/v1/expenses/{}", created["id"].as_str().unwrap()))
            .await;
        assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

        let listed = server.get("/api/v1/expenses").await.json::<Vec<Value>>();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_expenses_listed_newest_first() {
        let server = test_server();
        for title in ["first", "second"] {
            let response = server
                .post("/api/v1/expenses")
                .multipart(expense_form(title, "100"))
                .await;
            assert_eq!(response.status_code(), StatusCode::CREATED);
        }

        let listed = server.get("/api/v1/expenses").await.json::<Vec<Value>>();
        assert_eq!(listed[0]["title"], "second");
        assert_eq!(listed[1]["title"], "first");
    }
}

mod settings_and_reports {
    use super::*;

    #[tokio::test]
    async fn test_unit_price_defaults_until_configured() {
        let server = test_server();

        let response = server.get("/api/v1/settings/unit-price").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>()["unit_price"], "100");
    }

    #[tokio::test]
    async fn test_updated_price_applies_to_the_next_reading() {
        let server = test_server();
        let customer = register_customer(&server, "Agnes Moraa").await;
        let meter = install_meter(&server, &customer["id"], 0).await;

        let response = server
            .put("/api/v1/settings/unit-price")
            .json(&json!({ "unit_price": 250 }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>()["unit_price"], "250");

        let outcome = record_reading(&server, &meter["id"], 10).await;
        assert_eq!(outcome["cost"], "2500");
    }

    #[tokio::test]
    async fn test_non_positive_price_is_rejected() {
        let server = test_server();

        for bad in [0, -10] {
            let response = server
                .put("/api/v1/settings/unit-price")
                .json(&json!({ "unit_price": bad }))
                .await;
            assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        }

        let body = server.get("/api/v1/settings/unit-price").await.json::<Value>();
        assert_eq!(body["unit_price"], "100");
    }

    #[tokio::test]
    async fn test_dashboard_aggregates_cash_flow() {
        let server = test_server();
        let customer = register_customer(&server, "Violet Nafula").await;
        let meter = install_meter(&server, &customer["id"], 0).await;

        // bill 2000, collect 1500, spend 700
        record_reading(&server, &meter["id"], 20).await;
        server
            .post("/api/v1/payments")
            .json(&json!({ "customer_id": customer["id"], "amount": 1500 }))
            .await;
        server
            .post("/api/v1/expenses")
            .multipart(expense_form("Chlorine", "700"))
            .await;

        let body = server.get("/api/v1/dashboard").await.json::<Value>();
        assert_eq!(body["total_income"], "1500");
        assert_eq!(body["total_expenses"], "700");
        assert_eq!(body["box_balance"], "800");
        assert_eq!(body["total_debts"], "500");
    }

    #[tokio::test]
    async fn test_customer_report_covers_metered_customers_only() {
        let server = test_server();
        let metered = register_customer(&server, "Metered Customer").await;
        let meter = install_meter(&server, &metered["id"], 30).await;
        register_customer(&server, "Awaiting Installation").await;

        server
            .post("/api/v1/readings")
            .json(&json!({
                "meter_id": meter["id"],
                "current_reading": 45,
                "note": "leak checked",
            }))
            .await;

        let report = server
            .get("/api/v1/reports/customers")
            .await
            .json::<Vec<Value>>();
        assert_eq!(report.len(), 1);

        let row = &report[0];
        assert_eq!(row["customer_id"], metered["id"]);
        assert_eq!(row["previous_reading"], 30);
        assert_eq!(row["current_reading"], 45);
        assert_eq!(row["consumption"], 15);
        assert_eq!(row["last_invoice_amount"], "1500");
        assert_eq!(row["note"], "leak checked");
        assert_eq!(row["wallet_balance"], "-1500");
    }
}
