use order_data::models::order::{Order, OrderList, OrderStatus, Tone};

#[test]
fn test_order_list_envelope() {
    let body = r#"{
        "orders": [
            {
                "order_id": "a3a5a7cb-0a80-4a64-93f1-5c7e6e9f0b11",
                "customer_id": "CUST001",
                "total_amount": 2425.99,
                "status": "pending",
                "created_at": "2026-08-01T09:12:45.123456"
            },
            {
                "order_id": "e2f0c7f2-3a44-4a1b-9f77-2a2a8c0d4c22",
                "customer_id": "CUST002",
                "total_amount": 89.99,
                "status": "delivered",
                "created_at": "2026-07-30T17:03:01.000001"
            }
        ],
        "pagination": { "page": 1, "limit": 10, "total": 42, "pages": 5 }
    }"#;

    let page: OrderList = serde_json::from_str(body).expect("list should parse");
    assert_eq!(page.orders.len(), 2);
    assert_eq!(page.orders[0].status, OrderStatus::Pending);
    assert_eq!(page.orders[1].status, OrderStatus::Delivered);
    assert!(page.orders[0].items.is_empty());
    assert_eq!(page.pagination.unwrap().total, 42);
}

#[test]
fn test_order_list_tolerates_missing_keys() {
    let page: OrderList = serde_json::from_str("{}").expect("empty envelope should parse");
    assert!(page.orders.is_empty());
    assert!(page.pagination.is_none());
}

#[test]
fn test_order_detail_with_items() {
    let body = r#"{
        "order_id": "a3a5a7cb-0a80-4a64-93f1-5c7e6e9f0b11",
        "customer_id": "CUST001",
        "total_amount": 2425.99,
        "status": "processing",
        "created_at": "2026-08-01T09:12:45.123456",
        "items": [
            { "product_id": "PROD001", "quantity": 2, "price": 1200.00 },
            { "product_id": "PROD002", "quantity": 1, "price": 25.99 }
        ],
        "execution_arn": "arn:aws:states:us-east-1:123456789012:execution:order-workflow:order-a3a5a7cb"
    }"#;

    let order: Order = serde_json::from_str(body).expect("detail should parse");
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.items[0].subtotal(), 2400.00);
    assert_eq!(order.items[1].subtotal(), 25.99);

    // The client-side total rule: item subtotals add up to the
    // server-echoed total_amount when prices were unchanged
    let computed: f64 = order.items.iter().map(|i| i.subtotal()).sum();
    assert_eq!(computed, order.total_amount);
    assert!(order.execution_arn.is_some());
}

#[test]
fn test_unrecognized_status_falls_back() {
    let order: Order = serde_json::from_str(
        r#"{ "order_id": "x", "customer_id": "y", "status": "refunded" }"#,
    )
    .expect("unknown status must not fail the order");
    assert_eq!(order.status, OrderStatus::Unknown);
    assert_eq!(order.status.tone(), Tone::Secondary);

    // A missing status behaves the same way
    let order: Order =
        serde_json::from_str(r#"{ "order_id": "x", "customer_id": "y" }"#).unwrap();
    assert_eq!(order.status, OrderStatus::Unknown);
}

#[test]
fn test_status_tones() {
    assert_eq!(OrderStatus::Pending.tone(), Tone::Warning);
    assert_eq!(OrderStatus::Processing.tone(), Tone::Info);
    assert_eq!(OrderStatus::Completed.tone(), Tone::Success);
    assert_eq!(OrderStatus::Delivered.tone(), Tone::Success);
    assert_eq!(OrderStatus::Cancelled.tone(), Tone::Danger);
    assert_eq!(OrderStatus::Failed.tone(), Tone::Danger);
    assert_eq!(OrderStatus::Shipped.tone(), Tone::Primary);

    assert!(OrderStatus::Completed.is_fulfilled());
    assert!(OrderStatus::Delivered.is_fulfilled());
    assert!(!OrderStatus::Pending.is_fulfilled());
}
