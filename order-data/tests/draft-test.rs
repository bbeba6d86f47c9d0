use order_data::models::draft::DraftOrder;
use order_data::models::errors::{DraftError, LineIssue};
use order_data::models::product::Product;

fn laptop() -> Product {
    Product {
        product_id: "PROD001".to_string(),
        product_name: "Laptop Pro".to_string(),
        price: 1200.00,
        stock_quantity: 10,
        description: Some("High-performance laptop".to_string()),
        category: Some("Electronics".to_string()),
    }
}

fn mouse() -> Product {
    Product {
        product_id: "PROD002".to_string(),
        product_name: "Wireless Mouse".to_string(),
        price: 25.99,
        stock_quantity: 50,
        description: Some("Ergonomic wireless mouse".to_string()),
        category: Some("Electronics".to_string()),
    }
}

#[test]
fn test_draft_lifecycle() {
    // Stage 1: fresh draft starts with one empty line and no customer
    let mut draft = DraftOrder::new();
    assert_eq!(draft.lines().len(), 1);
    assert!(draft.customer_id().is_none());
    assert_eq!(draft.total(), 0.0);
    assert!(!draft.is_submittable());

    // Stage 2: bind products and quantities
    let first = draft.lines()[0].id();
    draft.set_line_product(first, &laptop()).unwrap();
    draft.set_line_quantity(first, 2).unwrap();

    let second = draft.add_line();
    draft.set_line_product(second, &mouse()).unwrap();
    assert_eq!(draft.line(second).unwrap().quantity(), 1);

    // Stage 3: totals recompute from the line snapshots
    assert_eq!(draft.line(first).unwrap().subtotal(), 2400.00);
    assert_eq!(draft.line(second).unwrap().subtotal(), 25.99);
    assert_eq!(draft.total(), 2425.99);

    // Stage 4: submission produces the wire payload without prices
    draft.set_customer("CUST001");
    let request = draft.build_request().expect("draft should be submittable");
    assert_eq!(request.customer_id, "CUST001");
    assert_eq!(request.items.len(), 2);
    assert_eq!(request.items[0].product_id, "PROD001");
    assert_eq!(request.items[0].quantity, 2);
    assert_eq!(request.items[1].product_id, "PROD002");
    assert_eq!(request.items[1].quantity, 1);

    // Stage 5: reset returns to the initial state
    draft.reset();
    assert_eq!(draft.lines().len(), 1);
    assert!(draft.customer_id().is_none());
    assert_eq!(draft.total(), 0.0);
}

#[test]
fn test_quantity_bounds() {
    let mut draft = DraftOrder::new();
    let line = draft.lines()[0].id();
    draft.set_line_product(line, &laptop()).unwrap();

    // Zero is rejected outright
    draft.set_line_quantity(line, 0).unwrap();
    assert_eq!(
        draft.line(line).unwrap().validate(),
        Err(LineIssue::QuantityZero)
    );
    assert!(!draft.line_is_valid(line));

    // Anything within [1, stock] is accepted
    for quantity in [1, 5, 10] {
        draft.set_line_quantity(line, quantity).unwrap();
        assert!(draft.line_is_valid(line), "quantity {quantity} should pass");
    }

    // One past the snapshotted stock marks the line invalid and blocks
    // submission even with every other precondition satisfied
    draft.set_line_quantity(line, 11).unwrap();
    assert_eq!(
        draft.line(line).unwrap().validate(),
        Err(LineIssue::InsufficientStock {
            requested: 11,
            stock: 10
        })
    );
    draft.set_customer("CUST001");
    assert_eq!(
        draft.build_request(),
        Err(DraftError::InvalidLine {
            line: 1,
            issue: LineIssue::InsufficientStock {
                requested: 11,
                stock: 10
            }
        })
    );
}

#[test]
fn test_submission_gating() {
    // No customer selected
    let mut draft = DraftOrder::new();
    let line = draft.lines()[0].id();
    draft.set_line_product(line, &mouse()).unwrap();
    assert_eq!(draft.build_request(), Err(DraftError::NoCustomer));

    // Customer selected but a line has no product
    let mut draft = DraftOrder::new();
    draft.set_customer("CUST001");
    assert_eq!(
        draft.build_request(),
        Err(DraftError::MissingProduct { line: 1 })
    );

    // The failing line is reported by position
    let first = draft.lines()[0].id();
    draft.set_line_product(first, &mouse()).unwrap();
    draft.add_line();
    assert_eq!(
        draft.build_request(),
        Err(DraftError::MissingProduct { line: 2 })
    );
}

#[test]
fn test_line_removal_rules() {
    let mut draft = DraftOrder::new();
    let first = draft.lines()[0].id();

    // The first line is fixed
    assert_eq!(draft.remove_line(first), Err(DraftError::FirstLine));
    assert_eq!(draft.lines().len(), 1);

    // Later lines can go
    let second = draft.add_line();
    assert_eq!(draft.remove_line(second), Ok(()));
    assert_eq!(draft.lines().len(), 1);

    // Removing twice reports the stale handle
    assert_eq!(draft.remove_line(second), Err(DraftError::UnknownLine));
}
