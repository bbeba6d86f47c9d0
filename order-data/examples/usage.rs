use order_data::models::draft::DraftOrder;
use order_data::models::product::{Product, ProductCatalog};

fn main() {
    let catalog = ProductCatalog::new(vec![
        Product {
            product_id: "PROD001".to_string(),
            product_name: "Laptop Pro".to_string(),
            price: 1200.00,
            stock_quantity: 10,
            description: Some("High-performance laptop with 16GB RAM".to_string()),
            category: Some("Electronics".to_string()),
        },
        Product {
            product_id: "PROD002".to_string(),
            product_name: "Wireless Mouse".to_string(),
            price: 25.99,
            stock_quantity: 50,
            description: Some("Ergonomic wireless mouse".to_string()),
            category: Some("Electronics".to_string()),
        },
    ]);

    let mut draft = DraftOrder::new();
    draft.set_customer("CUST001");

    let first = draft.lines()[0].id();
    draft
        .set_line_product(first, catalog.get("PROD001").unwrap())
        .expect("first line exists");
    draft.set_line_quantity(first, 2).expect("first line exists");

    let second = draft.add_line();
    draft
        .set_line_product(second, catalog.get("PROD002").unwrap())
        .expect("second line exists");

    println!("Draft order:");
    for (index, line) in draft.lines().iter().enumerate() {
        let product = line.product().expect("every line is bound");
        println!(
            "  {}. {} x{} @ ${:.2} = ${:.2}",
            index + 1,
            product.product_name,
            line.quantity(),
            product.price,
            line.subtotal()
        );
    }
    println!("Total: ${:.2}", draft.total());

    let request = draft.build_request().expect("draft should be submittable");
    println!("\nSubmission payload:");
    println!("{}", serde_json::to_string_pretty(&request).unwrap());
}
