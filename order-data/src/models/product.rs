use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Product {
    pub product_id: String,

    pub product_name: String,

    pub price: f64,

    #[serde(default)]
    pub stock_quantity: u32,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub category: Option<String>,
}

/// Envelope of `GET /products`.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct ProductList {
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Id-keyed view over a fetched product list, used while composing an
/// order. Iteration order is stable so listings render deterministically.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductCatalog {
    products: BTreeMap<String, Product>,
}

impl ProductCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        let products = products
            .into_iter()
            .map(|p| (p.product_id.clone(), p))
            .collect();
        Self { products }
    }

    pub fn get(&self, product_id: &str) -> Option<&Product> {
        self.products.get(product_id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }
}
