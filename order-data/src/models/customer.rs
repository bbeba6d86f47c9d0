use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Customer {
    pub customer_id: String,

    pub customer_name: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,
}

/// Envelope of `GET /customers`.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct CustomerList {
    #[serde(default)]
    pub customers: Vec<Customer>,
}
