use serde::{Deserialize, Serialize};

/// An order as returned by the management API.
///
/// List responses omit `items`; only `GET /orders/{id}` populates them.
/// Timestamps are carried verbatim as the server sends them (ISO-8601
/// text without a guaranteed offset) and are display-only on this side.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Order {
    pub order_id: String,

    pub customer_id: String,

    #[serde(default)]
    pub status: OrderStatus,

    #[serde(default)]
    pub total_amount: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<OrderItem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_arn: Option<String>,
}

/// One product line within a persisted order. `price` is the unit price
/// the server snapshotted when the order was created.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OrderItem {
    pub product_id: String,

    pub quantity: u32,

    pub price: f64,
}

impl OrderItem {
    pub fn subtotal(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }
}

/// Server-side order state. The set is open-ended: the API may grow new
/// states, so anything unrecognized deserializes to `Unknown` rather
/// than failing the whole response.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
    Failed,
    Shipped,
    Delivered,
    #[default]
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Failed => "failed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Unknown => "unknown",
        }
    }

    /// Completed from the customer's point of view.
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Delivered)
    }

    pub fn tone(&self) -> Tone {
        match self {
            OrderStatus::Pending => Tone::Warning,
            OrderStatus::Processing => Tone::Info,
            OrderStatus::Completed | OrderStatus::Delivered => Tone::Success,
            OrderStatus::Cancelled | OrderStatus::Failed => Tone::Danger,
            OrderStatus::Shipped => Tone::Primary,
            OrderStatus::Unknown => Tone::Secondary,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display tone for a status badge. `Secondary` is the fallback for
/// anything the console does not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Primary,
    Secondary,
    Success,
    Danger,
    Warning,
    Info,
    Dark,
}

/// Envelope of `GET /orders`. Both keys are optional on the wire; a
/// missing `orders` array means an empty page, and `pagination` is only
/// present when the server computed totals.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct OrderList {
    #[serde(default)]
    pub orders: Vec<Order>,

    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    #[serde(default)]
    pub page: u32,

    #[serde(default)]
    pub limit: u32,

    #[serde(default)]
    pub total: u64,

    #[serde(default)]
    pub pages: u64,
}

/// Body of `POST /orders`. Prices are intentionally absent: the server
/// prices items from its own inventory at creation time.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct CreateOrderRequest {
    pub customer_id: String,
    pub items: Vec<NewOrderItem>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct NewOrderItem {
    pub product_id: String,
    pub quantity: u32,
}

/// Response of `POST /orders`. Servers echo at least the order id and
/// the workflow execution reference; anything else is tolerated.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CreatedOrder {
    pub order_id: String,

    #[serde(default)]
    pub execution_arn: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub total_amount: Option<f64>,

    #[serde(default)]
    pub status: Option<OrderStatus>,
}

/// Acknowledgement body of `PUT /orders/{id}` and `DELETE /orders/{id}`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub order_id: Option<String>,

    #[serde(default)]
    pub status: Option<OrderStatus>,
}
