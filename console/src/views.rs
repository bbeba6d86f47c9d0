use std::fmt::Write as _;
use std::time::{Duration, Instant};

use order_data::models::draft::DraftOrder;
use order_data::models::order::{Order, OrderList, OrderStatus, Pagination, Tone};
use order_data::models::workflow::WorkflowExecution;

use crate::activity::{ActivityKind, ActivityLog};
use crate::client::{ApiClient, ApiError};

/// The dashboard aggregates over at most this many orders. Past that
/// the numbers are a sample, not a true total.
pub const DASHBOARD_SAMPLE_LIMIT: u32 = 100;
pub const ORDERS_PAGE_SIZE: u32 = 10;
const RECENT_ORDER_COUNT: usize = 5;

/// Aggregates derived from one fetched page of orders.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total_orders: u64,
    pub total_revenue: f64,
    pub pending_orders: usize,
    pub completed_orders: usize,
    pub recent: Vec<Order>,
}

impl DashboardSummary {
    /// Revenue and the status counts come from the fetched page only;
    /// the order count prefers the server-side total when present.
    pub fn from_page(page: &OrderList) -> Self {
        let orders = &page.orders;
        Self {
            total_orders: page
                .pagination
                .as_ref()
                .map_or(orders.len() as u64, |p| p.total),
            total_revenue: orders.iter().map(|o| o.total_amount).sum(),
            pending_orders: orders
                .iter()
                .filter(|o| o.status == OrderStatus::Pending)
                .count(),
            completed_orders: orders.iter().filter(|o| o.status.is_fulfilled()).count(),
            recent: orders.iter().take(RECENT_ORDER_COUNT).cloned().collect(),
        }
    }
}

pub async fn refresh_dashboard(client: &ApiClient) -> Result<DashboardSummary, ApiError> {
    let page = client.list_orders(1, DASHBOARD_SAMPLE_LIMIT).await?;
    Ok(DashboardSummary::from_page(&page))
}

/// One page of the order listing.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdersView {
    pub page: u32,
    pub orders: Vec<Order>,
    pub pagination: Option<Pagination>,
}

pub async fn refresh_orders(client: &ApiClient, page: u32) -> Result<OrdersView, ApiError> {
    let page = page.max(1);
    let list = client.list_orders(page, ORDERS_PAGE_SIZE).await?;
    Ok(OrdersView {
        page: list.pagination.as_ref().map_or(page, |p| p.page),
        orders: list.orders,
        pagination: list.pagination,
    })
}

/// Move from `current` by `delta` pages; anything below page 1 leaves
/// the page unchanged.
pub fn step_page(current: u32, delta: i32) -> u32 {
    let next = i64::from(current) + i64::from(delta);
    if next < 1 {
        current
    } else {
        next as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthBand {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthBand {
    pub fn classify(latency: Duration) -> Self {
        let ms = latency.as_millis();
        if ms < 500 {
            HealthBand::Healthy
        } else if ms < 1000 {
            HealthBand::Degraded
        } else {
            HealthBand::Unhealthy
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthBand::Healthy => "healthy",
            HealthBand::Degraded => "degraded",
            HealthBand::Unhealthy => "unhealthy",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            HealthBand::Healthy => Tone::Success,
            HealthBand::Degraded => Tone::Warning,
            HealthBand::Unhealthy => Tone::Danger,
        }
    }
}

/// Outcome of one connectivity probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorReport {
    pub latency: Duration,
    pub band: HealthBand,
    pub alerts: u32,
}

/// Probe the API with a minimal request (`limit=1`), purely to measure
/// reachability and latency.
pub async fn refresh_monitor(client: &ApiClient) -> Result<MonitorReport, ApiError> {
    let started = Instant::now();
    match client.list_orders(1, 1).await {
        Ok(_) => {
            let latency = started.elapsed();
            client.activity().record(
                ActivityKind::Success,
                format!("System check - API responding ({}ms)", latency.as_millis()),
            );
            Ok(MonitorReport {
                latency,
                band: HealthBand::classify(latency),
                alerts: 0,
            })
        }
        Err(e) => {
            client
                .activity()
                .record(ActivityKind::Error, format!("System check failed: {e}"));
            Err(e)
        }
    }
}

// ---- rendering ----

fn badge(label: &str, tone: Tone) -> String {
    let color = match tone {
        Tone::Primary => "94",
        Tone::Secondary => "90",
        Tone::Success => "92",
        Tone::Danger => "91",
        Tone::Warning => "93",
        Tone::Info => "96",
        Tone::Dark => "35",
    };
    format!("\x1b[{color}m{label}\x1b[0m")
}

fn date_of(timestamp: Option<&str>) -> &str {
    timestamp
        .and_then(|t| t.split('T').next())
        .unwrap_or("N/A")
}

fn order_row(order: &Order) -> String {
    format!(
        "{:<38} {:<12} {:<12} {:<24} ${:>10.2}",
        order.order_id,
        order.customer_id,
        date_of(order.created_at.as_deref()),
        badge(order.status.as_str(), order.status.tone()),
        order.total_amount
    )
}

fn order_header() -> String {
    format!(
        "{:<38} {:<12} {:<12} {:<13} {:>11}",
        "ORDER ID", "CUSTOMER", "CREATED", "STATUS", "TOTAL"
    )
}

pub fn render_dashboard(summary: &DashboardSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total orders:     {}", summary.total_orders);
    let _ = writeln!(out, "Total revenue:    ${:.2}", summary.total_revenue);
    let _ = writeln!(out, "Pending orders:   {}", summary.pending_orders);
    let _ = writeln!(out, "Completed orders: {}", summary.completed_orders);
    let _ = writeln!(out);
    let _ = writeln!(out, "Recent orders");
    let _ = writeln!(out, "{}", order_header());
    if summary.recent.is_empty() {
        let _ = writeln!(out, "No orders found");
    }
    for order in &summary.recent {
        let _ = writeln!(out, "{}", order_row(order));
    }
    out
}

pub fn render_orders(view: &OrdersView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", order_header());
    if view.orders.is_empty() {
        let _ = writeln!(out, "No orders found");
    }
    for order in &view.orders {
        let _ = writeln!(out, "{}", order_row(order));
    }
    let _ = writeln!(out);
    match &view.pagination {
        Some(p) => {
            let _ = writeln!(out, "Page {} of {} ({} orders)", p.page, p.pages, p.total);
        }
        None => {
            let _ = writeln!(out, "Page {}", view.page);
        }
    }
    if view.page > 1 {
        let _ = writeln!(
            out,
            "Previous: orderdesk orders --page {}",
            step_page(view.page, -1)
        );
    }
    let _ = writeln!(
        out,
        "Next:     orderdesk orders --page {}",
        step_page(view.page, 1)
    );
    out
}

pub fn render_order_detail(order: &Order) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Order ID:     {}", order.order_id);
    let _ = writeln!(
        out,
        "Status:       {}",
        badge(order.status.as_str(), order.status.tone())
    );
    let _ = writeln!(out, "Customer ID:  {}", order.customer_id);
    let _ = writeln!(out, "Total amount: ${:.2}", order.total_amount);
    let _ = writeln!(
        out,
        "Created at:   {}",
        order.created_at.as_deref().unwrap_or("N/A")
    );
    let _ = writeln!(
        out,
        "Updated at:   {}",
        order.updated_at.as_deref().unwrap_or("N/A")
    );
    if !order.items.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Items");
        let _ = writeln!(
            out,
            "{:<12} {:>8} {:>12} {:>12}",
            "PRODUCT", "QTY", "PRICE", "SUBTOTAL"
        );
        for item in &order.items {
            let _ = writeln!(
                out,
                "{:<12} {:>8} {:>12.2} {:>12.2}",
                item.product_id,
                item.quantity,
                item.price,
                item.subtotal()
            );
        }
    }
    out
}

pub fn render_workflow(execution: &WorkflowExecution) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Workflow status: {}",
        badge(execution.status.as_str(), execution.status.tone())
    );
    if let Some(name) = &execution.execution_name {
        let _ = writeln!(out, "Execution name:  {name}");
    }
    if let Some(arn) = &execution.execution_arn {
        let _ = writeln!(out, "Execution ARN:   {arn}");
    }
    if let Some(start) = &execution.start_date {
        let _ = writeln!(out, "Started:         {start}");
    }
    if let Some(stop) = &execution.stop_date {
        let _ = writeln!(out, "Stopped:         {stop}");
    }
    if let Some(input) = &execution.input {
        let _ = writeln!(out, "\nInput:");
        let _ = writeln!(
            out,
            "{}",
            serde_json::to_string_pretty(input).unwrap_or_else(|_| input.to_string())
        );
    }
    if let Some(output) = &execution.output {
        let _ = writeln!(out, "\nOutput:");
        let _ = writeln!(
            out,
            "{}",
            serde_json::to_string_pretty(output).unwrap_or_else(|_| output.to_string())
        );
    }
    out
}

pub fn render_draft(draft: &DraftOrder) -> String {
    let mut out = String::new();
    for (index, line) in draft.lines().iter().enumerate() {
        match line.product() {
            Some(product) => {
                let _ = writeln!(
                    out,
                    "{}. {} x{} @ ${:.2} = ${:.2}",
                    index + 1,
                    product.product_name,
                    line.quantity(),
                    product.price,
                    line.subtotal()
                );
            }
            None => {
                let _ = writeln!(out, "{}. (no product selected)", index + 1);
            }
        }
    }
    let _ = writeln!(out, "Order total: ${:.2}", draft.total());
    out
}

pub fn render_monitor(report: &MonitorReport, log: &ActivityLog) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Probe latency:      {}ms ({})",
        report.latency.as_millis(),
        badge(report.band.label(), report.band.tone())
    );
    if let Some(last) = log.last_response_time() {
        let _ = writeln!(out, "Last API response:  {}ms", last.as_millis());
    }
    let _ = writeln!(out, "Alerts:             {}", report.alerts);
    let _ = write!(out, "{}", render_activity(log));
    out
}

pub fn render_activity(log: &ActivityLog) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nActivity");
    for entry in log.entries() {
        let marker = match entry.kind() {
            ActivityKind::Info => " ",
            ActivityKind::Success => "+",
            ActivityKind::Error => "!",
        };
        let _ = writeln!(out, "{} [{}] {}", marker, entry.time_label(), entry.message());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use order_data::models::order::OrderStatus;

    fn order(id: &str, status: OrderStatus, total: f64) -> Order {
        Order {
            order_id: id.to_string(),
            customer_id: "CUST001".to_string(),
            status,
            total_amount: total,
            created_at: Some("2026-08-01T09:12:45.123456".to_string()),
            updated_at: None,
            items: Vec::new(),
            execution_arn: None,
        }
    }

    #[test]
    fn test_dashboard_aggregation() {
        let page = OrderList {
            orders: vec![
                order("o1", OrderStatus::Pending, 100.0),
                order("o2", OrderStatus::Delivered, 200.0),
                order("o3", OrderStatus::Completed, 300.0),
                order("o4", OrderStatus::Pending, 50.0),
                order("o5", OrderStatus::Cancelled, 75.0),
                order("o6", OrderStatus::Processing, 25.0),
            ],
            pagination: Some(Pagination {
                page: 1,
                limit: 100,
                total: 250,
                pages: 3,
            }),
        };

        let summary = DashboardSummary::from_page(&page);
        assert_eq!(summary.total_orders, 250);
        assert_eq!(summary.total_revenue, 750.0);
        assert_eq!(summary.pending_orders, 2);
        assert_eq!(summary.completed_orders, 2);
        assert_eq!(summary.recent.len(), 5);
        assert_eq!(summary.recent[0].order_id, "o1");
    }

    #[test]
    fn test_dashboard_without_pagination_uses_page_length() {
        let page = OrderList {
            orders: vec![order("o1", OrderStatus::Pending, 10.0)],
            pagination: None,
        };
        let summary = DashboardSummary::from_page(&page);
        assert_eq!(summary.total_orders, 1);
        assert_eq!(summary.recent.len(), 1);
    }

    #[test]
    fn test_page_stepping_never_goes_below_one() {
        assert_eq!(step_page(1, -1), 1);
        assert_eq!(step_page(1, -5), 1);
        assert_eq!(step_page(2, -1), 1);
        assert_eq!(step_page(1, 1), 2);
        assert_eq!(step_page(7, 3), 10);
    }

    #[test]
    fn test_health_bands() {
        assert_eq!(
            HealthBand::classify(Duration::from_millis(499)),
            HealthBand::Healthy
        );
        assert_eq!(
            HealthBand::classify(Duration::from_millis(500)),
            HealthBand::Degraded
        );
        assert_eq!(
            HealthBand::classify(Duration::from_millis(999)),
            HealthBand::Degraded
        );
        assert_eq!(
            HealthBand::classify(Duration::from_millis(1000)),
            HealthBand::Unhealthy
        );
    }

    #[test]
    fn test_render_dashboard_mentions_the_numbers() {
        let page = OrderList {
            orders: vec![order("o1", OrderStatus::Pending, 2425.99)],
            pagination: None,
        };
        let rendered = render_dashboard(&DashboardSummary::from_page(&page));
        assert!(rendered.contains("$2425.99"));
        assert!(rendered.contains("pending"));
        assert!(rendered.contains("o1"));
    }
}
