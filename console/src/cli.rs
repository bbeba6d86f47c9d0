use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "orderdesk",
    version,
    about = "Admin console for the order management API"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Order counts, revenue and the most recent orders
    Dashboard,

    /// Paginated order listing
    Orders {
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Inspect or modify a single order
    #[command(subcommand)]
    Order(OrderCommand),

    /// Compose and submit a new order
    Create {
        /// Customer placing the order
        #[arg(long)]
        customer: String,

        /// Line item as PRODUCT_ID:QUANTITY; repeatable
        #[arg(long = "item", value_parser = parse_item_spec, required = true)]
        items: Vec<ItemSpec>,
    },

    /// API connectivity and latency check
    Monitor,

    /// Workflow execution status lookup
    Workflow {
        /// Execution ARN or order id
        execution_ref: String,
    },

    /// Manage persisted console settings
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Debug, Subcommand)]
pub enum OrderCommand {
    /// Full order details, items and workflow state included
    View { order_id: String },

    /// Set the order status
    SetStatus { order_id: String, status: String },

    /// Delete the order
    Delete {
        order_id: String,

        /// Skip the confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Print the stored settings (key redacted)
    Show,

    /// Update stored settings
    Set {
        #[arg(long)]
        api_endpoint: Option<String>,

        #[arg(long)]
        api_key: Option<String>,

        #[arg(long)]
        region: Option<String>,

        #[arg(long)]
        debug: Option<bool>,
    },

    /// Probe the API with the stored (or provided) credentials
    Test {
        #[arg(long)]
        api_endpoint: Option<String>,

        #[arg(long)]
        api_key: Option<String>,
    },

    /// Remove the settings file
    Clear {
        /// Skip the confirmation
        #[arg(long)]
        yes: bool,
    },
}

/// One `--item` argument: product id and quantity joined by a colon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
    pub product_id: String,
    pub quantity: u32,
}

pub fn parse_item_spec(raw: &str) -> Result<ItemSpec, String> {
    let (product_id, quantity) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected PRODUCT_ID:QUANTITY, got '{raw}'"))?;
    if product_id.is_empty() {
        return Err(format!("missing product id in '{raw}'"));
    }
    let quantity = quantity
        .parse::<u32>()
        .map_err(|_| format!("invalid quantity '{quantity}' in '{raw}'"))?;
    Ok(ItemSpec {
        product_id: product_id.to_string(),
        quantity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_spec_parsing() {
        assert_eq!(
            parse_item_spec("PROD001:2"),
            Ok(ItemSpec {
                product_id: "PROD001".to_string(),
                quantity: 2
            })
        );

        // Zero parses here; the draft validation is what rejects it,
        // with a message naming the line
        assert_eq!(parse_item_spec("PROD001:0").unwrap().quantity, 0);

        assert!(parse_item_spec("PROD001").is_err());
        assert!(parse_item_spec(":2").is_err());
        assert!(parse_item_spec("PROD001:two").is_err());
        assert!(parse_item_spec("PROD001:-1").is_err());
    }
}
