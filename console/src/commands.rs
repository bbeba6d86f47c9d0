use std::error::Error;
use std::time::Instant;

use order_data::models::draft::DraftOrder;
use order_data::models::product::ProductCatalog;

use crate::activity::ActivityKind;
use crate::cli::{Cli, Command, ItemSpec, OrderCommand, SettingsCommand};
use crate::client::{ApiClient, ApiError};
use crate::config::config::{settings_path, Settings};
use crate::views;

type CommandResult = Result<(), Box<dyn Error>>;

pub async fn run(cli: Cli, settings: Settings) -> CommandResult {
    match cli.command {
        Command::Dashboard => dashboard(&client(&settings)?).await,
        Command::Orders { page } => orders(&client(&settings)?, page).await,
        Command::Order(command) => order(&client(&settings)?, command).await,
        Command::Create { customer, items } => create(&client(&settings)?, customer, items).await,
        Command::Monitor => monitor(&client(&settings)?).await,
        Command::Workflow { execution_ref } => workflow(&client(&settings)?, &execution_ref).await,
        Command::Settings(command) => manage_settings(settings, command).await,
    }
}

/// Build the API client, or fail with the configuration notice before
/// anything touches the network.
fn client(settings: &Settings) -> Result<ApiClient, Box<dyn Error>> {
    let config = settings
        .client_config()
        .map_err(|e| ApiError::from(e).user_message())?;
    Ok(ApiClient::new(config))
}

fn fail(e: ApiError) -> Box<dyn Error> {
    e.user_message().into()
}

async fn dashboard(client: &ApiClient) -> CommandResult {
    let summary = views::refresh_dashboard(client).await.map_err(fail)?;
    print!("{}", views::render_dashboard(&summary));
    Ok(())
}

async fn orders(client: &ApiClient, page: u32) -> CommandResult {
    let view = views::refresh_orders(client, page).await.map_err(fail)?;
    print!("{}", views::render_orders(&view));
    Ok(())
}

async fn order(client: &ApiClient, command: OrderCommand) -> CommandResult {
    match command {
        OrderCommand::View { order_id } => {
            let order = client.get_order(&order_id).await.map_err(fail)?;
            print!("{}", views::render_order_detail(&order));

            // Workflow state is shown when available; the order view
            // stays useful when the lookup fails.
            if let Some(arn) = &order.execution_arn {
                match client.workflow_status(arn).await {
                    Ok(execution) => {
                        println!();
                        print!("{}", views::render_workflow(&execution));
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, "could not fetch workflow status");
                    }
                }
            }
            Ok(())
        }
        OrderCommand::SetStatus { order_id, status } => {
            let ack = client
                .update_order_status(&order_id, &status)
                .await
                .map_err(fail)?;
            println!(
                "{}",
                ack.message.as_deref().unwrap_or("Order status updated")
            );
            Ok(())
        }
        OrderCommand::Delete { order_id, yes } => {
            if !yes {
                return Err(format!(
                    "Refusing to delete order {order_id} without --yes; this cannot be undone"
                )
                .into());
            }
            let ack = client.delete_order(&order_id).await.map_err(fail)?;
            println!("{}", ack.message.as_deref().unwrap_or("Order deleted"));
            Ok(())
        }
    }
}

async fn create(client: &ApiClient, customer: String, items: Vec<ItemSpec>) -> CommandResult {
    // Load the form data first: the customer must exist and every line
    // binds a product snapshot from the live catalog.
    client
        .activity()
        .record(ActivityKind::Info, "Loading customer and product data");
    let customers = client.customers().await.map_err(fail)?;
    if !customers.iter().any(|c| c.customer_id == customer) {
        return Err(format!("Unknown customer: {customer}").into());
    }

    let catalog = ProductCatalog::new(client.products().await.map_err(fail)?);
    if catalog.is_empty() {
        return Err("No products found in inventory".into());
    }

    let mut draft = DraftOrder::new();
    draft.set_customer(customer.clone());
    for (index, spec) in items.iter().enumerate() {
        let line = if index == 0 {
            draft.lines()[0].id()
        } else {
            draft.add_line()
        };
        let product = catalog
            .get(&spec.product_id)
            .ok_or_else(|| format!("Unknown product: {}", spec.product_id))?;
        draft
            .set_line_product(line, product)
            .map_err(|e| e.to_string())?;
        draft
            .set_line_quantity(line, spec.quantity)
            .map_err(|e| e.to_string())?;
    }

    print!("{}", views::render_draft(&draft));

    // All submission preconditions run locally; a rejected draft never
    // reaches the API.
    let request = draft.build_request().map_err(|e| e.to_string())?;
    let created = client.create_order(&request).await.map_err(fail)?;

    println!();
    println!("Order created: {}", created.order_id);
    if let Some(arn) = &created.execution_arn {
        println!("Workflow execution: {arn}");
        println!("Track it with: orderdesk workflow {}", created.order_id);
    }
    Ok(())
}

async fn monitor(client: &ApiClient) -> CommandResult {
    match views::refresh_monitor(client).await {
        Ok(report) => {
            print!("{}", views::render_monitor(&report, client.activity()));
            Ok(())
        }
        Err(e) => {
            print!("{}", views::render_activity(client.activity()));
            Err(fail(e))
        }
    }
}

async fn workflow(client: &ApiClient, execution_ref: &str) -> CommandResult {
    let execution = client.workflow_status(execution_ref).await.map_err(fail)?;
    print!("{}", views::render_workflow(&execution));
    Ok(())
}

async fn manage_settings(settings: Settings, command: SettingsCommand) -> CommandResult {
    let path = settings_path();
    match command {
        SettingsCommand::Show => {
            println!("Settings file: {}", path.display());
            println!(
                "API endpoint:  {}",
                if settings.api_endpoint.is_empty() {
                    "not set"
                } else {
                    settings.api_endpoint.as_str()
                }
            );
            println!(
                "API key:       {}",
                if settings.api_key.is_empty() {
                    "not set"
                } else {
                    "***configured***"
                }
            );
            println!("Region:        {}", settings.region);
            println!("Debug:         {}", settings.debug);
            println!(
                "Status:        {}",
                if settings.is_configured() {
                    "configured"
                } else {
                    "not configured"
                }
            );
            Ok(())
        }
        SettingsCommand::Set {
            api_endpoint,
            api_key,
            region,
            debug,
        } => {
            if api_endpoint.is_none() && api_key.is_none() && region.is_none() && debug.is_none() {
                return Err("Nothing to update; pass at least one --option".into());
            }
            let mut updated = settings;
            if let Some(endpoint) = api_endpoint {
                updated.api_endpoint = endpoint.trim().to_string();
            }
            if let Some(key) = api_key {
                updated.api_key = key.trim().to_string();
            }
            if let Some(region) = region {
                updated.region = region;
            }
            if let Some(debug) = debug {
                updated.debug = debug;
            }
            updated.save_to(&path).map_err(|e| e.to_string())?;
            println!("Settings saved to {}", path.display());
            Ok(())
        }
        SettingsCommand::Test {
            api_endpoint,
            api_key,
        } => {
            let candidate = Settings {
                api_endpoint: api_endpoint.unwrap_or(settings.api_endpoint),
                api_key: api_key.unwrap_or(settings.api_key),
                ..Settings::default()
            };
            let client = ApiClient::new(
                candidate
                    .client_config()
                    .map_err(|e| ApiError::from(e).user_message())?,
            );

            let started = Instant::now();
            match client.list_orders(1, 1).await {
                Ok(list) => {
                    println!("Connection successful");
                    println!("Response time: {}ms", started.elapsed().as_millis());
                    println!("Found {} orders", list.orders.len());
                    Ok(())
                }
                Err(e) => Err(format!("Connection failed: {}", e.user_message()).into()),
            }
        }
        SettingsCommand::Clear { yes } => {
            if !yes {
                return Err("Refusing to clear settings without --yes".into());
            }
            Settings::clear(&path).map_err(|e| e.to_string())?;
            println!("Settings cleared");
            Ok(())
        }
    }
}
