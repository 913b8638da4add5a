use clap::Parser;
use menu_cart::domain::model::order_total;
use menu_cart::domain::ports::{ConfigProvider, MenuCatalog, OrderGateway, ReadyFeed};
use menu_cart::utils::{logger, validation::Validate};
use menu_cart::{ApiClient, CartError, CartWorkflow, CliConfig, SharedReadyFeed, StatusPoller, TomlConfig};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting menu-cart CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let selections = match cli.parse_selections() {
        Ok(selections) => selections,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    // 選擇配置來源：TOML 檔案或命令列
    match cli.config.clone() {
        Some(path) => {
            let config = match TomlConfig::from_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    tracing::error!("❌ Failed to load config file {}: {}", path, e);
                    eprintln!("❌ {}", e.user_friendly_message());
                    std::process::exit(1);
                }
            };
            run(&config, &selections, cli.watch).await
        }
        None => run(&cli, &selections, cli.watch).await,
    }
}

async fn run<C: ConfigProvider + Validate>(
    config: &C,
    selections: &[(String, u32)],
    watch: bool,
) -> anyhow::Result<()> {
    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let api = ApiClient::new(
        config.api_base(),
        Duration::from_secs(config.request_timeout_seconds()),
    )?;
    let ready_feed = SharedReadyFeed::new();
    let mut workflow = CartWorkflow::new(
        api.clone(),
        api,
        ready_feed,
        config.user_email(),
        config.serial_number().map(str::to_string),
    );

    if workflow.load_menu().await.is_err() {
        eprintln!(
            "❌ {}",
            workflow.last_error().unwrap_or("Error fetching menu items.")
        );
        std::process::exit(2);
    }

    println!("Menu for {}", config.user_email());
    if workflow.menu().is_empty() {
        println!("No menu items available for this user.");
    }
    for item in workflow.menu() {
        println!("  [{}] {} - ${:.2}", item.id, item.name, item.price);
    }

    for (item_id, quantity) in selections {
        workflow.adjust_quantity(item_id, i32::try_from(*quantity).unwrap_or(i32::MAX));
    }

    if selections.is_empty() {
        println!("\nNothing selected; pass --item <ID>=<QTY> to place an order.");
        return Ok(());
    }

    match workflow.submit_order().await {
        Ok(order_id) => {
            let order = workflow
                .history()
                .iter()
                .find(|order| order.order_id == order_id)
                .expect("submitted order is in history");

            println!("\n✅ Order placed!");
            println!("Order ID: {}", order_id);
            if let Some(serial) = config.serial_number() {
                println!("Serial Number: {}", serial);
            }
            for line in &order.items {
                println!("  {} (x{}) - ${:.2}", line.name, line.quantity, line.total);
            }
            println!("Total: ${:.2}", order_total(&order.items));
        }
        Err(CartError::EmptyOrderError) => {
            eprintln!("❌ {}", CartError::EmptyOrderError.user_friendly_message());
            return Ok(());
        }
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Your selections are untouched; run the same command to retry.");
            std::process::exit(3);
        }
    }

    if watch {
        watch_orders(workflow, config.poll_interval_seconds()).await;
    }

    Ok(())
}

/// Polls order status until every order is ready or the user interrupts.
/// The poller is stopped on every exit path.
async fn watch_orders<C, G, F>(workflow: CartWorkflow<C, G, F>, poll_interval_seconds: u64)
where
    C: MenuCatalog + 'static,
    G: OrderGateway + 'static,
    F: ReadyFeed + 'static,
{
    let workflow = Arc::new(Mutex::new(workflow));
    let poller = StatusPoller::spawn(
        workflow.clone(),
        Duration::from_secs(poll_interval_seconds),
    );

    println!("\n👀 Watching order status (Ctrl-C to stop)...");
    let mut announced: HashSet<String> = HashSet::new();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("\nStopped watching.");
                break;
            }
            _ = tokio::time::sleep(Duration::from_secs(1)) => {
                let workflow = workflow.lock().await;
                for order in workflow.history() {
                    if order.status.is_ready() && announced.insert(order.order_id.clone()) {
                        println!("🎉 Order {} is ready!", order.order_id);
                    }
                }
                let all_ready = !workflow.history().is_empty()
                    && workflow.history().iter().all(|order| order.status.is_ready());
                if all_ready {
                    println!("✅ All orders ready!");
                    break;
                }
            }
        }
    }

    poller.stop();
}
