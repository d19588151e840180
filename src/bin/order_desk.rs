use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    str::FromStr,
    sync::Arc,
};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use order_desk::{
    api::{ApiClient, OrderDeskApi, SessionStore, StoredSession},
    auth::{format_countdown, LoginGate},
    config::{self, AppConfig},
    errors::ServiceError,
    labels::LabelFile,
    models::{
        AddressInput, InventoryItem, LoginOutcome, OrderRecord, OrderStatus, Product,
        ProductDetails, ProductInput, ShippingAddress, ShippingMethod,
    },
    services::{AddressBook, DatabaseService, InventoryService, OrderAdmin, ProductCatalog},
    workflow::{Checkout, ReviewState},
};
use serde::Serialize;
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let context = CliContext::initialize()?;

    let result = match cli.command {
        Commands::Auth(command) => handle_auth_command(&context, command, cli.json).await,
        Commands::Inventory(command) => handle_inventory_command(&context, command, cli.json).await,
        Commands::Addresses(command) => handle_addresses_command(&context, command, cli.json).await,
        Commands::Products(command) => handle_products_command(&context, command, cli.json).await,
        Commands::Orders(command) => handle_orders_command(&context, command, cli.json).await,
        Commands::Checkout(command) => handle_checkout_command(&context, command, cli.json).await,
        Commands::Db(command) => handle_db_command(&context, command, cli.json).await,
    };

    if let Err(err) = &result {
        let unauthorized = err
            .chain()
            .filter_map(|cause| cause.downcast_ref::<ServiceError>())
            .any(ServiceError::is_unauthorized);
        if unauthorized {
            eprintln!("Session expired or missing; run `order-desk auth login` first.");
        }
    }
    result
}

#[derive(Parser)]
#[command(name = "order-desk", about = "Order desk CLI for checkout and back-office administration", version)]
struct Cli {
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON when available"
    )]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(subcommand)]
    Auth(AuthCommands),
    #[command(subcommand)]
    Inventory(InventoryCommands),
    #[command(subcommand)]
    Addresses(AddressesCommands),
    #[command(subcommand)]
    Products(ProductsCommands),
    #[command(subcommand)]
    Orders(OrdersCommands),
    #[command(subcommand)]
    Checkout(CheckoutCommands),
    #[command(subcommand)]
    Db(DbCommands),
}

#[derive(Subcommand)]
enum AuthCommands {
    Login(AuthLoginArgs),
    Logout,
    Status,
}

#[derive(Args)]
struct AuthLoginArgs {
    #[arg(long, help = "Shared application password")]
    password: String,
}

#[derive(Subcommand)]
enum InventoryCommands {
    List,
    Set(SetInventoryArgs),
    Apply(ApplyInventoryArgs),
}

#[derive(Args)]
struct SetInventoryArgs {
    #[arg(long, help = "SKU to adjust")]
    sku: String,
    #[arg(long, help = "New case count on hand")]
    quantity: u32,
}

#[derive(Args)]
struct ApplyInventoryArgs {
    #[arg(
        long = "change",
        value_parser = parse_inventory_change,
        action = ArgAction::Append,
        help = "Pending change as SKU=CASES; repeat for each SKU"
    )]
    changes: Vec<(String, u32)>,
}

#[derive(Subcommand)]
enum AddressesCommands {
    List,
    Get(AddressIdArgs),
    Add(AddAddressArgs),
    Update(UpdateAddressArgs),
    Delete(AddressIdArgs),
}

#[derive(Args)]
struct AddressIdArgs {
    #[arg(long, help = "Address identifier")]
    id: i64,
}

#[derive(Args)]
struct AddAddressArgs {
    #[arg(long, help = "Short name shown in pick lists")]
    nickname: String,
    #[arg(long, help = "Company or recipient name")]
    company: String,
    #[arg(long, help = "Street address")]
    line1: String,
    #[arg(long, help = "Suite, unit or floor")]
    line2: Option<String>,
    #[arg(long)]
    city: String,
    #[arg(long, help = "Two-letter state code")]
    state: String,
    #[arg(long)]
    zip: String,
    #[arg(long, help = "Contact phone number")]
    phone: String,
    #[arg(long, help = "Contact email")]
    email: String,
}

#[derive(Args)]
struct UpdateAddressArgs {
    #[arg(long, help = "Address identifier")]
    id: i64,
    #[arg(long)]
    nickname: Option<String>,
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    line1: Option<String>,
    #[arg(long)]
    line2: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    state: Option<String>,
    #[arg(long)]
    zip: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    email: Option<String>,
}

#[derive(Subcommand)]
enum ProductsCommands {
    List,
    Details,
    Add(AddProductArgs),
    Remove(RemoveProductArgs),
    BulkUpdate(BulkUpdateArgs),
}

#[derive(Args)]
struct AddProductArgs {
    #[arg(long)]
    sku: String,
    #[arg(long, help = "Product name")]
    product: String,
    #[arg(long)]
    size: String,
    #[arg(long)]
    flavor: String,
    #[arg(long, help = "Units per case, e.g. 6/cs")]
    units_cs: String,
    #[arg(long, default_value_t = 0, help = "Initial case count")]
    quantity: u32,
    #[arg(long, help = "Case length in inches")]
    length: Option<f64>,
    #[arg(long, help = "Case width in inches")]
    width: Option<f64>,
    #[arg(long, help = "Case height in inches")]
    height: Option<f64>,
    #[arg(long, help = "Case weight in pounds")]
    weight: Option<f64>,
}

#[derive(Args)]
struct RemoveProductArgs {
    #[arg(long)]
    sku: String,
}

#[derive(Args)]
struct BulkUpdateArgs {
    #[arg(long, help = "JSON file holding the full product detail list")]
    file: PathBuf,
    #[arg(long, help = "Admin password confirming the change")]
    password: String,
}

#[derive(Subcommand)]
enum OrdersCommands {
    List,
    Attachment(AttachmentArgs),
    Void(OrderIdArgs),
    Delete(OrderIdArgs),
    Status(UpdateStatusArgs),
}

#[derive(Args)]
struct OrderIdArgs {
    #[arg(long, help = "Order identifier")]
    id: i64,
}

#[derive(Args)]
struct AttachmentArgs {
    #[arg(long, help = "Order identifier")]
    id: i64,
    #[arg(long, default_value = ".", help = "Directory to save the label PDF into")]
    dir: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderStatusArg {
    Shipped,
    Cancelled,
}

impl From<OrderStatusArg> for OrderStatus {
    fn from(value: OrderStatusArg) -> Self {
        match value {
            OrderStatusArg::Shipped => OrderStatus::Shipped,
            OrderStatusArg::Cancelled => OrderStatus::Cancelled,
        }
    }
}

#[derive(Args)]
struct UpdateStatusArgs {
    #[arg(long, help = "Order identifier")]
    id: i64,
    #[arg(long, value_enum)]
    status: OrderStatusArg,
    #[arg(long, help = "Admin password confirming the change")]
    password: String,
}

#[derive(Subcommand)]
enum CheckoutCommands {
    Form,
    Submit(SubmitArgs),
}

#[derive(Args)]
struct SubmitArgs {
    #[arg(long, help = "Purchase order number; must not match an existing order")]
    po: String,
    #[arg(long, help = "Shipping address identifier")]
    address: i64,
    #[arg(
        long = "case",
        value_parser = parse_case,
        action = ArgAction::Append,
        help = "Cases to order as SKU=N; repeat for each product"
    )]
    cases: Vec<(String, String)>,
    #[arg(
        long = "label",
        action = ArgAction::Append,
        help = "Shipping label file (PDF or PNG/JPG); one per case"
    )]
    labels: Vec<PathBuf>,
    #[arg(
        long,
        value_parser = parse_shipping_method,
        help = "Carrier service, e.g. fedex-ground or \"FedEx 2Day\""
    )]
    shipping_method: Option<ShippingMethod>,
    #[arg(
        long,
        action = ArgAction::SetTrue,
        help = "Validate and print the summary without creating the order"
    )]
    dry_run: bool,
}

#[derive(Subcommand)]
enum DbCommands {
    Info,
    Backup,
}

struct CliContext {
    config: AppConfig,
    client: ApiClient,
    api: Arc<dyn OrderDeskApi>,
    store: Option<SessionStore>,
    session: Option<StoredSession>,
}

impl CliContext {
    fn initialize() -> Result<Self> {
        let config = config::load_config().context("failed to load application config")?;
        config::init_tracing(config.log_level(), config.log_json);

        let store = config.session_path().map(SessionStore::new);
        let session = match &store {
            Some(store) => store
                .load()
                .with_context(|| format!("failed to read session file {}", store.path().display()))?,
            None => None,
        };

        let client = ApiClient::with_session(&config, session.as_ref())
            .context("failed to build API client")?;
        debug!(target: "order_desk_cli", base = %client.base_url(), "client ready");
        let api: Arc<dyn OrderDeskApi> = Arc::new(client.clone());

        Ok(Self {
            config,
            client,
            api,
            store,
            session,
        })
    }

    fn locked_until(&self) -> Option<chrono::DateTime<Utc>> {
        self.session.as_ref().and_then(|session| session.locked_until)
    }

    fn save_session(&self, locked_until: Option<chrono::DateTime<Utc>>) -> Result<Option<PathBuf>> {
        let Some(store) = &self.store else {
            return Ok(None);
        };
        let mut session = StoredSession::new(self.client.session_cookies());
        session.locked_until = locked_until;
        store
            .save(&session)
            .with_context(|| format!("failed to write session file {}", store.path().display()))?;
        Ok(Some(store.path().to_path_buf()))
    }

    fn clear_session(&self) -> Result<()> {
        if let Some(store) = &self.store {
            store.clear().context("failed to remove session file")?;
        }
        Ok(())
    }
}

async fn handle_auth_command(context: &CliContext, command: AuthCommands, json: bool) -> Result<()> {
    match command {
        AuthCommands::Login(args) => handle_auth_login(context, args, json).await,
        AuthCommands::Logout => {
            context.api.logout().await.context("logout failed")?;
            context.clear_session()?;
            if !json {
                println!("Logged out");
            }
            Ok(())
        }
        AuthCommands::Status => {
            let authenticated = context
                .api
                .check_auth()
                .await
                .context("failed to check session")?;
            if json {
                print_json(&serde_json::json!({ "authenticated": authenticated }))?;
            } else if authenticated {
                println!("Authenticated against {}", context.config.api_base_url);
            } else {
                println!("Not logged in");
            }
            Ok(())
        }
    }
}

async fn handle_auth_login(context: &CliContext, args: AuthLoginArgs, json: bool) -> Result<()> {
    let mut gate = LoginGate::with_lockout(context.api.clone(), context.locked_until());

    let outcome = match gate.attempt(&args.password).await {
        Ok(outcome) => outcome,
        Err(ServiceError::LockedOut { message, .. }) => bail!(message),
        Err(err) => return Err(err).context("login failed"),
    };

    match &outcome {
        LoginOutcome::Authenticated => {
            let saved_path = context.save_session(None)?;
            if json {
                print_json(&outcome)?;
            } else {
                println!("Logged in to {}", context.config.api_base_url);
                if let Some(path) = saved_path {
                    println!("Session saved to: {}", path.display());
                }
            }
            Ok(())
        }
        LoginOutcome::LockedOut {
            message,
            remaining_seconds,
        } => {
            context.save_session(gate.lockout().map(|lockout| lockout.ends_at()))?;
            if json {
                print_json(&outcome)?;
            }
            bail!("{} Time remaining: {}", message, format_countdown(*remaining_seconds))
        }
        LoginOutcome::Rejected { message } => {
            if json {
                print_json(&outcome)?;
            }
            bail!(message.clone())
        }
    }
}

async fn handle_inventory_command(
    context: &CliContext,
    command: InventoryCommands,
    json: bool,
) -> Result<()> {
    let service = InventoryService::new(context.api.clone());
    match command {
        InventoryCommands::List => {
            let items = service.list().await.context("failed to fetch inventory")?;
            if json {
                print_json(&items)?;
            } else {
                for item in &items {
                    render_inventory_item(item);
                }
            }
            Ok(())
        }
        InventoryCommands::Set(args) => {
            let level = service
                .set_quantity(&args.sku, args.quantity)
                .await
                .with_context(|| format!("failed to update inventory for {}", args.sku))?;
            if json {
                print_json(&level)?;
            } else {
                println!("{} now has {} cases", level.sku, level.quantity);
            }
            Ok(())
        }
        InventoryCommands::Apply(args) => {
            if args.changes.is_empty() {
                bail!("no changes given; pass --change SKU=CASES");
            }
            let changes: BTreeMap<String, u32> = args.changes.into_iter().collect();
            let levels = service
                .apply_changes(&changes)
                .await
                .context("failed to apply inventory changes")?;
            if json {
                print_json(&levels)?;
            } else {
                println!("Updated {} SKUs", levels.len());
            }
            Ok(())
        }
    }
}

async fn handle_addresses_command(
    context: &CliContext,
    command: AddressesCommands,
    json: bool,
) -> Result<()> {
    let book = AddressBook::new(context.api.clone());
    match command {
        AddressesCommands::List => {
            let addresses = book.list().await.context("failed to fetch addresses")?;
            if json {
                print_json(&addresses)?;
            } else {
                for address in &addresses {
                    render_address(address);
                }
            }
            Ok(())
        }
        AddressesCommands::Get(args) => {
            let address = book
                .get(args.id)
                .await
                .with_context(|| format!("failed to fetch address {}", args.id))?;
            output_address(&address, json)
        }
        AddressesCommands::Add(args) => {
            let input = AddressInput {
                nickname: normalize_string(args.nickname),
                company_name: normalize_string(args.company),
                address_line1: normalize_string(args.line1),
                address_line2: normalize_optional_string(args.line2),
                city: normalize_string(args.city),
                state: args.state,
                zip_code: normalize_string(args.zip),
                phone: normalize_string(args.phone),
                email: normalize_string(args.email),
            };
            let address = book.create(&input).await.context("failed to create address")?;
            output_address(&address, json)
        }
        AddressesCommands::Update(args) => {
            let existing = book
                .get(args.id)
                .await
                .with_context(|| format!("failed to fetch address {}", args.id))?;
            let mut input = AddressInput::from(&existing);
            if let Some(value) = args.nickname {
                input.nickname = normalize_string(value);
            }
            if let Some(value) = args.company {
                input.company_name = normalize_string(value);
            }
            if let Some(value) = args.line1 {
                input.address_line1 = normalize_string(value);
            }
            if args.line2.is_some() {
                input.address_line2 = normalize_optional_string(args.line2);
            }
            if let Some(value) = args.city {
                input.city = normalize_string(value);
            }
            if let Some(value) = args.state {
                input.state = value;
            }
            if let Some(value) = args.zip {
                input.zip_code = normalize_string(value);
            }
            if let Some(value) = args.phone {
                input.phone = normalize_string(value);
            }
            if let Some(value) = args.email {
                input.email = normalize_string(value);
            }
            let address = book
                .update(args.id, &input)
                .await
                .with_context(|| format!("failed to update address {}", args.id))?;
            output_address(&address, json)
        }
        AddressesCommands::Delete(args) => {
            book.delete(args.id)
                .await
                .with_context(|| format!("failed to delete address {}", args.id))?;
            if !json {
                println!("Deleted address {}", args.id);
            }
            Ok(())
        }
    }
}

async fn handle_products_command(
    context: &CliContext,
    command: ProductsCommands,
    json: bool,
) -> Result<()> {
    let catalog = ProductCatalog::new(context.api.clone());
    match command {
        ProductsCommands::List => {
            let products = catalog.list().await.context("failed to fetch products")?;
            if json {
                print_json(&products)?;
            } else {
                for product in &products {
                    render_product(product);
                }
            }
            Ok(())
        }
        ProductsCommands::Details => {
            let details = catalog
                .details()
                .await
                .context("failed to fetch product details")?;
            if json {
                print_json(&details)?;
            } else {
                for detail in &details {
                    println!(
                        "- {} • {} {} {} • {}x{}x{} in • {} lb",
                        detail.sku,
                        detail.product,
                        detail.flavor,
                        detail.size,
                        detail.length,
                        detail.width,
                        detail.height,
                        detail.weight
                    );
                }
            }
            Ok(())
        }
        ProductsCommands::Add(args) => {
            let input = ProductInput {
                sku: normalize_string(args.sku),
                product: normalize_string(args.product),
                size: normalize_string(args.size),
                flavor: normalize_string(args.flavor),
                units_per_case: normalize_string(args.units_cs),
                quantity: args.quantity,
                length: args.length,
                width: args.width,
                height: args.height,
                weight: args.weight,
            };
            let message = catalog.create(&input).await.context("failed to create product")?;
            output_message(&message, json)
        }
        ProductsCommands::Remove(args) => {
            let message = catalog
                .remove(&args.sku)
                .await
                .with_context(|| format!("failed to delete product {}", args.sku))?;
            output_message(&message, json)
        }
        ProductsCommands::BulkUpdate(args) => {
            let products = read_product_details(&args.file).await?;
            let message = catalog
                .bulk_update(&args.password, products)
                .await
                .context("bulk product update failed")?;
            output_message(&message, json)
        }
    }
}

async fn handle_orders_command(
    context: &CliContext,
    command: OrdersCommands,
    json: bool,
) -> Result<()> {
    let admin = OrderAdmin::new(context.api.clone());
    match command {
        OrdersCommands::List => {
            let orders = admin.list().await.context("failed to fetch orders")?;
            if json {
                print_json(&orders)?;
            } else {
                for order in &orders {
                    render_order(order);
                }
            }
            Ok(())
        }
        OrdersCommands::Attachment(args) => {
            let path = admin
                .download_attachment(args.id, &args.dir)
                .await
                .with_context(|| format!("failed to download labels for order {}", args.id))?;
            if json {
                print_json(&serde_json::json!({ "path": path }))?;
            } else {
                println!("Saved {}", path.display());
            }
            Ok(())
        }
        OrdersCommands::Void(args) => {
            let message = admin
                .void(args.id)
                .await
                .with_context(|| format!("failed to void order {}", args.id))?;
            output_message(&message, json)
        }
        OrdersCommands::Delete(args) => {
            let message = admin
                .delete(args.id)
                .await
                .with_context(|| format!("failed to delete order {}", args.id))?;
            output_message(&message, json)
        }
        OrdersCommands::Status(args) => {
            let message = admin
                .update_status(args.id, args.status.into(), &args.password)
                .await
                .with_context(|| format!("failed to update status of order {}", args.id))?;
            output_message(&message, json)
        }
    }
}

async fn handle_checkout_command(
    context: &CliContext,
    command: CheckoutCommands,
    json: bool,
) -> Result<()> {
    let mut checkout = Checkout::load(context.api.clone())
        .await
        .context("failed to load inventory and addresses")?;

    match command {
        CheckoutCommands::Form => {
            if json {
                print_json(&serde_json::json!({
                    "lines": checkout.draft().lines(),
                    "addresses": checkout.addresses(),
                }))?;
            } else {
                println!("Products:");
                for line in checkout.draft().summary_lines() {
                    println!("  {}", line);
                }
                println!("Addresses:");
                for address in checkout.addresses() {
                    render_address(address);
                }
            }
            Ok(())
        }
        CheckoutCommands::Submit(args) => handle_checkout_submit(&mut checkout, args, json).await,
    }
}

async fn handle_checkout_submit(checkout: &mut Checkout, args: SubmitArgs, json: bool) -> Result<()> {
    checkout.set_po(args.po)?;
    checkout.select_address(Some(args.address))?;
    for (sku, raw) in &args.cases {
        let stored = checkout
            .set_cases_input(sku, raw)
            .with_context(|| format!("cannot order {}", sku))?;
        if raw.trim() != stored.to_string() {
            eprintln!("{}: requested '{}', set to {} cases", sku, raw, stored);
        }
    }
    checkout.next()?;

    let mut labels = Vec::with_capacity(args.labels.len());
    for path in &args.labels {
        let label = LabelFile::from_path(path)
            .await
            .with_context(|| format!("cannot attach {}", path.display()))?;
        labels.push(label);
    }
    let status = checkout.attach(labels)?;
    if !json {
        println!("{}", status.status_line());
    }
    if let Some(method) = args.shipping_method {
        checkout.set_shipping_method(method)?;
    }

    let summary = checkout.review().await?;
    if let Some(ReviewState::Error(message)) = checkout.order_review().map(|review| review.state()) {
        bail!(message.clone());
    }
    if json && args.dry_run {
        print_json(&summary)?;
    } else if !json {
        println!("{}", summary);
    }
    if args.dry_run {
        return Ok(());
    }

    let receipt = checkout.confirm().await.context("order submission failed")?;
    if json {
        print_json(&receipt)?;
    } else {
        println!(
            "{} (PO {}, {} cases, {} labels)",
            receipt.message, receipt.purchase_order_number, receipt.total_cases, receipt.labels
        );
    }
    Ok(())
}

async fn handle_db_command(context: &CliContext, command: DbCommands, json: bool) -> Result<()> {
    let service = DatabaseService::new(context.api.clone());
    match command {
        DbCommands::Info => {
            let info = service
                .info()
                .await
                .context("failed to fetch database info")?;
            if json {
                print_json(&info)?;
            } else {
                println!(
                    "{} • {} • zipped ~{}",
                    info.filename.as_deref().unwrap_or("database"),
                    info.size_readable.as_deref().unwrap_or("unknown size"),
                    info.estimated_zip_readable.as_deref().unwrap_or("unknown")
                );
                if !info.can_email {
                    println!("Backup is too large to email");
                }
                if let Some(warning) = &info.warning {
                    println!("Warning: {}", warning);
                }
            }
            Ok(())
        }
        DbCommands::Backup => {
            let message = service.backup().await.context("database backup failed")?;
            output_message(&message, json)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn output_message(message: &str, json: bool) -> Result<()> {
    if json {
        print_json(&serde_json::json!({ "message": message }))
    } else {
        println!("{}", message);
        Ok(())
    }
}

fn output_address(address: &ShippingAddress, json: bool) -> Result<()> {
    if json {
        print_json(address)
    } else {
        render_address(address);
        Ok(())
    }
}

fn render_inventory_item(item: &InventoryItem) {
    println!(
        "- {} • {} • {} cases{}",
        item.sku,
        item.label(),
        item.quantity,
        if item.available_cases() == 0 { " (out of stock)" } else { "" }
    );
}

fn render_address(address: &ShippingAddress) {
    println!("- [{}] {} • {}", address.id, address.nickname, address.block().join(", "));
}

fn render_product(product: &Product) {
    println!(
        "- {} • {} {} {} • {}",
        product.sku, product.product, product.flavor, product.size, product.units_per_case
    );
}

fn render_order(order: &OrderRecord) {
    let created = order
        .created_at_utc()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "- Order {} • PO {} • {} • {} cases • {} • {}{}",
        order.order_id,
        order.purchase_order_number,
        created,
        order.total_cases(),
        order.status(),
        order.shipping_method.as_deref().unwrap_or("FedEx Ground"),
        if order.has_attachment { " • labels" } else { "" }
    );
}

async fn read_product_details(path: &Path) -> Result<Vec<ProductDetails>> {
    let data = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("{} is not a product detail list", path.display()))
}

fn normalize_string(value: String) -> String {
    value.trim().to_string()
}

fn normalize_optional_string(value: Option<String>) -> Option<String> {
    value.map(normalize_string).filter(|v| !v.is_empty())
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("invalid value '{raw}', expected SKU=N"))?;
    let key = key.trim().to_string();
    if key.is_empty() {
        return Err("SKU cannot be empty".to_string());
    }
    Ok((key, value.trim().to_string()))
}

fn parse_case(raw: &str) -> Result<(String, String), String> {
    parse_key_value(raw)
}

fn parse_inventory_change(raw: &str) -> Result<(String, u32), String> {
    let (sku, value) = parse_key_value(raw)?;
    let quantity = value
        .parse()
        .map_err(|_| format!("invalid case count '{value}' for {sku}"))?;
    Ok((sku, quantity))
}

fn parse_shipping_method(raw: &str) -> Result<ShippingMethod, String> {
    ShippingMethod::from_str(raw.trim()).map_err(|_| format!("unknown shipping method '{raw}'"))
}
