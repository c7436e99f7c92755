//! Tiny ERP CLI - manage clients, products, sales and users from the shell.
//!
//! # Usage
//!
//! ```bash
//! # Seed the sample clients into an empty data directory
//! erp seed
//!
//! # Register a product and sell three units
//! erp product add -n "Mouse" -p "50,00" -s 10
//! erp sale create --product <PRODUCT_ID> -q 3
//!
//! # Sales between two dates
//! erp report sales --from 2025-04-01 --to 2025-04-30
//!
//! # Current month at a glance
//! erp dashboard
//! ```
//!
//! # Commands
//!
//! - `client` - Add, list, update and delete clients; show segment counts
//! - `product` - Add, list, update and delete products
//! - `sale` - Create, list, update and delete sales (stock follows)
//! - `user` - Add, list, update and delete users
//! - `report` - Sales, stock, financial or clients report over a date range
//! - `dashboard` - Monthly sales, new clients and stock totals
//! - `seed` - Insert sample clients if there are none
//!
//! See `tiny_erp_store::config` for the environment variables.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tiny_erp_core::{ClientId, ClientSegment, ProductId, SellId, UserId, UserRole};
use tiny_erp_store::{Erp, ErpConfig, LogFormat, ReportKind};

mod commands;

#[derive(Parser)]
#[command(name = "erp")]
#[command(author, version, about = "Tiny ERP command-line tools")]
struct Cli {
    /// Data directory (overrides `ERP_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage clients
    Client {
        #[command(subcommand)]
        action: ClientAction,
    },
    /// Manage products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage sales
    Sale {
        #[command(subcommand)]
        action: SaleAction,
    },
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Generate a report
    Report {
        /// Report kind (`sales`, `stock`, `financial`, `clients`)
        kind: ReportKind,

        /// First day to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Show this month's dashboard metrics
    Dashboard,
    /// Insert the sample clients into an empty client list
    Seed,
}

#[derive(Subcommand)]
enum ClientAction {
    /// Add a new client
    Add {
        /// Person or company name
        #[arg(short, long)]
        name: String,

        /// Contact email
        #[arg(short, long, default_value = "")]
        email: String,

        /// Contact phone
        #[arg(short, long, default_value = "")]
        phone: String,

        /// Segment (`retail`, `wholesale`, `corporate`)
        #[arg(short, long, default_value = "retail")]
        segment: ClientSegment,

        /// Client value, e.g. `12500` or `R$ 12.500,00`
        #[arg(short, long, default_value = "0")]
        value: String,

        /// Last purchase label
        #[arg(long)]
        last_purchase: Option<String>,

        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        birth_date: Option<NaiveDate>,

        /// Postal address
        #[arg(long)]
        address: Option<String>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// List all clients
    List,
    /// Update some fields of a client
    Update {
        /// Client ID
        id: ClientId,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        phone: Option<String>,

        #[arg(short, long)]
        segment: Option<ClientSegment>,

        #[arg(short, long)]
        value: Option<String>,

        #[arg(long)]
        last_purchase: Option<String>,

        #[arg(long)]
        birth_date: Option<NaiveDate>,

        #[arg(long)]
        address: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a client
    Delete {
        /// Client ID
        id: ClientId,
    },
    /// Count clients per segment
    Segments,
}

#[derive(Subcommand)]
enum ProductAction {
    /// Add a new product
    Add {
        #[arg(short, long)]
        name: String,

        /// Unit price, e.g. `49.90` or `R$ 49,90`
        #[arg(short, long)]
        price: String,

        /// Units on hand
        #[arg(short, long, default_value_t = 0)]
        stock: i64,

        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// List all products
    List,
    /// Update a product (unspecified fields keep their value)
    Update {
        /// Product ID
        id: ProductId,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        price: Option<String>,

        #[arg(short, long)]
        stock: Option<i64>,

        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a product
    Delete {
        /// Product ID
        id: ProductId,
    },
}

#[derive(Subcommand)]
enum SaleAction {
    /// Record a sale and take the units out of stock
    Create {
        /// Product sold
        #[arg(long)]
        product: ProductId,

        /// Units sold
        #[arg(short, long)]
        quantity: i64,

        /// Buyer
        #[arg(short, long)]
        client: Option<ClientId>,

        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// List all sales
    List,
    /// Update a sale and adjust stock accordingly
    Update {
        /// Sale ID
        id: SellId,

        #[arg(long)]
        product: Option<ProductId>,

        #[arg(short, long)]
        quantity: Option<i64>,

        #[arg(short, long)]
        client: Option<ClientId>,

        /// Remove the buyer from the sale
        #[arg(long, conflicts_with = "client")]
        no_client: bool,

        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a sale and return its units to stock
    Delete {
        /// Sale ID
        id: SellId,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Add a new user
    Add {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        /// Role (`admin`, `manager`, `user`)
        #[arg(short, long, default_value = "user")]
        role: UserRole,
    },
    /// List all users
    List,
    /// Update a user (unspecified fields keep their value)
    Update {
        /// User ID
        id: UserId,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        role: Option<UserRole>,
    },
    /// Delete a user
    Delete {
        /// User ID
        id: UserId,
    },
}

fn init_tracing(format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tiny_erp_store=info,tiny_erp_cli=info".into());

    let is_json = format == LogFormat::Json;
    let json_layer = is_json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!is_json).then(|| tracing_subscriber::fmt::layer().with_target(false));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

fn main() {
    let cli = Cli::parse();
    // Also loads .env, so RUST_LOG from there reaches the filter below
    let config = ErpConfig::from_env();

    init_tracing(config.as_ref().map_or(LogFormat::Text, |c| c.log_format));

    let result: Result<(), Box<dyn std::error::Error>> = config
        .map_err(Into::into)
        .and_then(|config| run(cli, config));

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, mut config: ErpConfig) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    let mut erp = Erp::from_config(&config);

    match cli.command {
        Commands::Client { action } => match action {
            ClientAction::Add {
                name,
                email,
                phone,
                segment,
                value,
                last_purchase,
                birth_date,
                address,
                notes,
            } => commands::clients::add(
                &mut erp,
                commands::clients::ClientArgs {
                    name: Some(name),
                    email: Some(email),
                    phone: Some(phone),
                    segment: Some(segment),
                    value: Some(value),
                    last_purchase,
                    birth_date,
                    address,
                    notes,
                },
            )?,
            ClientAction::List => commands::clients::list(&erp),
            ClientAction::Update {
                id,
                name,
                email,
                phone,
                segment,
                value,
                last_purchase,
                birth_date,
                address,
                notes,
            } => commands::clients::update(
                &mut erp,
                id,
                commands::clients::ClientArgs {
                    name,
                    email,
                    phone,
                    segment,
                    value,
                    last_purchase,
                    birth_date,
                    address,
                    notes,
                },
            )?,
            ClientAction::Delete { id } => commands::clients::delete(&mut erp, id)?,
            ClientAction::Segments => commands::clients::segments(&erp),
        },
        Commands::Product { action } => match action {
            ProductAction::Add {
                name,
                price,
                stock,
                description,
            } => commands::products::add(&mut erp, name, &price, stock, description)?,
            ProductAction::List => commands::products::list(&erp),
            ProductAction::Update {
                id,
                name,
                price,
                stock,
                description,
            } => commands::products::update(
                &mut erp,
                id,
                name,
                price.as_deref(),
                stock,
                description,
            )?,
            ProductAction::Delete { id } => commands::products::delete(&mut erp, id)?,
        },
        Commands::Sale { action } => match action {
            SaleAction::Create {
                product,
                quantity,
                client,
                description,
            } => commands::sales::create(&mut erp, product, quantity, client, description)?,
            SaleAction::List => commands::sales::list(&erp),
            SaleAction::Update {
                id,
                product,
                quantity,
                client,
                no_client,
                description,
            } => {
                let changes = commands::sales::SaleChanges {
                    product_id: product,
                    quantity,
                    client: if no_client {
                        commands::sales::ClientChange::Clear
                    } else {
                        client.map_or(commands::sales::ClientChange::Keep, |id| {
                            commands::sales::ClientChange::Set(id)
                        })
                    },
                    description,
                };
                commands::sales::update(&mut erp, id, changes)?;
            }
            SaleAction::Delete { id } => commands::sales::delete(&mut erp, id)?,
        },
        Commands::User { action } => match action {
            UserAction::Add { name, email, role } => {
                commands::users::add(&mut erp, name, email, role)?;
            }
            UserAction::List => commands::users::list(&erp),
            UserAction::Update {
                id,
                name,
                email,
                role,
            } => commands::users::update(&mut erp, id, name, email, role)?,
            UserAction::Delete { id } => commands::users::delete(&mut erp, id)?,
        },
        Commands::Report { kind, from, to } => commands::reports::report(&erp, kind, from, to)?,
        Commands::Dashboard => commands::dashboard::show(&erp),
        Commands::Seed => commands::seed::clients(&mut erp)?,
    }
    Ok(())
}
