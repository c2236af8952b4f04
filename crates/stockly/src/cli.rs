//! Clap derive structures for the `stockly` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// stockly -- inventory management from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "stockly",
    version,
    about = "Manage products, warehouses and stock from the command line",
    long_about = "A CLI for the stockly inventory API.\n\n\
        Lists products, categories, warehouses, stock levels, movements,\n\
        adjustments and serial/batch tracking, and manages the product catalog.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "STOCKLY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API root URL (overrides profile)
    #[arg(long, short = 'u', env = "STOCKLY_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "STOCKLY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, env = "STOCKLY_COLOR", default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', env = "STOCKLY_QUIET", global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', env = "STOCKLY_YES", global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "STOCKLY_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "STOCKLY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one identifier per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage the product catalog
    #[command(alias = "prod", alias = "p")]
    Products(ProductsArgs),

    /// Manage product categories
    #[command(alias = "cat")]
    Categories(CategoriesArgs),

    /// View warehouses and their capacity
    #[command(alias = "wh")]
    Warehouses(ListOnlyArgs),

    /// View stock levels per product and warehouse
    Stock(StockArgs),

    /// View the stock movement ledger
    #[command(alias = "mv")]
    Movements(ListOnlyArgs),

    /// Review stock adjustments
    #[command(alias = "adj")]
    Adjustments(AdjustmentsArgs),

    /// View tracked serial numbers
    Serials(ListOnlyArgs),

    /// View tracked batches and their expiry
    Batches(ListOnlyArgs),

    /// Show inventory KPIs and stock alerts
    #[command(alias = "dash")]
    Dashboard,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListOnlyArgs {
    #[command(subcommand)]
    pub command: ListOnlyCommand,
}

#[derive(Debug, Subcommand)]
pub enum ListOnlyCommand {
    /// List all records
    #[command(alias = "ls")]
    List,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PRODUCTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// List products
    #[command(alias = "ls")]
    List(ProductListArgs),

    /// Show one product
    Get {
        /// Product ID
        id: String,
    },

    /// Create a product
    Create {
        #[command(flatten)]
        fields: ProductFields,

        /// Read the product from a JSON file instead of flags
        #[arg(long, short = 'F', conflicts_with_all = ["name", "sku"])]
        from_file: Option<PathBuf>,
    },

    /// Update fields of a product
    Update {
        /// Product ID
        id: String,

        #[command(flatten)]
        fields: ProductFields,

        /// Read the changes from a JSON file instead of flags
        #[arg(long, short = 'F')]
        from_file: Option<PathBuf>,
    },

    /// Delete a product
    #[command(alias = "rm")]
    Delete {
        /// Product ID
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct ProductListArgs {
    /// Page number (1-based)
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Rows per page (defaults to the profile's page size)
    #[arg(long, short = 'l')]
    pub limit: Option<u32>,

    /// Search by name or SKU
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Filter by category
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Filter by status: active, inactive or discontinued
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Debug, Default, Args)]
pub struct ProductFields {
    /// Product name
    #[arg(long)]
    pub name: Option<String>,

    /// Stock keeping unit
    #[arg(long)]
    pub sku: Option<String>,

    /// Category value (electronics, clothing, books, home, ...)
    #[arg(long)]
    pub category: Option<String>,

    /// Free-form description
    #[arg(long)]
    pub description: Option<String>,

    /// Selling price
    #[arg(long)]
    pub price: Option<f64>,

    /// Unit cost
    #[arg(long)]
    pub cost: Option<f64>,

    /// Quantity on hand
    #[arg(long = "stock", allow_negative_numbers = true)]
    pub stock_quantity: Option<i64>,

    /// Low-stock threshold
    #[arg(long = "min-stock", allow_negative_numbers = true)]
    pub min_stock_level: Option<i64>,

    /// active or inactive
    #[arg(long)]
    pub status: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CATEGORIES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    pub command: CategoriesCommand,
}

#[derive(Debug, Subcommand)]
pub enum CategoriesCommand {
    /// List categories
    #[command(alias = "ls")]
    List,

    /// Create a category
    Create {
        /// Category name
        name: String,

        /// Description
        #[arg(long)]
        description: Option<String>,

        /// Parent category name
        #[arg(long)]
        parent: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  STOCK
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct StockArgs {
    #[command(subcommand)]
    pub command: StockCommand,
}

#[derive(Debug, Subcommand)]
pub enum StockCommand {
    /// List stock levels
    #[command(alias = "ls")]
    List {
        /// Filter by warehouse
        #[arg(long, short = 'w')]
        warehouse: Option<String>,

        /// Filter by status: ok, low, critical or overstock
        #[arg(long)]
        status: Option<String>,

        /// Filter by product ID
        #[arg(long)]
        product: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ADJUSTMENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AdjustmentsArgs {
    #[command(subcommand)]
    pub command: AdjustmentsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AdjustmentsCommand {
    /// List stock adjustments
    #[command(alias = "ls")]
    List,

    /// Approve a pending adjustment
    Approve {
        /// Adjustment ID
        id: String,
    },

    /// Reject a pending adjustment
    Reject {
        /// Adjustment ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or extend the config file with a profile
    Init {
        /// Profile name (prompted when omitted)
        #[arg(long)]
        name: Option<String>,

        /// API root for the profile (prompted when omitted)
        #[arg(long = "url")]
        url: Option<String>,
    },

    /// Display current resolved configuration
    Show,

    /// Print the config file location
    Path,

    /// Set the default profile
    SetDefault {
        /// Profile name to set as default
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
