use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "panapp",
    about = "Panapp - bakery order tracking",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the durable store files.
    #[arg(long, global = true, default_value = ".panapp")]
    pub data_dir: PathBuf,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create an account and log in
    Register(RegisterArgs),
    /// Log in with an existing account
    Login(LoginArgs),
    /// Log out and clear the session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Update profile fields of the logged-in user
    Profile(ProfileArgs),
    /// Change the password of the logged-in user
    Passwd(PasswdArgs),
    /// Manage clients
    Client(ClientArgs),
    /// Manage catalog products
    Product(ProductArgs),
    /// Manage orders
    Order(OrderArgs),
}

#[derive(Args)]
pub struct RegisterArgs {
    pub username: String,
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: Option<String>,
}

#[derive(Args)]
pub struct LoginArgs {
    pub username: String,
    #[arg(long)]
    pub password: String,
}

#[derive(Args)]
pub struct ProfileArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub avatar: Option<String>,
}

#[derive(Args)]
pub struct PasswdArgs {
    #[arg(long)]
    pub current: String,
    #[arg(long)]
    pub new: String,
}

#[derive(Args)]
pub struct ClientArgs {
    #[command(subcommand)]
    pub command: ClientCommand,
}

#[derive(Subcommand)]
pub enum ClientCommand {
    /// Add a client
    Add {
        name: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        address: String,
    },
    /// List clients
    List,
    /// Edit a client (id may be a unique prefix)
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    /// Remove a client
    Rm { id: String },
}

#[derive(Args)]
pub struct ProductArgs {
    #[command(subcommand)]
    pub command: ProductCommand,
}

#[derive(Subcommand)]
pub enum ProductCommand {
    /// Add a product
    Add {
        name: String,
        /// Price in COP
        #[arg(long)]
        price: u64,
        #[arg(long)]
        image: Option<String>,
    },
    /// List products
    List,
    /// Edit a product (id may be a unique prefix)
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<u64>,
        #[arg(long)]
        image: Option<String>,
    },
    /// Remove a product
    Rm { id: String },
}

#[derive(Args)]
pub struct OrderArgs {
    #[command(subcommand)]
    pub command: OrderCommand,
}

#[derive(Subcommand)]
pub enum OrderCommand {
    /// Add an order
    Add {
        /// Customer name as it should appear on the order
        customer: String,
        #[arg(long, default_value = "")]
        details: String,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
        /// Delivery date, YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Delivery time, free-form (e.g. "14:30")
        #[arg(long, default_value = "")]
        time: String,
    },
    /// List orders, optionally by status
    List {
        /// pending, in-progress, or completed
        #[arg(long)]
        status: Option<String>,
    },
    /// Move an order to its next status
    Advance { id: String },
    /// Remove an order
    Rm { id: String },
    /// Show order counts per status
    Stats,
}
