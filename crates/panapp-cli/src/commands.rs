use anyhow::{bail, Context};
use colored::Colorize;

use panapp_auth::{NewUser, ProfilePatch};
use panapp_state::AppState;
use panapp_store::{FileKvStore, StoreAdapter};
use panapp_types::{
    ClientPatch, NewClient, NewOrder, NewProduct, OrderStatus, ProductPatch, RecordId,
};

use crate::cli::*;

/// Form-level policy; the core accepts anything non-empty.
const MIN_USERNAME: usize = 3;
const MIN_PASSWORD: usize = 6;
const MIN_NAME: usize = 2;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let backend = FileKvStore::open(&cli.data_dir)
        .with_context(|| format!("cannot open data dir {}", cli.data_dir.display()))?;
    let mut app = AppState::new(StoreAdapter::new(backend));
    app.init();

    match cli.command {
        Command::Register(args) => cmd_register(&mut app, args),
        Command::Login(args) => cmd_login(&mut app, args),
        Command::Logout => cmd_logout(&mut app),
        Command::Whoami => cmd_whoami(&app),
        Command::Profile(args) => cmd_profile(&mut app, args),
        Command::Passwd(args) => cmd_passwd(&mut app, args),
        Command::Client(args) => cmd_client(&mut app, args.command),
        Command::Product(args) => cmd_product(&mut app, args.command),
        Command::Order(args) => cmd_order(&mut app, args.command),
    }
}

// ---- Auth ----

fn cmd_register(app: &mut AppState, args: RegisterArgs) -> anyhow::Result<()> {
    if args.username.trim().len() < MIN_USERNAME {
        bail!("username must be at least {MIN_USERNAME} characters");
    }
    if args.password.len() < MIN_PASSWORD {
        bail!("password must be at least {MIN_PASSWORD} characters");
    }
    if args.name.trim().len() < MIN_NAME {
        bail!("name must be at least {MIN_NAME} characters");
    }

    let user = app.auth.register(NewUser {
        username: args.username,
        password: args.password,
        name: args.name,
        email: args.email,
    })?;
    println!(
        "{} Registered and logged in as {}",
        "✓".green().bold(),
        user.username.yellow()
    );
    Ok(())
}

fn cmd_login(app: &mut AppState, args: LoginArgs) -> anyhow::Result<()> {
    match app.auth.login(&args.username, &args.password) {
        Some(user) => {
            println!("{} Logged in as {}", "✓".green().bold(), user.username.yellow());
            Ok(())
        }
        None => bail!("invalid username or password"),
    }
}

fn cmd_logout(app: &mut AppState) -> anyhow::Result<()> {
    app.logout();
    println!("{} Logged out", "✓".green());
    Ok(())
}

fn cmd_whoami(app: &AppState) -> anyhow::Result<()> {
    match app.auth.user() {
        Some(user) => {
            println!("{} ({})", user.name.bold(), user.username.yellow());
            if let Some(email) = &user.email {
                println!("  {email}");
            }
            println!("  since {}", user.created_at.format("%Y-%m-%d"));
            Ok(())
        }
        None => bail!("not logged in"),
    }
}

fn cmd_profile(app: &mut AppState, args: ProfileArgs) -> anyhow::Result<()> {
    require_login(app)?;
    app.auth.update_profile(ProfilePatch {
        name: args.name,
        email: args.email,
        avatar: args.avatar,
    });
    println!("{} Profile updated", "✓".green());
    Ok(())
}

fn cmd_passwd(app: &mut AppState, args: PasswdArgs) -> anyhow::Result<()> {
    require_login(app)?;
    if args.new.len() < MIN_PASSWORD {
        bail!("password must be at least {MIN_PASSWORD} characters");
    }
    app.auth.change_password(&args.current, &args.new)?;
    println!("{} Password changed", "✓".green());
    Ok(())
}

// ---- Clients ----

fn cmd_client(app: &mut AppState, command: ClientCommand) -> anyhow::Result<()> {
    require_login(app)?;
    match command {
        ClientCommand::Add { name, phone, address } => {
            let client = app.clients.add(NewClient { name, phone, address });
            println!(
                "{} Added client {} ({})",
                "✓".green().bold(),
                client.name.bold(),
                client.id.short_id().dimmed()
            );
        }
        ClientCommand::List => {
            if app.clients.entities().is_empty() {
                println!("No clients yet.");
            }
            for client in app.clients.entities() {
                println!(
                    "{}  {}  {}  {}",
                    client.id.short_id().dimmed(),
                    client.name.bold(),
                    client.phone,
                    client.address
                );
            }
        }
        ClientCommand::Edit { id, name, phone, address } => {
            let id = resolve_id(app.clients.entities(), |c| c.id, &id)?;
            app.clients.edit(id, ClientPatch { name, phone, address });
            println!("{} Client updated", "✓".green());
        }
        ClientCommand::Rm { id } => {
            let id = resolve_id(app.clients.entities(), |c| c.id, &id)?;
            app.clients.remove(id);
            println!("{} Client removed", "✓".green());
        }
    }
    Ok(())
}

// ---- Products ----

fn cmd_product(app: &mut AppState, command: ProductCommand) -> anyhow::Result<()> {
    require_login(app)?;
    match command {
        ProductCommand::Add { name, price, image } => {
            let product = app.products.add(NewProduct {
                name,
                price_cop: price,
                image,
            });
            println!(
                "{} Added product {} at {} COP ({})",
                "✓".green().bold(),
                product.name.bold(),
                product.price_cop,
                product.id.short_id().dimmed()
            );
        }
        ProductCommand::List => {
            if app.products.entities().is_empty() {
                println!("No products yet.");
            }
            for product in app.products.entities() {
                println!(
                    "{}  {}  {} COP",
                    product.id.short_id().dimmed(),
                    product.name.bold(),
                    product.price_cop
                );
            }
        }
        ProductCommand::Edit { id, name, price, image } => {
            let id = resolve_id(app.products.entities(), |p| p.id, &id)?;
            app.products.edit(
                id,
                ProductPatch {
                    name,
                    price_cop: price,
                    image: image.map(Some),
                },
            );
            println!("{} Product updated", "✓".green());
        }
        ProductCommand::Rm { id } => {
            let id = resolve_id(app.products.entities(), |p| p.id, &id)?;
            app.products.remove(id);
            println!("{} Product removed", "✓".green());
        }
    }
    Ok(())
}

// ---- Orders ----

fn cmd_order(app: &mut AppState, command: OrderCommand) -> anyhow::Result<()> {
    require_login(app)?;
    match command {
        OrderCommand::Add { customer, details, quantity, date, time } => {
            if quantity == 0 {
                bail!("quantity must be positive");
            }
            let delivery_date = date
                .parse()
                .with_context(|| format!("invalid delivery date {date:?}, expected YYYY-MM-DD"))?;
            let order = app.orders.add(NewOrder {
                customer_name: customer,
                details,
                quantity,
                delivery_date,
                delivery_time: time,
                status: OrderStatus::Pending,
            });
            println!(
                "{} Added order for {} ({})",
                "✓".green().bold(),
                order.customer_name.bold(),
                order.id.short_id().dimmed()
            );
        }
        OrderCommand::List { status } => {
            let status = status.map(|s| s.parse::<OrderStatus>()).transpose()?;
            let orders = app.orders.filtered(status);
            if orders.is_empty() {
                println!("No orders.");
            }
            for order in orders {
                println!(
                    "{}  {}  {} x {}  {} {}  [{}]",
                    order.id.short_id().dimmed(),
                    order.customer_name.bold(),
                    order.quantity,
                    order.details,
                    order.delivery_date,
                    order.delivery_time,
                    paint_status(order.status)
                );
            }
        }
        OrderCommand::Advance { id } => {
            let id = resolve_id(app.orders.entities(), |o| o.id, &id)?;
            let current = match app.orders.find_by_id(id) {
                Some(order) => order.status,
                None => bail!("no record matches that id"),
            };
            // Only the single legal forward transition is offered here;
            // completed orders have nowhere to go.
            match current.next() {
                Some(next) => {
                    app.orders.set_status(id, next);
                    println!(
                        "{} {} -> {}",
                        "✓".green().bold(),
                        paint_status(current),
                        paint_status(next)
                    );
                }
                None => bail!("order is already {current}"),
            }
        }
        OrderCommand::Rm { id } => {
            let id = resolve_id(app.orders.entities(), |o| o.id, &id)?;
            app.orders.remove(id);
            println!("{} Order removed", "✓".green());
        }
        OrderCommand::Stats => {
            let stats = app.orders.stats();
            println!("{}      {}", "pending".yellow(), stats.pending);
            println!("{}  {}", "in-progress".blue(), stats.in_progress);
            println!("{}    {}", "completed".green(), stats.completed);
            println!("{}        {}", "total".bold(), stats.total);
        }
    }
    Ok(())
}

// ---- Helpers ----

fn require_login(app: &AppState) -> anyhow::Result<()> {
    if app.auth.is_authenticated() {
        Ok(())
    } else {
        bail!("not logged in; run `panapp login` first")
    }
}

fn paint_status(status: OrderStatus) -> colored::ColoredString {
    match status {
        OrderStatus::Pending => status.as_str().yellow(),
        OrderStatus::InProgress => status.as_str().blue(),
        OrderStatus::Completed => status.as_str().green(),
    }
}

/// Accept a full record id or a unique prefix of its hex form.
fn resolve_id<T>(
    items: &[T],
    id_of: impl Fn(&T) -> RecordId,
    input: &str,
) -> anyhow::Result<RecordId> {
    if let Ok(id) = input.parse::<RecordId>() {
        return Ok(id);
    }
    let needle = input.replace('-', "").to_ascii_lowercase();
    if needle.is_empty() {
        bail!("empty id");
    }
    let matches: Vec<RecordId> = items
        .iter()
        .map(|item| id_of(item))
        .filter(|id| id.as_uuid().simple().to_string().starts_with(&needle))
        .collect();
    match matches.as_slice() {
        [id] => Ok(*id),
        [] => bail!("no record matches id {input:?}"),
        _ => bail!("id prefix {input:?} is ambiguous"),
    }
}
