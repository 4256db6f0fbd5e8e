use anyhow::Context;
use colored::Colorize;
use pizza_catalog::Catalog;
use pizza_server::{PizzaServer, ServerConfig};
use pizza_store::JsonFileStore;
use pizza_types::{Pizza, PizzaId};

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli)?;
    match cli.command {
        Command::Serve(args) => cmd_serve(config, args).await,
        Command::Init => cmd_init(&config).await,
        Command::List(args) => cmd_list(&config, args, &cli.format).await,
        Command::Show(args) => cmd_show(&config, args, &cli.format).await,
        Command::Config => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}

/// Defaults, then the config file, then `PORT`, then `--data-file`.
fn resolve_config(cli: &Cli) -> anyhow::Result<ServerConfig> {
    let mut config = match &cli.config {
        Some(path) => ServerConfig::from_toml_file(path)?,
        None => ServerConfig::default(),
    };
    config.apply_env()?;
    if let Some(path) = &cli.data_file {
        config.data_file = path.clone();
    }
    Ok(config)
}

async fn cmd_serve(mut config: ServerConfig, args: ServeArgs) -> anyhow::Result<()> {
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    config.serialize_writes |= args.serialize_writes;
    config.enable_cors |= args.cors;

    println!(
        "{} Serving pizzas from {} on {}",
        "✓".green().bold(),
        config.data_file.display().to_string().bold(),
        config.bind_addr.to_string().cyan()
    );
    PizzaServer::new(config).serve().await?;
    Ok(())
}

async fn cmd_init(config: &ServerConfig) -> anyhow::Result<()> {
    let existed = config.data_file.exists();
    let store = JsonFileStore::open(&config.data_file)
        .await
        .with_context(|| format!("initializing {}", config.data_file.display()))?;
    if existed {
        println!("Collection already present at {}", store.path().display().to_string().bold());
    } else {
        println!(
            "{} Initialized empty pizza collection at {}",
            "✓".green().bold(),
            store.path().display().to_string().bold()
        );
    }
    Ok(())
}

async fn cmd_list(config: &ServerConfig, args: ListArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let catalog = Catalog::new(JsonFileStore::new(&config.data_file));
    let pizzas = catalog.list(args.name.as_deref()).await?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&pizzas)?),
        OutputFormat::Text => {
            if pizzas.is_empty() {
                println!("No pizzas.");
            }
            for pizza in &pizzas {
                print_pizza(pizza);
            }
        }
    }
    Ok(())
}

async fn cmd_show(config: &ServerConfig, args: ShowArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let id = PizzaId::parse(&args.id)
        .with_context(|| format!("not a pizza id: {}", args.id))?;
    let catalog = Catalog::new(JsonFileStore::new(&config.data_file));
    let pizza = catalog.get(id).await?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&pizza)?),
        OutputFormat::Text => print_pizza(&pizza),
    }
    Ok(())
}

fn print_pizza(pizza: &Pizza) {
    println!(
        "{}  {}  {}",
        format!("#{}", pizza.id).yellow(),
        pizza.name.bold(),
        display_value(&pizza.price).green()
    );
    if !pizza.toppings.is_empty() {
        let toppings: Vec<String> = pizza.toppings.iter().map(display_value).collect();
        println!("    {}", toppings.join(", ").dimmed());
    }
}

/// Strings print bare; everything else prints as JSON.
fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
