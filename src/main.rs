// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use coin_catalog::{
    add_coin, count_coins, delete_coin, get_all_coins, get_coin, get_events_for_entity,
    import_csv, setup_database, validate_new_coin, Catalog, CoinImages, CoinRecord,
    CollectionCoin, CollectionError, Config, FilterCriteria, ImageSide, ImageStore, NewCoin,
    Selection, StatusFilter, ViewMode,
};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "coin-catalog", version, about = "Coin catalog explorer and collection manager")]
struct Cli {
    /// Catalog file (.json or .csv); defaults to the bundled sample
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive catalog explorer (default)
    Explore,

    /// Filter the catalog and print matching coins
    Search(SearchArgs),

    /// List distinct denominations and mint cities
    Facets,

    /// Show one catalog coin
    Show { id: String },

    /// Manage your own collection
    #[command(subcommand)]
    Collection(CollectionCommand),
}

#[derive(Args)]
struct SearchArgs {
    /// Text matched against name, denomination and commemorative note
    #[arg(short, long, default_value = "")]
    query: String,

    #[arg(long, default_value = "all")]
    denomination: String,

    #[arg(long, default_value = "all")]
    mint: String,

    /// active, discontinued or all
    #[arg(long, default_value = "all")]
    status: String,

    /// all, regular or commemorative
    #[arg(long, default_value = "all")]
    view: String,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl SearchArgs {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            search_query: self.query.clone(),
            denomination: Selection::from(self.denomination.as_str()),
            mint_city: Selection::from(self.mint.as_str()),
            status: StatusFilter::from(self.status.as_str()),
            view_mode: ViewMode::from(self.view.as_str()),
        }
    }
}

#[derive(Subcommand)]
enum CollectionCommand {
    /// List coins, newest first
    List,

    /// Show one coin
    Show { id: String },

    /// Add a coin
    Add(AddArgs),

    /// Delete a coin
    Delete { id: String },

    /// Import coins from a CSV file (re-importing skips duplicates)
    Import { csv: PathBuf },

    /// Audit trail for a coin
    History { id: String },
}

#[derive(Args)]
struct AddArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    country: Option<String>,
    #[arg(long)]
    denomination: Option<String>,
    #[arg(long)]
    year: Option<i32>,
    #[arg(long)]
    metal: Option<String>,
    /// Grams
    #[arg(long)]
    weight: Option<f64>,
    /// Millimetres
    #[arg(long)]
    diameter: Option<f64>,
    #[arg(long)]
    shape: Option<String>,
    #[arg(long)]
    edge_design: Option<String>,
    #[arg(long)]
    mint_mark: Option<String>,
    #[arg(long)]
    obverse_design: Option<String>,
    #[arg(long)]
    reverse_design: Option<String>,
    #[arg(long)]
    issue_type: Option<String>,
    #[arg(long)]
    security_features: Option<String>,
    /// Obverse photo to upload
    #[arg(long)]
    obverse_image: Option<PathBuf>,
    /// Reverse photo to upload
    #[arg(long)]
    reverse_image: Option<PathBuf>,
}

impl AddArgs {
    fn new_coin(&self) -> NewCoin {
        NewCoin {
            name: self.name.clone(),
            country: self.country.clone(),
            denomination: self.denomination.clone(),
            year: self.year,
            metal: self.metal.clone(),
            weight: self.weight,
            diameter: self.diameter,
            shape: self.shape.clone(),
            edge_design: self.edge_design.clone(),
            mint_mark: self.mint_mark.clone(),
            obverse_design: self.obverse_design.clone(),
            reverse_design: self.reverse_design.clone(),
            issue_type: self.issue_type.clone(),
            security_features: self.security_features.clone(),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load();
    let catalog_path = cli.catalog.clone().or_else(|| config.catalog_path.clone());

    match cli.command.unwrap_or(Command::Explore) {
        Command::Explore => run_explorer(load_catalog(catalog_path.as_deref())?),
        Command::Search(args) => run_search(&load_catalog(catalog_path.as_deref())?, &args),
        Command::Facets => run_facets(&load_catalog(catalog_path.as_deref())?),
        Command::Show { id } => run_show(&load_catalog(catalog_path.as_deref())?, &id),
        Command::Collection(command) => run_collection(&config, command),
    }
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("Failed to load catalog {}", path.display())),
        None => Ok(Catalog::sample()),
    }
}

// ============================================================================
// CATALOG COMMANDS
// ============================================================================

#[cfg(feature = "tui")]
fn run_explorer(catalog: Catalog) -> Result<()> {
    println!("🖥️  Loading Indian Coin Explorer...");
    println!("✓ Loaded {} coins", catalog.len());

    let mut app = ui::App::new(catalog);
    ui::run_ui(&mut app)?;

    println!("\n✅ Explorer closed");
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_explorer(_catalog: Catalog) -> Result<()> {
    bail!("Explorer not available. Rebuild with: cargo build --features tui, or use `coin-catalog search`")
}

fn run_search(catalog: &Catalog, args: &SearchArgs) -> Result<()> {
    let coins = catalog.filter(&args.criteria());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&coins)?);
        return Ok(());
    }

    if coins.is_empty() {
        println!("No coins found. Try adjusting your filters or search query.");
    } else {
        println!(
            "{:<6} {:<13} {:<45} {:<6} {:<11} {:<13} {}",
            "ID", "Denomination", "Name", "Year", "Mint", "Status", "Issue"
        );
        for coin in &coins {
            print_catalog_row(coin);
        }
    }

    println!("\nShowing {} of {} coins", coins.len(), catalog.len());
    Ok(())
}

fn print_catalog_row(coin: &CoinRecord) {
    println!(
        "{:<6} {:<13} {:<45} {:<6} {:<11} {:<13} {}",
        coin.id,
        coin.denomination,
        coin.name,
        coin.year,
        coin.mint_city,
        coin.status.as_str(),
        coin.issue_type
    );
}

fn run_facets(catalog: &Catalog) -> Result<()> {
    println!("Denominations: {}", catalog.distinct_denominations().join(", "));
    println!("Mint cities:   {}", catalog.distinct_mint_cities().join(", "));
    Ok(())
}

fn run_show(catalog: &Catalog, id: &str) -> Result<()> {
    let Some(coin) = catalog.find_by_id(id) else {
        bail!("Coin not found: {}", id);
    };

    println!("🪙 {}", coin.name);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Denomination:  {}", coin.denomination);
    println!("Year:          {}", coin.year);
    println!("Series:        {}", coin.series);
    println!("Status:        {}", coin.status.label());
    println!("Issue type:    {}", coin.issue_type);
    if let Some(note) = &coin.commemorative_note {
        println!("Commemorates:  {}", note);
    }
    println!("Metal:         {}", coin.metal);
    println!("Weight:        {} g", coin.weight);
    println!("Diameter:      {} mm", coin.diameter);
    if let Some(thickness) = coin.thickness {
        println!("Thickness:     {} mm", thickness);
    }
    println!("Shape:         {}", coin.shape);
    println!("Edge:          {}", coin.edge_design);
    println!("Mint:          {} ({})", coin.mint_city, coin.mint_mark);
    println!("Obverse:       {}", coin.obverse_description);
    println!("Reverse:       {}", coin.reverse_description);
    if let Some(features) = &coin.security_features {
        println!("Security:      {}", features);
    }
    println!("Images:        {}", coin.obverse_image);
    println!("               {}", coin.reverse_image);
    Ok(())
}

// ============================================================================
// COLLECTION COMMANDS
// ============================================================================

fn open_collection(config: &Config) -> Result<Connection> {
    config.ensure_dirs()?;
    let conn = Connection::open(&config.database_path).with_context(|| {
        format!("Failed to open database {}", config.database_path.display())
    })?;
    setup_database(&conn)?;
    Ok(conn)
}

fn run_collection(config: &Config, command: CollectionCommand) -> Result<()> {
    let conn = open_collection(config)?;

    match command {
        CollectionCommand::List => {
            let coins = get_all_coins(&conn, &config.owner)?;
            if coins.is_empty() {
                println!("Your collection is empty. Add one with: coin-catalog collection add --name <NAME>");
                return Ok(());
            }
            for coin in &coins {
                println!(
                    "{}  {:<40} {:<12} {:<6} {}",
                    coin.id,
                    coin.name,
                    coin.denomination.as_deref().unwrap_or("-"),
                    coin.year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string()),
                    coin.country.as_deref().unwrap_or("-"),
                );
            }
            println!("\n✓ {} coins in collection", coins.len());
        }
        CollectionCommand::Show { id } => {
            let coin = get_coin(&conn, &id)?.with_context(|| format!("Coin not found: {}", id))?;
            print_collection_coin(&coin);
        }
        CollectionCommand::Add(args) => {
            let store = ImageStore::new(&config.images_dir, config.image_base_url.clone());
            let coin = add_to_collection(&conn, &store, &config.owner, &args)?;
            println!("✅ Coin added successfully! ({})", coin.id);
        }
        CollectionCommand::Delete { id } => {
            delete_coin(&conn, &id)?;
            println!("✅ Coin deleted successfully");
        }
        CollectionCommand::Import { csv } => {
            println!("📂 Importing {}...", csv.display());
            let summary = import_csv(&conn, &config.owner, &csv)?;
            println!("✓ Inserted: {} coins", summary.inserted);
            println!("✓ Skipped duplicates: {}", summary.duplicates);
            if summary.invalid > 0 {
                println!("⚠️  Skipped invalid rows: {}", summary.invalid);
            }
            println!("✓ Collection now holds {} coins", count_coins(&conn, &config.owner)?);
        }
        CollectionCommand::History { id } => {
            let events = get_events_for_entity(&conn, "coin", &id)?;
            if events.is_empty() {
                println!("No history for {}", id);
            }
            for event in events {
                println!(
                    "{}  {:<14} by {:<12} {}",
                    event.timestamp.to_rfc3339(),
                    event.event_type,
                    event.actor,
                    event.data
                );
            }
        }
    }

    Ok(())
}

/// Validate first so a rejected coin never leaves images behind
fn add_to_collection(
    conn: &Connection,
    store: &ImageStore,
    owner: &str,
    args: &AddArgs,
) -> Result<CollectionCoin> {
    let coin = args.new_coin().normalized();
    validate_new_coin(&coin).map_err(CollectionError::Invalid)?;

    let images = CoinImages {
        obverse_url: upload(store, owner, ImageSide::Obverse, args.obverse_image.as_deref())?,
        reverse_url: upload(store, owner, ImageSide::Reverse, args.reverse_image.as_deref())?,
    };

    Ok(add_coin(conn, owner, &coin, images)?)
}

fn upload(
    store: &ImageStore,
    owner: &str,
    side: ImageSide,
    source: Option<&Path>,
) -> Result<Option<String>> {
    match source {
        Some(path) => Ok(Some(store.store(owner, side, path)?.url)),
        None => Ok(None),
    }
}

fn print_collection_coin(coin: &CollectionCoin) {
    let optional = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    println!("🪙 {}", coin.name);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("ID:            {}", coin.id);
    println!("Country:       {}", optional(&coin.country));
    println!("Denomination:  {}", optional(&coin.denomination));
    println!(
        "Year:          {}",
        coin.year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string())
    );
    println!("Metal:         {}", optional(&coin.metal));
    if let Some(weight) = coin.weight {
        println!("Weight:        {} g", weight);
    }
    if let Some(diameter) = coin.diameter {
        println!("Diameter:      {} mm", diameter);
    }
    println!("Shape:         {}", optional(&coin.shape));
    println!("Edge:          {}", optional(&coin.edge_design));
    println!("Mint mark:     {}", optional(&coin.mint_mark));
    println!("Obverse:       {}", optional(&coin.obverse_design));
    println!("Reverse:       {}", optional(&coin.reverse_design));
    println!("Issue type:    {}", optional(&coin.issue_type));
    println!("Security:      {}", optional(&coin.security_features));
    println!("Obverse image: {}", optional(&coin.obverse_image_url));
    println!("Reverse image: {}", optional(&coin.reverse_image_url));
    println!("Added:         {}", coin.created_at.to_rfc3339());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_add(args: &[&str]) -> AddArgs {
        let mut argv = vec!["coin-catalog", "collection", "add"];
        argv.extend_from_slice(args);

        match Cli::try_parse_from(argv).unwrap().command {
            Some(Command::Collection(CollectionCommand::Add(add))) => add,
            _ => panic!("expected collection add"),
        }
    }

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();
        conn
    }

    #[test]
    fn test_rejected_coin_stores_no_images() {
        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("front.png");
        std::fs::write(&photo, b"png").unwrap();
        let store = ImageStore::new(dir.path().join("images"), None);
        let conn = setup();

        let photo_arg = photo.display().to_string();
        let args = parse_add(&["--name", "   ", "--obverse-image", photo_arg.as_str()]);

        let err = add_to_collection(&conn, &store, "local", &args).unwrap_err();
        assert_eq!(err.to_string(), "name: Name is required");
        assert!(!store.root().exists());
        assert_eq!(count_coins(&conn, "local").unwrap(), 0);
    }

    #[test]
    fn test_added_coin_links_stored_images() {
        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("front.png");
        std::fs::write(&photo, b"png").unwrap();
        let store = ImageStore::new(dir.path().join("images"), None);
        let conn = setup();

        let photo_arg = photo.display().to_string();
        let args = parse_add(&["--name", "1 Rupee 1947", "--year", "1947", "--obverse-image", photo_arg.as_str()]);

        let coin = add_to_collection(&conn, &store, "local", &args).unwrap();
        let url = coin.obverse_image_url.unwrap();
        assert!(Path::new(&url).exists());
        assert!(coin.reverse_image_url.is_none());
        assert_eq!(count_coins(&conn, "local").unwrap(), 1);
    }

    #[test]
    fn test_search_args_build_criteria() {
        let cli = Cli::try_parse_from(["coin-catalog", "search", "--view", "commemorative", "--mint", "Mumbai"]).unwrap();
        let Some(Command::Search(args)) = cli.command else {
            panic!("expected search");
        };

        let criteria = args.criteria();
        assert_eq!(criteria.view_mode, ViewMode::Commemorative);
        assert_eq!(criteria.mint_city, Selection::Only("Mumbai".to_string()));
        assert_eq!(criteria.denomination, Selection::All);
        assert_eq!(Catalog::sample().filter(&criteria).len(), 2);
    }
}
