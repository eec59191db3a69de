mod config;
mod display;
mod error;

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use reports::{DurationClass, DurationReport, TIPS, format_hours};
use storage::{Cause, Causes, EventDraft, EventRecord, EventStore, SqliteKv};
use tracing_subscriber::EnvFilter;

use config::Config;
use error::{Error, Result};

const CONFIG_FILE: &str = "powerguard.toml";
const DB_FILE: &str = "events.db";

#[derive(Parser)]
#[command(name = "powerguard")]
#[command(about = "Log and review power outages", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./powerguard.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the event database
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// More log output (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new power outage
    Add {
        /// Affected neighborhood, city or ZIP code
        #[arg(short, long)]
        location: String,
        /// Estimated duration in hours
        #[arg(short, long)]
        estimated: f64,
        /// Probable cause (repeatable), e.g. heavy-rain, "Strong Wind"
        #[arg(short, long = "cause")]
        causes: Vec<Cause>,
        /// Description of damages or affected infrastructure
        #[arg(short, long)]
        damages: Option<String>,
    },
    /// Show the outage summary
    Overview,
    /// List outages, newest first
    List {
        /// Show only the last N outages
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show one outage in full
    Show {
        /// Event ID (prefix match supported)
        id: String,
    },
    /// Mark an outage resolved with its actual duration
    Resolve {
        /// Event ID (prefix match supported)
        id: String,
        /// Actual duration in hours
        #[arg(short, long)]
        actual: f64,
    },
    /// Delete an outage
    Remove {
        /// Event ID (prefix match supported)
        id: String,
    },
    /// Outage counts per location
    Locations {
        /// Only list outages whose location contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Duration statistics and distribution
    Durations,
    /// Reported damages
    Damages {
        /// Include outages without reported damages
        #[arg(short, long)]
        all: bool,
    },
    /// Power outage safety tips
    Tips,
    /// List the causes that can be recorded
    Causes,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        if e.is_write_failure() {
            eprintln!("Nothing was saved. Please try again.");
        }
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or(Commands::Overview);

    // Commands that never touch storage.
    match command {
        Commands::Tips => return cmd_tips(),
        Commands::Causes => return cmd_causes(),
        _ => {}
    }

    let config = load_config(cli.config.as_deref())?;
    let store = open_store(&config, cli.data_dir)?;

    match command {
        Commands::Add {
            location,
            estimated,
            causes,
            damages,
        } => cmd_add(&store, location, estimated, causes, damages).await,
        Commands::Overview => cmd_overview(&store).await,
        Commands::List { limit } => cmd_list(&store, limit).await,
        Commands::Show { id } => cmd_show(&store, &id).await,
        Commands::Resolve { id, actual } => cmd_resolve(&store, &id, actual).await,
        Commands::Remove { id } => cmd_remove(&store, &id).await,
        Commands::Locations { search } => cmd_locations(&store, &config, search.as_deref()).await,
        Commands::Durations => cmd_durations(&store, &config).await,
        Commands::Damages { all } => cmd_damages(&store, all).await,
        Commands::Tips | Commands::Causes => Ok(()),
    }
}

async fn cmd_add(
    store: &EventStore,
    location: String,
    estimated: f64,
    causes: Vec<Cause>,
    damages: Option<String>,
) -> Result<()> {
    let draft = EventDraft::new(location, estimated)?
        .with_causes(causes.into_iter().collect::<Causes>())
        .with_damages(damages.unwrap_or_default());

    let event = store.add(draft).await?;
    tracing::info!(id = %event.id, "outage recorded");

    println!("Power outage recorded: {}", display::short_id(&event));
    println!();
    display::print_detail(&event);
    Ok(())
}

async fn cmd_overview(store: &EventStore) -> Result<()> {
    let summary = store.summary().await;

    if summary.is_empty() {
        println!("No power outages recorded.");
        println!("Start with: powerguard add --location <PLACE> --estimated <HOURS>");
        return Ok(());
    }

    display::print_summary(&summary);
    Ok(())
}

async fn cmd_list(store: &EventStore, limit: Option<usize>) -> Result<()> {
    let events = store.get_all().await;

    if events.is_empty() {
        println!("No power outages recorded.");
        return Ok(());
    }

    let newest = reports::newest_first(&events);
    let shown = limit.unwrap_or(newest.len());
    display::print_rows(newest.into_iter().take(shown));
    Ok(())
}

async fn cmd_show(store: &EventStore, prefix: &str) -> Result<()> {
    let event = find_event(store.get_all().await, prefix)?;
    display::print_detail(&event);
    Ok(())
}

async fn cmd_resolve(store: &EventStore, prefix: &str, actual: f64) -> Result<()> {
    let mut event = find_event(store.get_all().await, prefix)?;
    event.resolve(actual)?;

    if !store.update(&event).await? {
        return Err(Error::EventNotFound {
            prefix: prefix.to_string(),
        });
    }

    println!(
        "Outage {} marked resolved after {}",
        display::short_id(&event),
        format_hours(actual)
    );
    Ok(())
}

async fn cmd_remove(store: &EventStore, prefix: &str) -> Result<()> {
    let event = find_event(store.get_all().await, prefix)?;

    if !store.remove(event.id).await? {
        return Err(Error::EventNotFound {
            prefix: prefix.to_string(),
        });
    }

    println!(
        "Removed outage {} at {}",
        display::short_id(&event),
        event.location
    );
    Ok(())
}

async fn cmd_locations(store: &EventStore, config: &Config, search: Option<&str>) -> Result<()> {
    let events = store.get_all().await;
    let stats = reports::location_stats(&events);

    if stats.is_empty() {
        println!("No locations recorded yet.");
        return Ok(());
    }

    println!("Location statistics");
    for stat in stats.iter().take(config.reports.locations.top) {
        let noun = if stat.count == 1 { "event" } else { "events" };
        println!("  {:<30}  {} {noun}", stat.location, stat.count);
    }
    println!();

    let matching = reports::search_by_location(&events, search.unwrap_or_default());
    if matching.is_empty() {
        println!("No outages match '{}'.", search.unwrap_or_default());
        return Ok(());
    }
    display::print_rows(matching);
    Ok(())
}

async fn cmd_durations(store: &EventStore, config: &Config) -> Result<()> {
    let events = store.get_all().await;

    if events.is_empty() {
        println!("No power outages recorded.");
        return Ok(());
    }

    let buckets = &config.reports.durations;
    let report = DurationReport::build(&events, buckets);

    println!("Duration statistics");
    if report.average > 0.0 {
        println!("  Average duration:  {}", format_hours(report.average));
    } else {
        println!("  Average duration:  N/A");
    }
    match report.longest.and_then(|e| e.actual_duration) {
        Some(hours) => println!("  Longest outage:    {}", format_hours(hours)),
        None => println!("  Longest outage:    N/A"),
    }
    println!();

    for class in DurationClass::ALL {
        let range = match class {
            DurationClass::Short => format!("< {}h", buckets.short_below),
            DurationClass::Medium => format!("{}-{}h", buckets.short_below, buckets.long_from),
            DurationClass::Long => format!(">= {}h", buckets.long_from),
        };
        println!(
            "  {:<7} {:<10} {:>3} ({:>3.0}%)",
            class.label(),
            range,
            report.bucket(class).len(),
            report.share(class) * 100.0
        );
    }

    for class in DurationClass::ALL {
        let bucket = report.bucket(class);
        if bucket.is_empty() {
            continue;
        }
        println!();
        println!("{} outages", class.label());
        display::print_rows(bucket.iter().copied());
    }
    Ok(())
}

async fn cmd_damages(store: &EventStore, all: bool) -> Result<()> {
    let events = store.get_all().await;
    let shown: Vec<&EventRecord> = if all {
        events.iter().collect()
    } else {
        reports::with_damages(&events)
    };

    if shown.is_empty() {
        println!("No damage reports found.");
        return Ok(());
    }

    for event in shown {
        if event.has_damages() {
            display::print_damage_card(event);
        } else {
            println!(
                "[{}] {} ({})",
                display::short_id(event),
                event.location,
                display::status(event)
            );
            println!("    No damages reported");
        }
    }
    Ok(())
}

fn cmd_tips() -> Result<()> {
    for (i, section) in TIPS.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", section.title);
        for tip in section.tips {
            println!("  - {tip}");
        }
    }
    Ok(())
}

fn cmd_causes() -> Result<()> {
    for cause in Cause::ALL {
        println!("{:<14}  {}", cause.slug(), cause.label());
    }
    Ok(())
}

/// Resolve an id prefix to exactly one event.
fn find_event(events: Vec<EventRecord>, prefix: &str) -> Result<EventRecord> {
    let wanted = prefix.trim().to_lowercase();
    let mut matching: Vec<EventRecord> = events
        .into_iter()
        .filter(|e| e.id.to_string().starts_with(&wanted))
        .collect();

    match matching.len() {
        0 => Err(Error::EventNotFound {
            prefix: prefix.to_string(),
        }),
        1 => Ok(matching.remove(0)),
        _ => Err(Error::AmbiguousEvent {
            prefix: prefix.to_string(),
            matches: matching.iter().map(|e| e.id.to_string()).collect(),
        }),
    }
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return Ok(Config::load(path)?);
    }

    let default_path = Path::new(CONFIG_FILE);
    if default_path.exists() {
        Ok(Config::load(default_path)?)
    } else {
        Ok(Config::default())
    }
}

fn open_store(config: &Config, data_dir: Option<PathBuf>) -> Result<EventStore> {
    let data_dir = data_dir
        .or_else(|| config.storage.data_dir.clone())
        .or_else(dirs_data_dir)
        .ok_or(Error::NoDataDir)?;
    std::fs::create_dir_all(&data_dir)?;

    let db_path = data_dir.join(DB_FILE);
    tracing::debug!(path = %db_path.display(), namespace = %config.storage.namespace, "opening event store");

    let kv = SqliteKv::open(&db_path)?;
    Ok(EventStore::with_namespace(kv, &config.storage.namespace))
}

fn dirs_data_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".local/share/powerguard"))
    }
    #[cfg(target_os = "linux")]
    {
        std::env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".local/share")))
            .map(|p| p.join("powerguard"))
    }
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|h| PathBuf::from(h).join("powerguard"))
    }
    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use storage::EventId;

    fn with_id(id: &str) -> EventRecord {
        EventRecord {
            id: id.parse::<EventId>().unwrap(),
            location: "Pine Ave".into(),
            estimated_duration: 1.0,
            actual_duration: None,
            damages: String::new(),
            date: Utc::now(),
            resolved: false,
            causes: Causes::new(),
        }
    }

    fn sample() -> Vec<EventRecord> {
        vec![
            with_id("aa11aa11-0000-4000-8000-000000000001"),
            with_id("aa22bb22-0000-4000-8000-000000000002"),
            with_id("cc33cc33-0000-4000-8000-000000000003"),
        ]
    }

    #[test]
    fn prefix_finds_unique_event() {
        let event = find_event(sample(), "cc3").unwrap();
        assert_eq!(event.id.to_string(), "cc33cc33-0000-4000-8000-000000000003");
    }

    #[test]
    fn prefix_is_case_insensitive() {
        assert!(find_event(sample(), "AA22").is_ok());
    }

    #[test]
    fn prefix_without_match() {
        assert!(matches!(
            find_event(sample(), "ff"),
            Err(Error::EventNotFound { .. })
        ));
    }

    #[test]
    fn ambiguous_prefix_lists_candidates() {
        match find_event(sample(), "aa") {
            Err(Error::AmbiguousEvent { matches, .. }) => assert_eq!(matches.len(), 2),
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    #[test]
    fn cli_parses_repeated_causes() {
        let cli = Cli::try_parse_from([
            "powerguard",
            "add",
            "--location",
            "Harbor",
            "--estimated",
            "2.5",
            "--cause",
            "heavy-rain",
            "--cause",
            "Strong Wind",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Add { causes, estimated, .. }) => {
                assert_eq!(causes, vec![Cause::HeavyRain, Cause::StrongWind]);
                assert_eq!(estimated, 2.5);
            }
            _ => panic!("expected add command"),
        }
    }

    #[test]
    fn cli_rejects_unknown_cause() {
        assert!(
            Cli::try_parse_from([
                "powerguard",
                "add",
                "-l",
                "Harbor",
                "-e",
                "1",
                "-c",
                "volcano"
            ])
            .is_err()
        );
    }

    #[tokio::test]
    async fn store_opens_in_configured_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::parse("[storage]\nnamespace = \"@Test\"\n").unwrap();
        let store = open_store(&config, Some(dir.path().to_path_buf())).unwrap();

        assert_eq!(store.key(), "@Test:events");
        store
            .add(EventDraft::new("Pine Ave", 1.0).unwrap())
            .await
            .unwrap();
        assert!(dir.path().join(DB_FILE).exists());
        assert_eq!(store.get_all().await.len(), 1);
    }
}
