//! Command-line browser over the built-in campground catalog.
//!
//! # Responsibility
//! - Expose listing, detail, ranking and facet queries as subcommands.
//! - Drive the map adapter against the recording widget for previews.

use campmap_core::{
    default_log_level, init_logging, recommendation_score, recommended, unique_amenities,
    unique_kinds, unique_regions, Amenity, CampgroundKind, CampgroundStore, DetailPage,
    FilterCriteria, InjectError, ListingState, MapAdapter, MapConfig, MapLocation, MapWidget,
    RecordingProvider, Region, ScriptInjector, Selector, SortOrder, Vocabulary, WidgetLoader,
    DEFAULT_RECOMMENDED_LIMIT,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "campmap", about = "Browse campgrounds around Moscow, Tver and Kaluga")]
struct Args {
    /// Directory for rolling log files; logging stays off when omitted
    #[arg(long, global = true)]
    log_dir: Option<String>,

    #[arg(long, global = true, default_value_t = default_log_level().to_string())]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List campgrounds matching the given filters
    List {
        #[arg(long, default_value = "all")]
        region: Selector<Region>,
        #[arg(long = "type", default_value = "all")]
        kind: Selector<CampgroundKind>,
        #[arg(long, default_value = "all")]
        amenity: Selector<Amenity>,
        #[arg(long)]
        min_price: Option<f64>,
        #[arg(long)]
        max_price: Option<f64>,
        /// Case-insensitive match on name, description and location
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_enum, default_value_t)]
        sort: SortArg,
    },
    /// Show one campground's detail page
    Show { id: String },
    /// Top campgrounds by rating weighted with review volume
    Recommended {
        #[arg(long, default_value = "all")]
        region: Selector<Region>,
        #[arg(long, default_value_t = DEFAULT_RECOMMENDED_LIMIT)]
        limit: usize,
    },
    /// Regions, kinds and amenities present in the catalog
    Facets,
    /// Render the listing map for a region with the recording widget
    Map {
        #[arg(long, default_value = "all")]
        region: Selector<Region>,
    },
}

#[derive(Clone, Copy, Default, ValueEnum)]
enum SortArg {
    #[default]
    AsListed,
    Rating,
    Price,
}

impl From<SortArg> for SortOrder {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::AsListed => SortOrder::AsListed,
            SortArg::Rating => SortOrder::Rating,
            SortArg::Price => SortOrder::Price,
        }
    }
}

/// Settles the shared loader as soon as the script is requested.
struct ImmediateInjector<'a>(&'a WidgetLoader);

impl ScriptInjector for ImmediateInjector<'_> {
    fn inject(&self, script_url: &str) -> Result<(), InjectError> {
        log::debug!("event=widget_inject module=cli status=ok url_len={}", script_url.len());
        self.0.complete(Ok(()));
        Ok(())
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    if let Some(log_dir) = args.log_dir.as_deref() {
        if let Err(err) = init_logging(&args.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_command module=cli status=error reason={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    let store = CampgroundStore::builtin()?;

    match command {
        Command::List {
            region,
            kind,
            amenity,
            min_price,
            max_price,
            search,
            sort,
        } => {
            let mut criteria = FilterCriteria::new().region(region).kind(kind).amenity(amenity);
            criteria.min_price = min_price;
            criteria.max_price = max_price;
            criteria.search_text = search;

            let mut state = ListingState::new(criteria);
            state.sort = sort.into();
            for card in state.cards(store.records()) {
                println!(
                    "{:<12} {:<40} {:<20} {:.1} ({}) {}",
                    card.id,
                    card.name,
                    card.region_name,
                    card.rating,
                    card.review_count,
                    card.price_label()
                );
            }
        }
        Command::Show { id } => match DetailPage::mount(store, &id) {
            DetailPage::Found(detail) => {
                let record = detail.record;
                println!("{} [{}]", record.name, detail.kind_label());
                println!("{}, {}", record.location, record.region_name);
                println!("{:.1} ({}) {}", record.rating, record.review_count, detail.price_label());
                println!();
                println!("{}", record.full_description);
                println!();
                let badges = detail
                    .amenity_badges()
                    .iter()
                    .map(|badge| badge.label)
                    .collect::<Vec<_>>();
                println!("Удобства: {}", badges.join(", "));
                for contact in detail.contacts() {
                    println!("{:?}: {}", contact.kind, contact.value);
                }
                for rule in detail.rules() {
                    println!("- {rule}");
                }
                for attraction in detail.nearby_attractions() {
                    println!("* {attraction}");
                }
            }
            DetailPage::NotFound { requested_id } => {
                return Err(format!("campground `{requested_id}` not found").into());
            }
        },
        Command::Recommended { region, limit } => {
            let matching = store
                .records()
                .iter()
                .filter(|record| region.accepts(record.region));
            for record in recommended(matching, limit) {
                println!(
                    "{:<12} {:<40} {:.3}",
                    record.id,
                    record.name,
                    recommendation_score(record)
                );
            }
        }
        Command::Facets => {
            let regions = unique_regions(store.records());
            let kinds = unique_kinds(store.records());
            let amenities = unique_amenities(store.records());
            println!("regions: {}", join(regions.into_iter()));
            println!("types: {}", join(kinds.into_iter()));
            println!("amenities: {}", join(amenities.into_iter()));
        }
        Command::Map { region } => {
            let config = MapConfig::from_env()?;
            let loader = WidgetLoader::global();
            let locations = store.records().iter().map(MapLocation::from).collect();
            let mut adapter = MapAdapter::overview(
                "campground-map",
                Arc::new(RecordingProvider::new()),
                locations,
                region,
            );
            let capability = adapter.mount(loader, &ImmediateInjector(loader), &config);
            println!("capability: {capability:?}");
            if let Some(widget) = adapter.widget() {
                let center = widget.center();
                println!(
                    "center: {:.4}, {:.4} zoom: {}",
                    center.lat,
                    center.lng,
                    widget.zoom().unwrap_or_default()
                );
            }
            for (handle, id) in adapter.marker_handles().iter().zip(adapter.marker_ids()) {
                println!("{handle} -> {id}");
            }
        }
    }
    Ok(())
}

fn join<T: Vocabulary>(values: impl Iterator<Item = T>) -> String {
    values.map(|value| value.as_str()).collect::<Vec<_>>().join(", ")
}
