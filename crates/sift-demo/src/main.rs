//! `sift-demo` - search synthetic people and locations from the command line.
//!
//! ```text
//! sift-demo people -q lee --state Active --sort FamilyName --dir desc
//! sift-demo --json locations --population MoreThan1M --page 2
//! sift-demo fields
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use sift::{
    option_list, sortable_fields, Paginated, PagingDirective, SearchRequest, SortColumn,
    Sortable,
};
use sift_demo::{
    data, report, DemoConfig, Location, LocationParams, LocationSearch, PeopleParams,
    PeopleSearch, Person, PopulationBucket, UserState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "sift-demo", version, about = "Search synthetic people and locations")]
struct Cli {
    /// YAML config file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log pipeline decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print the result page as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search people by name or email
    People(PeopleArgs),
    /// Search locations by name
    Locations(LocationArgs),
    /// List sortable fields and filter options
    Fields,
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// Free-text query
    #[arg(short, long)]
    query: Option<String>,

    /// Field to sort by
    #[arg(long, value_name = "FIELD")]
    sort: Option<String>,

    /// Sort direction
    #[arg(long, default_value = "asc", value_name = "asc|desc")]
    dir: String,

    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    page: i64,

    /// Page size (defaults to the configured default)
    #[arg(long, allow_negative_numbers = true)]
    size: Option<i64>,
}

impl SearchArgs {
    fn sort_by(&self) -> Option<SortColumn> {
        self.sort.as_ref().map(|name| SortColumn {
            name: Some(name.clone()),
            direction: Some(self.dir.clone()),
        })
    }

    fn paging(&self, config: &DemoConfig) -> PagingDirective {
        let size = self
            .size
            .unwrap_or(config.paging.default_size as i64);
        PagingDirective::new(self.page, size)
    }
}

#[derive(Debug, Args)]
struct PeopleArgs {
    #[command(flatten)]
    search: SearchArgs,

    /// Only people in this state
    #[arg(long)]
    state: Option<String>,

    /// Only people in any of these states (comma separated)
    #[arg(long, value_delimiter = ',')]
    states: Vec<String>,

    /// Only archived (true) or unarchived (false) people
    #[arg(long)]
    archived: Option<bool>,
}

#[derive(Debug, Args)]
struct LocationArgs {
    #[command(flatten)]
    search: SearchArgs,

    /// Population bucket, e.g. MoreThan1M
    #[arg(long)]
    population: Option<String>,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_page<T: Serialize>(
    page: &Paginated<T>,
    json: bool,
    headers: &[&str],
    row: impl Fn(&T) -> Vec<String>,
) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(page).context("failed to serialize page")?;
        println!("{out}");
    } else {
        let rows: Vec<Vec<String>> = page.items.iter().map(row).collect();
        print!("{}", report::table(headers, &rows));
        println!("{}", report::footer(page));
    }
    Ok(())
}

fn person_row(p: &Person) -> Vec<String> {
    vec![
        p.given_name.clone(),
        p.family_name.clone(),
        p.email_address.clone(),
        format!("{:?}", p.state),
        p.is_archived.to_string(),
    ]
}

fn location_row(l: &Location) -> Vec<String> {
    vec![
        l.name.clone(),
        l.country.clone(),
        l.population.map(|p| p.to_string()).unwrap_or_default(),
    ]
}

fn run_people(args: PeopleArgs, config: &DemoConfig, json: bool) -> Result<()> {
    let params = PeopleParams {
        query: args.search.query.clone(),
        state: args.state,
        states: args.states,
        is_archived: args.archived,
        sort_by: args.search.sort_by(),
        paging: Some(args.search.paging(config)),
    };
    let search =
        PeopleSearch::new(data::people(config.seed, config.people)).with_limits(config.paging);
    let page = SearchRequest::new(params).send(&search);
    print_page(
        &page,
        json,
        &["GivenName", "FamilyName", "EmailAddress", "State", "IsArchived"],
        person_row,
    )
}

fn run_locations(args: LocationArgs, config: &DemoConfig, json: bool) -> Result<()> {
    let params = LocationParams {
        query: args.search.query.clone(),
        population: args.population,
        sort_by: args.search.sort_by(),
        paging: Some(args.search.paging(config)),
    };
    let search = LocationSearch::new(data::locations(config.seed, config.locations))
        .with_limits(config.paging);
    let page = SearchRequest::new(params).send(&search);
    print_page(&page, json, &["Name", "Country", "Population"], location_row)
}

fn field_list<T: Sortable>() -> String {
    sortable_fields::<T>().into_iter().collect::<Vec<_>>().join(", ")
}

fn run_fields() {
    println!("people sortable by: {}", field_list::<Person>());
    println!("locations sortable by: {}", field_list::<Location>());

    let none: [&str; 0] = [];
    println!();
    println!("--state / --states:");
    for option in option_list::<UserState, _>(&none) {
        println!("  {}", option.value);
    }
    println!("--population:");
    for option in option_list::<PopulationBucket, _>(&none) {
        println!("  {:<14} {}", option.value, option.text);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = DemoConfig::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;

    match cli.command {
        Command::People(args) => run_people(args, &config, cli.json),
        Command::Locations(args) => run_locations(args, &config, cli.json),
        Command::Fields => {
            run_fields();
            Ok(())
        }
    }
}
