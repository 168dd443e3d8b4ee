mod reports;
mod seeds;
mod source;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use packlist_core::{
    Cart, CatalogSource, Climate, PackingEngine, PackingList, TripPlanner, TripProfile, TripType,
    generate_after, guide_book,
};
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use reports::ListReport;
use seeds::{SeedInfo, resolve_seed_input};
use source::FileSource;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    /// Colored summary for the terminal
    Console,
    Json,
    Markdown,
    /// One row per packing item
    Csv,
}

#[derive(Debug, Parser)]
#[command(name = "packlist", version)]
#[command(about = "Generate a family packing list for a trip")]
struct Args {
    /// Destination name, e.g. goa or "Mumbai"
    #[arg(long)]
    destination: Option<String>,

    /// Trip type: leisure, business, adventure, beach, mountain or city
    #[arg(long, default_value = "leisure")]
    trip_type: TripType,

    /// Trip length in days
    #[arg(long, default_value_t = 3)]
    duration: u32,

    /// Expected climate: hot, cold, moderate or rainy
    #[arg(long)]
    climate: Option<Climate>,

    /// Number of travelers
    #[arg(long, default_value_t = 1)]
    travelers: u32,

    /// Free-text occasion, e.g. "wedding"
    #[arg(long)]
    occasion: Option<String>,

    /// Seed as a number or a list code such as MONSOON42
    #[arg(long, env = "PACKLIST_SEED")]
    seed: Option<String>,

    /// Product catalog JSON to match against instead of the sample catalog
    #[arg(long, env = "PACKLIST_CATALOG")]
    catalog: Option<PathBuf>,

    /// Rule book JSON to use instead of the built-in rules
    #[arg(long, env = "PACKLIST_RULES")]
    rules: Option<PathBuf>,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Mark every item as packed
    #[arg(long)]
    select_all: bool,

    /// Put the products of all selected items in a cart
    #[arg(long)]
    add_to_cart: bool,

    /// Include the curated guide for the destination, when one exists
    #[arg(long)]
    guide: bool,

    /// List known destinations and exit
    #[arg(long)]
    list_destinations: bool,

    /// Pause before generating, in milliseconds
    #[arg(long, default_value_t = 0)]
    think_ms: u64,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn profile(&self) -> Result<TripProfile> {
        let Some(destination) = self.destination.as_deref() else {
            bail!("--destination is required unless --list-destinations is given");
        };
        let mut profile =
            TripProfile::new(destination, self.trip_type, self.duration, self.travelers);
        profile.climate = self.climate;
        profile.occasion.clone_from(&self.occasion);
        profile.validate().context("invalid trip")?;
        Ok(profile)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let source = FileSource::new(args.rules.clone(), args.catalog.clone());
    if maybe_list_destinations(&args, &source)? {
        return Ok(());
    }

    let profile = args.profile()?;
    let seed_info = resolve_seed_input(args.seed.as_deref())?;
    let start_time = Instant::now();

    let mut list = generate_list(&args, &source, &profile, &seed_info).await?;
    log::info!(
        "generated {} items in {:?}",
        list.total_items(),
        start_time.elapsed()
    );

    if args.select_all {
        list.select_all();
    }
    let cart = args.add_to_cart.then(|| {
        let mut cart = Cart::new();
        let added = cart.add_selected(&list);
        log::debug!("added {added} selected items to the cart");
        cart
    });
    let guide = if args.guide {
        let guide = guide_book().lookup(&profile.destination);
        if guide.is_none() {
            log::warn!("no destination guide for {}", profile.destination);
        }
        guide
    } else {
        None
    };

    let report = ListReport {
        list_code: seed_info.list_code(),
        seed: seed_info.seed,
        list: &list,
        cart: cart.as_ref(),
        guide,
    };
    write_report(&args, &report)
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

async fn generate_list(
    args: &Args,
    source: &FileSource,
    profile: &TripProfile,
    seed_info: &SeedInfo,
) -> Result<PackingList> {
    if args.think_ms == 0 {
        let planner = TripPlanner::new(source.clone());
        return Ok(planner.plan(profile, seed_info.seed)?);
    }
    let rules = source.load_rules()?;
    let catalog = source.load_catalog()?;
    let engine = PackingEngine::new(&rules);
    Ok(generate_after(
        Duration::from_millis(args.think_ms),
        engine,
        profile,
        catalog.as_slice(),
        seed_info.seed,
    )
    .await)
}

fn maybe_list_destinations(args: &Args, source: &FileSource) -> Result<bool> {
    if !args.list_destinations {
        return Ok(false);
    }
    let rules = source.load_rules()?;
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Known destinations:")?;
    for destination in rules.destinations() {
        let marker = if guide_book().lookup(destination).is_some() {
            " (guide available)"
        } else {
            ""
        };
        writeln!(output_target.writer(), "  {destination}{marker}")?;
    }
    for guide in guide_book().iter() {
        if rules.resolve_location(&guide.key).1 {
            continue;
        }
        writeln!(output_target.writer(), "  {} (guide only)", guide.key)?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn write_report(args: &Args, report: &ListReport<'_>) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report {
        ReportFormat::Json => reports::generate_json_report(&mut output_target, report)?,
        ReportFormat::Markdown => reports::generate_markdown_report(&mut output_target, report)?,
        ReportFormat::Csv => reports::generate_csv_report(&mut output_target, report)?,
        ReportFormat::Console => {
            announce_banner(&mut output_target)?;
            reports::generate_console_report(&mut output_target, report)?;
        }
    }
    output_target.flush_inner()?;
    Ok(())
}

fn announce_banner(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{}", "🏠 Family Room Packing Assistant".bright_cyan().bold())?;
    writeln!(out, "{}", "================================".cyan())?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
