mod error;
mod output;
mod paths;
mod settings;

use std::fs::File;
use std::num::NonZeroUsize;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use listview_lib::config::TableConfig;
use listview_lib::config::TableConfigDocument;
use listview_lib::model::Record;
use listview_lib::presets;
use listview_lib::query::SortConfig;
use listview_lib::query::TableEvent;
use listview_lib::render::Column;
use listview_lib::render::Columns;
use listview_lib::screen::ListScreen;
use listview_lib::store::ResourceStore;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

use crate::error::CliError;
use crate::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "listview")]
#[command(about = "Filter, sort and page a JSON record list", long_about = None)]
struct Args {
    /// JSON file holding an array of records
    #[arg(short = 'r', long)]
    records: PathBuf,

    /// Table configuration document (JSON)
    #[arg(short = 'c', long, conflicts_with = "preset", required_unless_present = "preset")]
    config: Option<PathBuf>,

    /// Built-in configuration: posts, contacts, banners, users or roles
    #[arg(short = 'p', long)]
    preset: Option<String>,

    /// Columns to show, comma separated (default: the preset's, else every field)
    #[arg(long, value_delimiter = ',')]
    columns: Vec<String>,

    /// Filter value, repeatable
    #[arg(short = 'f', long = "filter", value_name = "KEY=VALUE", value_parser = parse_filter)]
    filters: Vec<(String, String)>,

    /// Sort as KEY-asc or KEY-desc
    #[arg(short = 's', long, value_name = "KEY-DIR")]
    sort: Option<String>,

    /// Page to show (1-indexed)
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Rows per page (default: settings, else 10)
    #[arg(long)]
    per_page: Option<NonZeroUsize>,

    /// Render the loading placeholder instead of rows
    #[arg(long)]
    loading: bool,

    /// Log at debug level
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn parse_filter(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode, CliError> {
    let settings = match paths::settings_file() {
        Some(path) => Settings::load(&path)?,
        None => Settings::default(),
    };

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        settings.level_filter()
    };
    init_logging(level)?;
    log::info!("listview starting");

    let (config, preset_columns) = load_config(&args)?;
    let records = load_records(&args.records);
    let columns = match preset_columns {
        Some(columns) if args.columns.is_empty() => columns,
        _ => build_columns(&args.columns, records.as_ref().ok().map(Vec::as_slice))?,
    };

    let mut screen = ListScreen::new(ResourceStore::new(resource_name(&args)), config, columns)
        .with_empty_message(settings.empty_message.clone())
        .with_items_per_page(args.per_page.unwrap_or(settings.items_per_page));

    screen.load_started();
    match records {
        Ok(records) => screen.load_succeeded(records),
        Err(e) => screen.load_failed(e.to_string()),
    }
    if args.loading {
        screen.load_started();
    }

    for (key, value) in args.filters {
        screen.handle(TableEvent::FilterChanged { key, value });
    }
    if let Some(sort) = args.sort {
        if SortConfig::parse(&sort).is_none() {
            return Err(CliError::InvalidSort(sort));
        }
        screen.handle(TableEvent::SortSelected(sort));
    }
    screen.handle(TableEvent::PageChanged(args.page));

    let failed = screen.error_panel();
    if let Some(panel) = &failed {
        println!("{}", output::error_panel(panel));
    }
    println!("{}", output::filter_bar(&screen.filter_bar()));
    println!("{}", output::table(&screen.table_view()));

    Ok(if failed.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn init_logging(level: LevelFilter) -> Result<(), CliError> {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| CliError::read(dir, e))?;
    }
    let file = File::create(&path).map_err(|e| CliError::read(&path, e))?;
    WriteLogger::init(level, Config::default(), file).map_err(|e| CliError::Logger(e.to_string()))
}

fn resource_name(args: &Args) -> String {
    match (&args.preset, &args.config) {
        (Some(name), _) => name.clone(),
        (None, Some(path)) => path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
        (None, None) => String::new(),
    }
}

fn load_config(args: &Args) -> Result<(TableConfig, Option<Columns>), CliError> {
    if let Some(name) = &args.preset {
        let (config, columns) = presets::by_name(name).ok_or_else(|| CliError::UnknownPreset {
            name: name.clone(),
            expected: presets::PRESET_NAMES.join(", "),
        })?;
        return Ok((config, Some(columns)));
    }

    let path = args.config.as_deref().ok_or(CliError::MissingConfig)?;
    let json = std::fs::read_to_string(path).map_err(|e| CliError::read(path, e))?;
    let config = TableConfigDocument::from_json(&json)?.resolve(&presets::registry())?;
    Ok((config, None))
}

fn load_records(path: &Path) -> Result<Vec<Record>, CliError> {
    let json = std::fs::read_to_string(path).map_err(|e| CliError::read(path, e))?;
    let records: Vec<Record> = serde_json::from_str(&json).map_err(|e| CliError::json(path, e))?;
    log::debug!("read {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Columns named on the command line, else every field of the first record.
fn build_columns(keys: &[String], records: Option<&[Record]>) -> Result<Columns, CliError> {
    let keys: Vec<String> = if keys.is_empty() {
        records
            .and_then(|r| r.first())
            .map(|first| first.fields().keys().cloned().collect())
            .unwrap_or_default()
    } else {
        keys.to_vec()
    };
    Ok(Columns::new(keys.into_iter().map(|key| {
        let header = key.replace('_', " ");
        Column::new(key, header)
    }))?)
}
