//! CLI command implementations
//!
//! Every command loads the config first (which also sets the log level),
//! then the dataset if it needs one. Output goes to the writer passed in;
//! logs go to stderr.

use std::io::{self, BufRead, Write};
use std::path::Path;

use serde_json::json;

use crate::executor::{QueryEngine, ResultPage};
use crate::observability::{
    log_event_with_fields, Event, Logger, MetricsRegistry, ObservationScope,
};
use crate::planner::{alias_listing, ExplainPlan, PageRequest, PageSize, QueryParser, SortSpec};
use crate::schema::{Dataset, DatasetLoader, FieldResolver, Metric};

use super::args::{Cli, Command, QueryArgs};
use super::config::{Config, OutputFormat};
use super::errors::{CliError, CliResult};
use super::io::{read_requests, write_json_line, write_response, write_text};
use super::render::{render_fields, render_page};
use super::session::ScreenSession;

/// Main entry point for CLI
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run a specific command against stdin/stdout
pub fn run_command(cmd: Command) -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cmd {
        Command::Query(args) => query(&args, &mut out),
        Command::Explain {
            config,
            query,
            format,
        } => explain(config.as_deref(), &query, format, &mut out),
        Command::Fields { config, format } => fields(config.as_deref(), format, &mut out),
        Command::Start { config, data } => {
            start(config.as_deref(), data.as_deref(), io::stdin().lock(), &mut out)
        }
    }
}

/// Execute a single query and exit
///
/// Without `--query` every record is listed. Query text, blank included, goes
/// through the parser; a rejected query is returned as an error so the
/// process exits non-zero.
pub fn query<W: Write>(args: &QueryArgs, out: &mut W) -> CliResult<()> {
    let config = load_config(args.config.as_deref())?;

    if args.page == 0 {
        return Err(CliError::invalid_argument("page must be at least 1"));
    }
    let size = match args.page_size {
        Some(n) => PageSize::try_from(n).map_err(CliError::invalid_argument)?,
        None => config.default_page_size,
    };
    let sort = match &args.sort {
        Some(name) => {
            let metric = resolve_sort_field(name)?;
            if args.desc {
                SortSpec::desc(metric)
            } else {
                SortSpec::asc(metric)
            }
        }
        None => SortSpec::none(),
    };

    let dataset = load_dataset(config.dataset_path(args.data.as_deref())?)?;
    let request = PageRequest::new(args.page, size);

    let text = args.query.as_deref();
    let page = match text {
        Some(text) => match QueryEngine::execute(&dataset, text, &sort, request) {
            Ok(page) => page,
            Err(err) => {
                log_event_with_fields(
                    Event::QueryRejected,
                    &[("code", err.code().code()), ("query", text)],
                );
                return Err(err.into());
            }
        },
        None => QueryEngine::execute_conditions(&dataset, &[], &sort, request),
    };

    log_executed(&page);

    match args.format.unwrap_or(config.output_format) {
        OutputFormat::Json => write_response(
            out,
            json!({
                "query": text,
                "sort": sort,
                "total_pages": page.total_pages(),
                "summary": page.summary(),
                "window": page.window(),
                "result": page,
            }),
        ),
        OutputFormat::Table => write_text(out, &render_page(&page)),
    }
}

/// Explain a query and exit
///
/// A rejected query is part of the explain output, not a command failure.
pub fn explain<W: Write>(
    config_path: Option<&Path>,
    query: &str,
    format: Option<OutputFormat>,
    out: &mut W,
) -> CliResult<()> {
    let config = load_config(config_path)?;

    let plan = match QueryParser::parse(query) {
        Ok(parsed) => ExplainPlan::from_query(&parsed),
        Err(err) => ExplainPlan::from_error(&err),
    };

    match format.unwrap_or(config.output_format) {
        OutputFormat::Json => write_response(out, serde_json::to_value(&plan)?),
        OutputFormat::Table => write_text(out, &plan.to_string()),
    }
}

/// List the accepted field aliases
pub fn fields<W: Write>(
    config_path: Option<&Path>,
    format: Option<OutputFormat>,
    out: &mut W,
) -> CliResult<()> {
    let config = load_config(config_path)?;
    let listing = alias_listing();

    match format.unwrap_or(config.output_format) {
        OutputFormat::Json => {
            let data: Vec<_> = listing
                .iter()
                .map(|(field, column, aliases)| {
                    json!({ "field": field, "column": column, "aliases": aliases })
                })
                .collect();
            write_response(out, json!(data))
        }
        OutputFormat::Table => write_text(out, &render_fields(&listing)),
    }
}

/// Run a session: one JSON request per input line, one response per line.
///
/// Bad requests get an error response and the session continues; only an
/// I/O failure ends it early.
pub fn start<R: BufRead, W: Write>(
    config_path: Option<&Path>,
    data: Option<&Path>,
    input: R,
    out: &mut W,
) -> CliResult<()> {
    let config = load_config(config_path)?;
    let dataset = load_dataset(config.dataset_path(data)?)?;

    let metrics = MetricsRegistry::new();
    let mut session = ScreenSession::new(&dataset.records, config.default_page_size, &metrics);

    let records = dataset.len().to_string();
    let page_size = config.default_page_size.to_string();
    log_event_with_fields(
        Event::SessionStart,
        &[("page_size", page_size.as_str()), ("records", records.as_str())],
    );

    for line in read_requests(input) {
        let line = line?;
        let response = session.handle_line(&line);
        write_json_line(out, &response)?;
    }

    let counters = metrics.snapshot().log_fields();
    let fields: Vec<(&str, &str)> = counters.iter().map(|(k, v)| (*k, v.as_str())).collect();
    log_event_with_fields(Event::SessionEnd, &fields);

    Ok(())
}

/// Load config, apply its log level, and log CONFIG_LOADED
fn load_config(path: Option<&Path>) -> CliResult<Config> {
    let config = Config::load_or_default(path)?;
    Logger::set_min_severity(config.severity()?);

    let source = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    let page_size = config.default_page_size.to_string();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("page_size", page_size.as_str()), ("source", source.as_str())],
    );

    Ok(config)
}

/// Load and validate the dataset inside a DATASET_LOAD scope. A rejected
/// file is reported once, on the scope's FAILED line.
fn load_dataset(path: &Path) -> CliResult<Dataset> {
    let shown = path.display().to_string();
    let scope = ObservationScope::with_fields("DATASET_LOAD", &[("path", shown.as_str())]);

    match DatasetLoader::load_file(path) {
        Ok(dataset) => {
            let records = dataset.len().to_string();
            let checksum = dataset.checksum_hex();
            let loaded_at = dataset.loaded_at.to_rfc3339();
            scope.complete_with_fields(&[("records", records.as_str())]);
            log_event_with_fields(
                Event::DatasetLoaded,
                &[
                    ("checksum", checksum.as_str()),
                    ("loaded_at", loaded_at.as_str()),
                    ("path", shown.as_str()),
                    ("records", records.as_str()),
                ],
            );
            Ok(dataset)
        }
        Err(err) => {
            let reason = err.to_string();
            scope.fail_with_fields(&[("code", err.code().code()), ("reason", reason.as_str())]);
            Err(err.into())
        }
    }
}

fn log_executed(page: &ResultPage) {
    let matches = page.total_matches.to_string();
    let scanned = page.scanned_count.to_string();
    let page_no = page.page.to_string();
    log_event_with_fields(
        Event::QueryExecuted,
        &[
            ("matches", matches.as_str()),
            ("page", page_no.as_str()),
            ("scanned", scanned.as_str()),
        ],
    );
}

fn resolve_sort_field(name: &str) -> CliResult<Metric> {
    FieldResolver::resolve_column(name).map_err(|miss| {
        CliError::invalid_argument(format!(
            "Cannot sort by '{}'. Sortable fields are: {}",
            miss.alias,
            miss.known.join(", ")
        ))
    })
}
