//! # CLI Layer
//!
//! The CLI layer is the **only** place in catview that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs the tracing subscriber
//! - Decides whether output is colored
//! - Formats output for human consumption
//!
//! Every catalog command follows the same path: resolve the location, open a
//! source, load once, call the facade, render the [`CmdResult`].

use super::render::Renderer;
use super::setup::{Cli, Commands, FilterArgs, OutputMode, ThemeMode};
use super::styles::resolve_theme;
use catview::api::{self, CatalogApi, CmdResult, ConfigAction};
use catview::config::{CatviewConfig, CONFIG_DIR_ENV, ENDPOINT_ENV};
use catview::error::{CatalogError, Result};
use catview::source::{CatalogSource, SourceSpec};
use clap::Parser;
use console::Term;
use directories::ProjectDirs;
use once_cell::sync::OnceCell;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Output choices made at startup; `report_error` reads them after `run` fails.
#[derive(Debug, Clone, Copy, Default)]
struct OutputSettings {
    theme: ThemeMode,
    no_color: bool,
    output: OutputMode,
}

static OUTPUT: OnceCell<OutputSettings> = OnceCell::new();

struct AppContext {
    api: CatalogApi<Box<dyn CatalogSource>>,
    renderer: Renderer,
    output: OutputMode,
}

pub async fn run() -> Result<()> {
    let mut cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = OutputSettings {
        theme: cli.theme,
        no_color: cli.no_color,
        output: cli.output,
    };
    let _ = OUTPUT.set(settings);

    let command = cli.command.take().unwrap_or(Commands::List {
        filters: FilterArgs::default(),
    });

    match command {
        Commands::Config { key, value } => handle_config(&config_dir()?, key, value, settings),
        Commands::List { filters } => {
            let ctx = init_context(&cli, settings).await?;
            let result = ctx.api.list(&filters.to_query())?;
            print_result(&ctx, &result, |r| {
                ctx.renderer.render_list(&r.listed_items, r.total)
            })
        }
        Commands::Show { selector, filters } => {
            let ctx = init_context(&cli, settings).await?;
            let result = ctx.api.show(&filters.to_query(), &selector)?;
            print_result(&ctx, &result, |r| match &r.selected {
                Some(item) => ctx.renderer.render_detail(item),
                None => String::new(),
            })
        }
        Commands::Filters { filters } => {
            let ctx = init_context(&cli, settings).await?;
            let result = ctx.api.facets(&filters.to_query())?;
            print_result(&ctx, &result, |r| {
                ctx.renderer
                    .render_facets(&r.facets, r.listed_items.len(), r.total)
            })
        }
    }
}

/// Formats an error from [`run`] for stderr.
pub fn report_error(err: &CatalogError) -> String {
    let settings = OUTPUT.get().copied().unwrap_or_default();
    let use_color = !settings.no_color && Term::stderr().features().colors_supported();
    Renderer::new(resolve_theme(settings.theme), use_color).render_error(err)
}

/// Logs go to stderr so they never mix with rendered output.
///
/// `RUST_LOG` wins when set; otherwise `-v` enables debug logs for catview and
/// the default is warnings only.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "catview=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "catview", "catview")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| CatalogError::Config("Could not determine config directory".into()))
}

/// The config file is only read when neither the flag nor the environment
/// names a location, so `--source` works without a config directory.
fn resolve_location<F>(
    flag: Option<&str>,
    env_value: Option<&str>,
    config_dir: F,
) -> Result<String>
where
    F: FnOnce() -> Result<PathBuf>,
{
    let explicit = [flag, env_value]
        .into_iter()
        .flatten()
        .any(|v| !v.trim().is_empty());
    let config = if explicit {
        CatviewConfig::default()
    } else {
        CatviewConfig::load(config_dir()?)?
    };
    Ok(config.resolve_location(flag, env_value))
}

async fn init_context(cli: &Cli, settings: OutputSettings) -> Result<AppContext> {
    let env_value = std::env::var(ENDPOINT_ENV).ok();
    let location = resolve_location(cli.source.as_deref(), env_value.as_deref(), config_dir)?;
    let spec = SourceSpec::parse(&location);
    tracing::debug!(location = %spec, "resolved catalog location");

    let mut api = CatalogApi::new(spec.open()?);
    let loading = LoadingIndicator::show();
    let loaded = api.load().await;
    loading.clear();
    loaded?;

    let use_color = !settings.no_color && Term::stdout().features().colors_supported();
    Ok(AppContext {
        api,
        renderer: Renderer::new(resolve_theme(settings.theme), use_color),
        output: settings.output,
    })
}

fn print_result<F>(ctx: &AppContext, result: &CmdResult, render: F) -> Result<()>
where
    F: FnOnce(&CmdResult) -> String,
{
    match ctx.output {
        OutputMode::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputMode::Text => {
            print!("{}", render(result));
            print!("{}", ctx.renderer.render_messages(&result.messages));
        }
    }
    Ok(())
}

fn handle_config(
    config_dir: &std::path::Path,
    key: Option<String>,
    value: Option<String>,
    settings: OutputSettings,
) -> Result<()> {
    let action = match (key, value) {
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
        (Some(key), None) => ConfigAction::ShowKey(key),
        (None, _) => ConfigAction::ShowAll,
    };
    let result = api::config(config_dir, action)?;

    if settings.output == OutputMode::Json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if result.messages.is_empty() {
        if let Some(config) = &result.config {
            println!("endpoint = {}", config.endpoint);
        }
    }
    let use_color = !settings.no_color && Term::stdout().features().colors_supported();
    let renderer = Renderer::new(resolve_theme(settings.theme), use_color);
    print!("{}", renderer.render_messages(&result.messages));
    Ok(())
}

/// "Loading catalog data..." on stderr while the fetch runs, interactive only.
struct LoadingIndicator {
    term: Option<Term>,
}

impl LoadingIndicator {
    fn show() -> Self {
        let term = Term::stderr();
        if !term.is_term() {
            return Self { term: None };
        }
        let shown = term.write_str("Loading catalog data...").is_ok();
        Self {
            term: shown.then_some(term),
        }
    }

    fn clear(self) {
        if let Some(term) = self.term {
            let _ = term.clear_line();
        }
    }
}
