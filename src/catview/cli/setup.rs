use catview::filter::{CatalogQuery, FilterCategory, FilterSelection};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ThemeMode {
    /// Follow the terminal's light/dark setting
    #[default]
    Auto,
    Light,
    Dark,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "catview",
    bin_name = "catview",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Browse, search and filter a service catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Catalog endpoint URL or path to a catalog JSON file
    #[arg(short, long, global = true, help_heading = "Options")]
    pub source: Option<String>,

    /// Color theme
    #[arg(long, global = true, value_enum, default_value_t = ThemeMode::Auto, help_heading = "Options")]
    pub theme: ThemeMode,

    /// Disable colored output
    #[arg(long, global = true, help_heading = "Options")]
    pub no_color: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputMode::Text, help_heading = "Options")]
    pub output: OutputMode,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

/// Query and filter flags shared by every catalog command.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Case-insensitive search over name, class, kind, domain and team
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Only items of these kinds (repeat or comma-separate)
    #[arg(long, value_delimiter = ',')]
    pub kind: Vec<String>,

    /// Only items of these classes
    #[arg(long, value_delimiter = ',')]
    pub class: Vec<String>,

    /// Only items in these domains
    #[arg(long, value_delimiter = ',')]
    pub domain: Vec<String>,

    /// Only items owned by these teams
    #[arg(long, value_delimiter = ',')]
    pub team: Vec<String>,
}

impl FilterArgs {
    pub fn to_query(&self) -> CatalogQuery {
        let filters = FilterSelection::new()
            .with(FilterCategory::Kind, self.kind.iter().cloned())
            .with(FilterCategory::Class, self.class.iter().cloned())
            .with(FilterCategory::Domain, self.domain.iter().cloned())
            .with(FilterCategory::Team, self.team.iter().cloned());
        CatalogQuery::new(self.query.clone()).with_filters(filters)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List catalog items (default)
    #[command(alias = "ls", display_order = 1)]
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show the details of one item
    #[command(alias = "v", display_order = 2)]
    Show {
        /// Listing index, item id or item name
        selector: String,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show filter values with their item counts
    #[command(display_order = 3)]
    Filters {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Get or set configuration values
    #[command(display_order = 4)]
    Config {
        /// Configuration key (e.g., endpoint)
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },
}
