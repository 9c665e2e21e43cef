//! CLI parser and command dispatch.

mod commands;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, CommandFactory, Parser, Subcommand};

use serpage::config::{load_settings_with_options, LoadOptions};
use serpage::models::{SafeSearch, SearchQuery, TimeWindow};

#[derive(Parser)]
#[command(name = "serpage")]
#[command(about = "Paginate search engine results and extract result links")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true, env = "SERPAGE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Print unique result links, one per line, as pages are fetched
    Search(SearchArgs),

    /// Collect every result category across pages and print JSON
    Report(SearchArgs),

    /// Start the JSON search server
    Serve {
        /// Address to bind to: PORT, HOST, or HOST:PORT (default: 127.0.0.1:8000)
        #[arg(default_value = "127.0.0.1:8000")]
        bind: String,
    },
}

/// Options shared by the search commands.
#[derive(Args, Debug)]
struct SearchArgs {
    /// Query words (joined with spaces)
    query: Vec<String>,

    /// Top level domain to use
    #[arg(long, default_value = "com")]
    tld: String,

    /// Produce results in the given language
    #[arg(long, default_value = "en")]
    lang: String,

    /// Produce results from period
    #[arg(long, value_enum, default_value = "any")]
    tbs: TimeWindow,

    /// Kids safe search
    #[arg(long, value_enum, default_value = "off")]
    safe: SafeSearch,

    /// Number of results per page
    #[arg(long, default_value = "10")]
    num: u32,

    /// First result to retrieve
    #[arg(long, default_value = "0")]
    start: u32,

    /// Last result to retrieve (0 = unlimited)
    #[arg(long)]
    stop: Option<u32>,

    /// Pause between HTTP requests in seconds
    #[arg(long, default_value = "2.0")]
    pause: f64,

    /// Grab all possible links from result pages
    #[arg(long)]
    all: bool,
}

impl SearchArgs {
    /// Build the query, printing usage and exiting with status 2 if no query
    /// words were given.
    fn into_query(self, subcommand: &str) -> anyhow::Result<SearchQuery> {
        let text = self.query.join(" ");
        if text.trim().is_empty() {
            let mut cmd = Cli::command();
            if let Some(sub) = cmd.find_subcommand_mut(subcommand) {
                let _ = sub.print_help();
            }
            std::process::exit(2);
        }

        let pause = Duration::try_from_secs_f64(self.pause)
            .map_err(|e| anyhow::anyhow!("Invalid pause {}: {}", self.pause, e))?;

        Ok(SearchQuery::new(text)
            .tld(&self.tld)
            .lang(&self.lang)
            .time_window(self.tbs)
            .safe(self.safe)
            .num(self.num)
            .start(self.start)
            .stop(self.stop)
            .pause(pause)
            .only_standard(!self.all))
    }
}

/// Parse arguments and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
    };
    let (settings, _config) = load_settings_with_options(options).await;

    match cli.command {
        Commands::Search(args) => {
            let query = args.into_query("search")?;
            commands::search::cmd_search(&settings, query).await
        }
        Commands::Report(args) => {
            let query = args.into_query("report")?;
            commands::report::cmd_report(&settings, query).await
        }
        Commands::Serve { bind } => commands::serve::cmd_serve(&settings, &bind).await,
    }
}
