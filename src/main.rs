use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use flight_scout::config::{BrowserBuilder, DEFAULT_RESULTS_PATH};
use flight_scout::{request, run, Reporter, ResultStore, RunSeparator, ScrapeConfig};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "flight-scout")]
#[command(about = "Fetch the first few flights for a route and date")]
#[command(version)]
struct Cli {
    /// ORIGIN DESTINATION DATE (YYYY-MM-DD). Prompted for when omitted.
    #[arg(value_name = "ROUTE", num_args = 0..=3)]
    route: Vec<String>,

    /// Number of result rows to read from the top of the page
    #[arg(long, default_value_t = 3)]
    max_rows: usize,

    /// File the results are appended to
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_RESULTS_PATH)]
    output: PathBuf,

    /// Write a newline after each run's JSON payload
    #[arg(long)]
    newline_delimited: bool,

    /// Show the browser window
    #[arg(long)]
    headed: bool,

    /// Chrome/Chromium executable to launch
    #[arg(long, value_name = "PATH")]
    chrome_path: Option<String>,

    /// Page load timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 100)]
    navigation_timeout: u64,

    /// Seconds to wait for the first flight row to render
    #[arg(long, value_name = "SECS", default_value_t = 50)]
    ready_timeout: u64,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn scrape_config(&self) -> ScrapeConfig {
        ScrapeConfig {
            max_rows: self.max_rows,
            navigation_timeout: Duration::from_secs(self.navigation_timeout),
            ready_timeout: Duration::from_secs(self.ready_timeout),
            results_path: self.output.clone(),
            separator: if self.newline_delimited {
                RunSeparator::Newline
            } else {
                RunSeparator::None
            },
            ..ScrapeConfig::default()
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let request = match request::acquire(&cli.route, io::stdin().lock(), io::stdout()) {
        Ok(request) => request,
        Err(err) => {
            println!("{err}");
            std::process::exit(1);
        }
    };
    info!(
        origin = request.origin(),
        destination = request.destination(),
        date = %request.date(),
        "search accepted"
    );

    let config = cli.scrape_config();
    let mut builder = BrowserBuilder::new().headless(!cli.headed);
    if let Some(path) = &cli.chrome_path {
        builder = builder.chrome_path(path);
    }
    let browser = builder.build().await?;

    let store = ResultStore::from_config(&config);
    let mut reporter = Reporter::stdout();
    run::execute(browser, &request, &config, &store, &mut reporter).await?;
    Ok(())
}
