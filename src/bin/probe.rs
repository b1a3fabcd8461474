use std::process::ExitCode;

use clap::Parser;
use stats_probe::{
    config::{Overrides, ProbeConfig},
    monitors::poller::Poller,
};
use tracing::{level_filters::LevelFilter, trace};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Parser)]
#[command(version, about = "Poll a stats endpoint and warn about exceeded limits")]
struct Args {
    /// JSON config file
    #[arg(short)]
    file: Option<String>,

    #[command(flatten)]
    overrides: Overrides,

    /// Poll a single time and exit with the result
    #[arg(long)]
    once: bool,

    /// Log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init(verbose: u8) {
    dotenv::dotenv().ok();

    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = filter::Targets::new().with_target("stats_probe", level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .compact()
                .with_ansi(false),
        )
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    init(args.verbose);
    trace!("started with args: {args:?}");

    let config = ProbeConfig::load(args.file.as_deref(), &args.overrides)?;
    let mut poller = Poller::new(config, std::io::stdout())?;

    if args.once {
        let success = poller.poll_once().await?;
        return Ok(if success {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    poller.run().await?;

    Ok(ExitCode::SUCCESS)
}
