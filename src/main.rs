use color_eyre::eyre::Result;
use crewsync_report::config::ReportConfig;
use dotenv::dotenv;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ReportConfig::from_env()?;

    // Initialize logging on stderr so stdout carries only the report
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Evaluate the snapshot
    let report = crewsync_report::run(&config)?;
    println!("{report}");

    Ok(())
}
