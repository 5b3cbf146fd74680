use nethys_oracle::config::AppConfig;
use nethys_oracle::core::nethys::{Category, ReferenceService};

const USAGE: &str = "usage: nethys-oracle <spell|item|feat|weapon> <name...>";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load();
    let _log_guard = nethys_oracle::core::logging::init(&config);
    log::debug!("{} v{} starting", nethys_oracle::NAME, nethys_oracle::VERSION);

    let mut args = std::env::args().skip(1);
    let category: Category = match args.next() {
        Some(arg) => arg.parse()?,
        None => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };

    let name = args.collect::<Vec<_>>().join(" ");
    if name.trim().is_empty() {
        eprintln!("{USAGE}");
        std::process::exit(2);
    }

    let service = ReferenceService::from_config(&config.search)?;
    let record = service.search(category, &name).await;

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
