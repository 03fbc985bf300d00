use std::path::PathBuf;

use replay::{load_legs, run};
use stepmatch::{MatchProfileConfig, SymbolLoader, TracingSink, init_logging};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        eprintln!(
            "usage: match_legs <symbols.yaml|json> <symbol> <legs.csv> [profile.yaml|json]"
        );
        std::process::exit(2);
    }

    init_logging();

    let symbols = SymbolLoader::load(PathBuf::from(&args[1]))?;
    let code = args[2].clone();
    let symbol = symbols
        .get(&code)
        .ok_or_else(|| format!("symbol {code} not found in {}", args[1]))?;
    let rows = load_legs(PathBuf::from(&args[3]))?;
    let config = match args.get(4) {
        Some(path) => MatchProfileConfig::load(PathBuf::from(path))?.resolve(&code),
        None => MatchProfileConfig::default().resolve(&code),
    };

    tracing::info!(
        symbol = %code,
        rows = rows.len(),
        tick_size = symbol.tick_size,
        "matching legs"
    );

    let reports = run(symbol, &config, &rows, &TracingSink);
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    for report in &reports {
        writer.serialize(report)?;
    }
    writer.flush()?;
    Ok(())
}
