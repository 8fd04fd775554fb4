use anyhow::Context;
use clap::Parser;
use geoserver_terrain::utils::error::{ErrorSeverity, TerrainError};
use geoserver_terrain::utils::{logger, validation::Validate};
use geoserver_terrain::{
    summaries_to_json, CliConfig, GeoserverTerrainProvider, TerrainConfig, TerrainEngine,
    TerrainProvider, TileSummary,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if let Err(e) = cli.validate() {
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let config = TerrainConfig::from_file(&cli.config)
        .with_context(|| format!("failed to load config file '{}'", cli.config))?;

    if config.json_logs() {
        logger::init_json_logger(config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }

    tracing::info!("Starting geoserver-terrain");
    tracing::debug!("CLI config: {:?}", cli);

    let source = match config.build_source() {
        Ok(source) => source,
        Err(e) => exit_with(e),
    };
    tracing::info!("📁 Serving tiles from {}", source.root().display());

    let provider = GeoserverTerrainProvider::new(source, config.provider.credit.clone());
    let mut errors = provider.subscribe_errors();
    let engine = TerrainEngine::new(provider);

    let tiles = match engine.load_subtree(cli.tile_key(), cli.depth).await {
        Ok(tiles) => tiles,
        Err(e) => {
            while let Ok(event) = errors.try_recv() {
                tracing::error!("Provider reported tile {}: {}", event.key, event.message);
            }
            exit_with(e)
        }
    };

    let summaries: Vec<TileSummary> = tiles.iter().map(TileSummary::from).collect();
    if cli.json {
        match summaries_to_json(&summaries) {
            Ok(json) => println!("{}", json),
            Err(e) => exit_with(e),
        }
    } else {
        for summary in &summaries {
            println!(
                "{}  {}x{}  heights {}..{}  children {:04b}  error {:.2}",
                summary.key,
                summary.width,
                summary.height,
                summary.min_height.unwrap_or_default(),
                summary.max_height.unwrap_or_default(),
                summary.child_tile_mask,
                summary.geometric_error
            );
        }
        let credit = engine.provider().credit();
        if !credit.is_empty() {
            println!("{}", credit);
        }
    }

    Ok(())
}

fn exit_with(e: TerrainError) -> ! {
    tracing::error!(
        "❌ Terrain request failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // exit code by severity
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 4,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
