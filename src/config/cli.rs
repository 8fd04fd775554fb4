use crate::domain::model::TileKey;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "geoserver-terrain")]
#[command(about = "Serve GeoServer heightmap tiles through the terrain provider")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "terrain.toml")]
    pub config: String,

    #[arg(long, default_value = "0")]
    pub x: u32,

    #[arg(long, default_value = "0")]
    pub y: u32,

    #[arg(long, default_value = "0")]
    pub level: u32,

    /// Also load available descendants this many levels down
    #[arg(long, default_value = "0")]
    pub depth: u32,

    #[arg(long, help = "Print tile summaries as JSON")]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn tile_key(&self) -> TileKey {
        TileKey::new(self.x, self.y, self.level)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("config", &self.config)?;
        validation::validate_range("level", self.level, 0, 30)?;
        validation::validate_range("depth", self.depth, 0, 8)?;
        Ok(())
    }
}
