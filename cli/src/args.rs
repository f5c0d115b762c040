use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use tiletrans_engine::{Dimensions, EngineConfig};

use crate::error::CliError;
use crate::parsers::{ElementOptions, RemainderOptions};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Rows of the streamed matrix.
    #[arg(short, long, default_value_t = 256)]
    pub rows: usize,

    /// Columns of the streamed matrix.
    #[arg(short, long, default_value_t = 256)]
    pub cols: usize,

    /// Edge length of a square tile.
    #[arg(short, long)]
    pub tile_size: Option<usize>,

    /// Widest matrix the tile buffers are sized for.
    #[arg(short, long)]
    pub max_cols: Option<usize>,

    /// Handling of dimensions that are not tile multiples.
    #[arg(long, ignore_case = true, value_enum)]
    pub remainder: Option<RemainderOptions>,

    /// Element format to stream.
    #[arg(short, long, ignore_case = true, value_enum, default_value_t = ElementOptions::ComplexF32)]
    pub element: ElementOptions,

    /// Capacity of the channel between the producer thread and the engine.
    #[arg(short, long, default_value_t = 2048)]
    pub pipe_depth: usize,

    /// JSON file holding an engine configuration. Flags override its fields.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.rows, self.cols)
    }

    /// The configuration file, if any, overlaid with the flags given on the command line.
    pub fn engine_config(&self) -> Result<EngineConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => EngineConfig::default(),
        };
        if let Some(tile_size) = self.tile_size {
            config.tile_size = tile_size;
        }
        if let Some(max_cols) = self.max_cols {
            config.max_cols = max_cols;
        }
        if let Some(remainder) = self.remainder {
            config.remainder = remainder.into();
        }
        Ok(config)
    }
}

pub fn load_config(path: &Path) -> Result<EngineConfig, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&text)
}

/// Missing fields take their defaults.
pub fn parse_config(text: &str) -> Result<EngineConfig, CliError> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use tiletrans_engine::RemainderPolicy;

    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["tiletrans"]).unwrap();
        assert_eq!(args.dimensions(), Dimensions::new(256, 256));
        assert_eq!(args.element, ElementOptions::ComplexF32);
        assert_eq!(args.engine_config().unwrap(), EngineConfig::default());
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "tiletrans", "-r", "64", "-c", "48", "-t", "16", "--max-cols", "64", "--remainder",
            "clamp", "-e", "u32",
        ])
        .unwrap();
        assert_eq!(args.dimensions(), Dimensions::new(64, 48));
        assert_eq!(args.element, ElementOptions::U32);
        assert_eq!(
            args.engine_config().unwrap(),
            EngineConfig::new(16, 64).with_remainder(RemainderPolicy::PartialTiles)
        );
    }

    #[test]
    fn config_file_is_overlaid() {
        let path = std::env::temp_dir().join(format!("tiletrans-{}.json", std::process::id()));
        fs::write(&path, r#"{"tile_size": 8, "max_cols": 512}"#).unwrap();

        let path_arg = path.to_str().unwrap();
        let args =
            Args::try_parse_from(["tiletrans", "--config", path_arg, "-t", "4"]).unwrap();
        let config = args.engine_config();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.unwrap(), EngineConfig::new(4, 512));
    }

    #[test]
    fn bad_config_is_reported() {
        assert!(matches!(
            parse_config(r#"{"tile_size": "wide"}"#),
            Err(CliError::ParseConfig(_))
        ));
        let missing = Path::new("/nonexistent/tiletrans.json");
        assert!(matches!(
            load_config(missing),
            Err(CliError::ReadConfig { .. })
        ));
    }
}
