//! Terrain spatial-reference tool.
//!
//! Inspects raster projection metadata, projects geographic rasters and
//! converts coordinates between local, world and spherical space.

use anyhow::Result;
use clap::{Parser, Subcommand};
use nalgebra::Vector3;
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use srs_tool::{commands, Space, ToolConfig};

#[derive(Parser, Debug)]
#[command(name = "srs-tool")]
#[command(about = "Projection metadata and coordinate conversion for terrain rasters")]
struct Args {
    /// Log level (overrides SRS_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit JSON logs
    #[arg(long, global = true)]
    json_logs: bool,

    /// Globe for metadata files that do not name one (overrides SRS_DEFAULT_GLOBE)
    #[arg(long, global = true)]
    globe: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print metadata, spec strings, bounds and resolution
    Info {
        /// Metadata file (.properties, .json, .yaml)
        file: PathBuf,
    },

    /// Project a geographic raster and save its new placement
    Project {
        /// Metadata file (.properties, .json, .yaml)
        file: PathBuf,

        /// Write here instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert a coordinate between spaces
    Convert {
        /// Metadata file (.properties, .json, .yaml)
        file: PathBuf,

        #[arg(long, value_enum)]
        from: Space,

        #[arg(long, value_enum)]
        to: Space,

        #[arg(allow_hyphen_values = true)]
        x: f64,

        #[arg(allow_hyphen_values = true)]
        y: f64,

        #[arg(allow_hyphen_values = true, default_value_t = 0.0)]
        z: f64,
    },
}

fn init_logging(config: &ToolConfig) -> Result<()> {
    let level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if config.json_logs {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = ToolConfig::from_env().with_overrides(args.globe, args.log_level, args.json_logs);
    init_logging(&config)?;
    debug!(?config, "Loaded configuration");

    match args.command {
        Command::Info { file } => {
            print!("{}", commands::info(&file, &config.default_globe)?);
        }
        Command::Project { file, output } => {
            let metadata = commands::project(&file, output.as_deref(), &config.default_globe)?;
            let tie = metadata.tie_point();
            let scale = metadata.scale();
            println!("Projection: {}", metadata.transform_name());
            println!("TiePoint: {}, {}, {}", tie.x, tie.y, tie.z);
            println!("Scale: {}, {}, {}", scale.x, scale.y, scale.z);
        }
        Command::Convert {
            file,
            from,
            to,
            x,
            y,
            z,
        } => {
            let out = commands::convert(
                &file,
                from,
                to,
                Vector3::new(x, y, z),
                &config.default_globe,
            )?;
            println!("{} {} {}", out.x, out.y, out.z);
        }
    }

    Ok(())
}
