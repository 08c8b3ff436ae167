//! # deskwm - Desktop Window Manager
//!
//! Headless driver for the deskwm core. Loads configuration, optionally
//! replays a JSON session script and prints the resulting desktop as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error, info};

use deskwm::{replay, DeskConfig, Desktop, Script, BUILD_DATE, VERSION};

#[derive(Parser)]
#[command(name = "deskwm")]
#[command(about = "Window manager core for a simulated desktop: stacking, drag and resize")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "~/.config/deskwm/deskwm.toml")]
    config: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Replay a JSON session script before printing the desktop
    #[arg(short, long)]
    script: Option<String>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    info!("🚀 Starting deskwm - Desktop Window Manager");
    info!("📄 Version: {} (built {})", VERSION, BUILD_DATE);
    debug!(
        "Target {} at commit {}",
        env!("TARGET_TRIPLE"),
        option_env!("GIT_COMMIT").unwrap_or("unknown")
    );

    // Load configuration
    let mut config = match DeskConfig::load(&cli.config) {
        Ok(config) => {
            info!("✅ Configuration loaded from: {}", cli.config);
            config
        }
        Err(e) => {
            error!("❌ Failed to load configuration: {}", e);
            info!("📝 Using default configuration");
            DeskConfig::default()
        }
    };
    if cli.debug {
        config.general.debug = true;
    }

    if cli.print_config {
        let contents =
            toml::to_string_pretty(&config).context("Failed to serialize configuration")?;
        println!("{}", contents);
        return Ok(());
    }

    let mut desktop = Desktop::new(config);

    if let Some(path) = &cli.script {
        let script =
            Script::load(path).with_context(|| format!("Failed to load script: {}", path))?;
        let summary = replay(&mut desktop, &script)
            .with_context(|| format!("Failed to replay script: {}", path))?;
        if summary.skipped > 0 {
            info!("⏭️ {} script events referenced unknown windows", summary.skipped);
        }
    }

    let snapshot = desktop.snapshot();
    let json = serde_json::to_string_pretty(&snapshot).context("Failed to serialize desktop")?;
    println!("{}", json);

    info!("✅ deskwm finished with {} open windows", desktop.windows().len());
    Ok(())
}
