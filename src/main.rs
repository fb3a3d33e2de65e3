use anyhow::{Context, Result, bail};
use std::rc::Rc;

use vp9vod::cli::{self, Commands};
use vp9vod::config::{Config, ConfigFile};
use vp9vod::engine::{
    ProfileRegistry, QualityTier, Resolution, TracingDiagnostics, VideoJobOptions, Vp9VodPlugin,
};

fn init_tracing(verbose: bool) {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn activate(config_file: ConfigFile, registry: &mut ProfileRegistry) -> Vp9VodPlugin<ConfigFile> {
    let identity = config_file.config().profile.clone();
    Vp9VodPlugin::register_with(identity, config_file, registry, Rc::new(TracingDiagnostics))
}

fn main() -> Result<()> {
    let cli = cli::parse();
    init_tracing(cli.verbose);

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::config_path()?,
    };

    match cli.command {
        Commands::Build {
            resolution,
            fps,
            json,
        } => {
            if !(fps.is_finite() && fps > 0.0) {
                bail!("Frame rate must be a positive number, got {}", fps);
            }

            let mut registry = ProfileRegistry::new();
            let plugin = activate(ConfigFile::open(&config_path)?, &mut registry);
            let identity = plugin.identity().clone();

            let job = VideoJobOptions::new(resolution, fps);
            let profile = registry
                .build(&identity.encoder, &identity.name, &job)
                .with_context(|| format!("Profile '{}' is not registered", identity.name))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            } else {
                for option in profile.to_strings() {
                    println!("{}", option);
                }
            }

            plugin.unregister(&mut registry);
        }

        Commands::Settings => {
            let mut registry = ProfileRegistry::new();
            let plugin = activate(ConfigFile::open(&config_path)?, &mut registry);
            print!("{}", toml::to_string_pretty(&plugin.settings())?);
            plugin.unregister(&mut registry);
        }

        Commands::Set { name, value } => {
            let mut registry = ProfileRegistry::new();
            let mut plugin = activate(ConfigFile::open(&config_path)?, &mut registry);

            plugin
                .save_setting(name, &value)
                .with_context(|| format!("Failed to save {}", name))?;
            tracing::info!("Saved {} to {}", name, plugin.backend().path().display());

            print!("{}", toml::to_string_pretty(&plugin.settings())?);
            plugin.unregister(&mut registry);
        }

        Commands::Table { quality } => print_table(quality),

        Commands::InitConfig => {
            if Config::ensure_default(&config_path)? {
                println!("Created default config: {}", config_path.display());
            } else {
                println!("Config already exists: {}", config_path.display());
            }
        }
    }

    Ok(())
}

fn print_table(quality: QualityTier) {
    println!(
        "{:>6}  {:>7}  {:>7}  {:>7}  {:>4}  {:>5}  {:>7}",
        "res", "b:v", "minrate", "maxrate", "crf", "tiles", "threads"
    );
    for resolution in Resolution::ALL {
        let p = resolution.profile();
        println!(
            "{:>6}  {:>6}k  {:>6}k  {:>6}k  {:>4}  {:>5}  {:>7}",
            resolution.to_string(),
            p.bitrate.target_kbps,
            p.bitrate.min_kbps,
            p.bitrate.max_kbps,
            quality.apply_crf_offset(p.base_crf),
            p.tiling.tile_columns,
            p.tiling.threads
        );
    }
}
