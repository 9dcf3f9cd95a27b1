use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::{AppContext, InitArgs};
use crate::core::rewrite::EngineSettings;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config
{
    /// Directory holding `{grade}_{difficulty}_{subject}.json` files (`~` expands)
    pub questions_dir: String,

    /// File-name globs that are never treated as bank files
    pub exclude: Vec<String>,

    /// Descend into subdirectories when scanning a directory
    pub recursive: bool,

    /// Duplicate detection settings
    pub detect: DetectConfig,

    /// Replacement generation settings
    pub generate: GenerateConfig,

    /// Quality audit settings
    pub verify: VerifyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectConfig
{
    /// Distinct questions of one type allowed per file
    pub type_threshold: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig
{
    /// Template draws per slot before falling back
    pub max_retries: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyConfig
{
    pub min_content_length: usize,
}

impl Default for Config
{
    fn default() -> Self
    {
        Self {
            questions_dir: ".".to_string(),
            exclude: vec!["manifest.json".to_string(), "version.json".to_string()],
            recursive: false,
            detect: DetectConfig::default(),
            generate: GenerateConfig::default(),
            verify: VerifyConfig::default(),
        }
    }
}

impl Default for DetectConfig
{
    fn default() -> Self
    {
        Self { type_threshold: EngineSettings::default().type_threshold }
    }
}

impl Default for GenerateConfig
{
    fn default() -> Self
    {
        Self { max_retries: EngineSettings::default().max_retries }
    }
}

impl Default for VerifyConfig
{
    fn default() -> Self
    {
        Self { min_content_length: 10 }
    }
}

impl Config
{
    /// `questions_dir` with `~` and `$VAR` expanded.
    pub fn questions_dir(&self) -> PathBuf
    {
        PathBuf::from(
            shellexpand::full(&self.questions_dir)
                .map(|s| s.into_owned())
                .unwrap_or_else(|_| self.questions_dir.clone()),
        )
    }

    /// Engine settings, with command-line overrides applied on top.
    pub fn engine_settings(
        &self,
        threshold: Option<usize>,
        retries: Option<usize>,
    ) -> EngineSettings
    {
        EngineSettings {
            type_threshold: threshold
                .unwrap_or(self.detect.type_threshold)
                .max(1),
            max_retries: retries
                .unwrap_or(self.generate.max_retries)
                .max(1),
        }
    }
}

/// Defaults, then the first config file found (or `explicit`), then `QBANK_*`
/// environment variables (`QBANK_DETECT__TYPE_THRESHOLD=4`).
pub fn load_config(explicit: Option<&Path>) -> Result<Config>
{
    let defaults =
        config::Config::try_from(&Config::default()).context("Failed to seed default configuration")?;
    let mut builder = config::Config::builder().add_source(defaults);

    match explicit
    {
        Some(path) =>
        {
            if !path.exists()
            {
                anyhow::bail!("Config file {} does not exist", path.display());
            }
            builder = builder.add_source(config::File::from(path));
        }
        None =>
        {
            // Load from config files in priority order
            let config_paths = ["qbank.toml", ".qbank.toml"];

            for path in &config_paths
            {
                if Path::new(path).exists()
                {
                    builder = builder.add_source(config::File::with_name(path));
                    break;
                }
            }
        }
    }

    // Add environment variables with QBANK_ prefix
    builder = builder.add_source(
        config::Environment::with_prefix("QBANK")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

pub fn init(
    args: InitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config_path = args
        .path
        .join("qbank.toml");

    if config_path.exists() && !args.force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    if ctx.dry_run
    {
        print!("{toml_string}");
        return Ok(());
    }

    std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}
