use anyhow::Context as _;
use grader_evaluation::archetype::ArchetypeTable;
use grader_evaluation::benchmark::BenchmarkTable;
use grader_evaluation::scoring::profile::ScoringTable;
use grader_evaluation::scoring::rules::ScoringRules;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs::read_to_string;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tier: String,
    /// Built-in classification when unset
    pub archetypes_path: Option<PathBuf>,
    /// Built-in benchmarks when unset
    pub benchmarks_path: Option<PathBuf>,
    /// Pillar layouts and archetype overlays replacing the built-in ones
    pub profiles_path: Option<PathBuf>,
    pub rules: ScoringRules,
    pub matches: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tier: "GOLD".into(),
            archetypes_path: None,
            benchmarks_path: None,
            profiles_path: None,
            rules: ScoringRules::default(),
            matches: Vec::new(),
        }
    }
}

impl Config {
    pub async fn load(path: Option<impl AsRef<Path>>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_file(path).await?,
            None => Default::default(),
        };

        config.tier = std::env::var("GRADER_TIER").ok().unwrap_or(config.tier);
        config.archetypes_path = std::env::var("ARCHETYPES_PATH")
            .ok()
            .map(PathBuf::from)
            .or(config.archetypes_path);
        config.benchmarks_path = std::env::var("BENCHMARKS_PATH")
            .ok()
            .map(PathBuf::from)
            .or(config.benchmarks_path);
        config.profiles_path = std::env::var("PROFILES_PATH")
            .ok()
            .map(PathBuf::from)
            .or(config.profiles_path);

        Ok(config)
    }

    async fn load_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Ok(toml::from_str(&contents)?)
    }

    pub async fn archetypes(&self) -> anyhow::Result<ArchetypeTable> {
        let Some(path) = &self.archetypes_path else {
            return Ok(ArchetypeTable::builtin());
        };
        let contents = read_to_string(path)
            .await
            .with_context(|| format!("Failed to read archetypes {}", path.display()))?;
        ArchetypeTable::from_toml(&contents).context("Failed to parse archetype table")
    }

    pub async fn benchmarks(&self) -> anyhow::Result<BenchmarkTable> {
        let Some(path) = &self.benchmarks_path else {
            return Ok(BenchmarkTable::builtin());
        };
        let contents = read_to_string(path)
            .await
            .with_context(|| format!("Failed to read benchmarks {}", path.display()))?;
        BenchmarkTable::from_toml(&contents).context("Failed to parse benchmark table")
    }

    pub async fn profiles(&self) -> anyhow::Result<ScoringTable> {
        let Some(path) = &self.profiles_path else {
            return Ok(ScoringTable::builtin());
        };
        let contents = read_to_string(path)
            .await
            .with_context(|| format!("Failed to read profiles {}", path.display()))?;
        ScoringTable::from_toml(&contents).context("Failed to parse scoring profiles")
    }
}
