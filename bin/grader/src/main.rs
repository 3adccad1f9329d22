use anyhow::Context as _;
use config::Config;
use grader_evaluation::scoring::ScoringEngine;
use grader_evaluation::{MatchAnalyzer, MatchReport};
use grader_model::model::MatchRecord;
use grader_model::timeline::TimelineRecord;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

mod config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    setup_tracing_subscriber();

    // Usage: grader [config.toml] [match.json ...]
    let mut args = std::env::args().skip(1).peekable();
    let config_path = args.next_if(|arg| arg.ends_with(".toml"));

    info!("Loading configuration");
    let mut config = Config::load(config_path).await?;
    config.matches.extend(args.map(PathBuf::from));
    if config.matches.is_empty() {
        anyhow::bail!("No match files given");
    }

    info!("Loading lookup tables");
    let engine = ScoringEngine::new(config.benchmarks().await?, config.rules.clone())
        .with_table(config.profiles().await?);
    let analyzer = Arc::new(MatchAnalyzer::new(config.archetypes().await?, engine));

    info!("Grading {} matches at {}", config.matches.len(), config.tier);
    let handles: Vec<_> = config
        .matches
        .iter()
        .map(|path| {
            let analyzer = analyzer.clone();
            let path = path.clone();
            let tier = config.tier.clone();
            tokio::task::spawn_blocking(move || grade(&analyzer, &path, &tier))
        })
        .collect();

    let mut reports = Vec::with_capacity(handles.len());
    for (path, handle) in config.matches.iter().zip(handles) {
        match handle.await.context("Grading task panicked")? {
            Ok(report) => {
                log_summary(&report);
                reports.push(report);
            }
            Err(e) => error!("Failed to grade {}: {e:#}", path.display()),
        }
    }

    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}

fn grade(analyzer: &MatchAnalyzer, path: &Path, tier: &str) -> anyhow::Result<MatchReport> {
    let record = MatchRecord::from_file(path)
        .with_context(|| format!("Failed to read match {}", path.display()))?;

    let timeline_path = timeline_path(path);
    let timeline = match TimelineRecord::from_file(&timeline_path) {
        Ok(timeline) => Some(timeline),
        Err(e) => {
            warn!("No usable timeline at {}: {e}", timeline_path.display());
            None
        }
    };

    Ok(analyzer.analyze(&record, timeline.as_ref(), tier))
}

/// `games/EUW1_1.json` -> `games/EUW1_1.timeline.json`
fn timeline_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();
    path.with_file_name(format!("{stem}.timeline.json"))
}

fn log_summary(report: &MatchReport) {
    let match_id = report.match_id.as_deref().unwrap_or("unknown match");
    let scores: Vec<u32> = report.players.iter().map(|p| p.final_score).collect();
    let mean = scores.iter().sum::<u32>() as f64 / scores.len().max(1) as f64;
    let best = report.players.iter().max_by_key(|p| p.final_score);

    info!(
        "{match_id}: mean {mean:.1}, best {} ({}), {} anomalies",
        best.map(|p| p.champion.as_str()).unwrap_or("-"),
        best.map(|p| p.final_score).unwrap_or_default(),
        report.anomalies.len()
    );
}

fn setup_tracing_subscriber() {
    let layer = fmt::layer()
        .pretty()
        .with_writer(std::io::stderr)
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_thread_names(true)
        .with_thread_ids(false)
        .with_target(false);
    tracing_subscriber::registry()
        .with(layer)
        .with(EnvFilter::from_default_env())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeline_sits_next_to_match() {
        assert_eq!(
            timeline_path(Path::new("games/EUW1_1.json")),
            PathBuf::from("games/EUW1_1.timeline.json")
        );
    }
}
