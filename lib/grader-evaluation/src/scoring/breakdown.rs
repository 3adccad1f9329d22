use super::metric::Metric;
use super::profile::Pillar;
use serde::{Serialize, Serializer};
use std::fmt::Display;

pub const BENCHMARK_DEFAULT: &str = "benchmark:default";
pub const ARCHETYPE_GENERIC: &str = "archetype:generic";
pub const OPPONENT_NONE: &str = "opponent:none";

/// One auditable line of a score. Every change to the running score after the
/// base is an [`BreakdownLine::Adjustment`].
#[derive(Debug, Clone, PartialEq)]
pub enum BreakdownLine {
    Marker(&'static str),
    Pillar {
        pillar: Pillar,
        weight: f64,
        score: f64,
    },
    SubMetric {
        metric: Metric,
        actual: f64,
        expected: f64,
        score: f64,
    },
    Base {
        score: f64,
    },
    Adjustment {
        rule: &'static str,
        raw: f64,
        delta: f64,
        score: f64,
    },
}

impl Display for BreakdownLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BreakdownLine::Marker(marker) => f.write_str(marker),
            BreakdownLine::Pillar {
                pillar,
                weight,
                score,
            } => write!(f, "{pillar} (weight {weight:.2}): {score:.1}"),
            BreakdownLine::SubMetric {
                metric,
                actual,
                expected,
                score,
            } => write!(
                f,
                "  {}: {actual:.2} vs {expected:.2} ({:+.2}) -> {score:.1}",
                metric.label(),
                actual - expected
            ),
            BreakdownLine::Base { score } => write!(f, "Base score: {score:.1}"),
            BreakdownLine::Adjustment {
                rule,
                raw,
                delta,
                score,
            } => write!(f, "{rule} ({raw:.2}): {delta:+.1} -> {score:.1}"),
        }
    }
}

impl Serialize for BreakdownLine {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_render_name_value_delta_and_score() {
        let line = BreakdownLine::Adjustment {
            rule: "Clutch kills",
            raw: 2.0,
            delta: 4.0,
            score: 71.5,
        };
        assert_eq!(line.to_string(), "Clutch kills (2.00): +4.0 -> 71.5");

        let line = BreakdownLine::SubMetric {
            metric: Metric::CsPerMin,
            actual: 9.0,
            expected: 7.2,
            score: 83.7,
        };
        assert_eq!(line.to_string(), "  CS/min: 9.00 vs 7.20 (+1.80) -> 83.7");
        assert_eq!(BreakdownLine::Marker(ARCHETYPE_GENERIC).to_string(), "archetype:generic");
    }
}
