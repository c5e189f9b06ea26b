use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::runner::BenchmarkResult;

/// Failure to read or write a baseline file.
#[derive(Debug, thiserror::Error)]
pub enum BaselineError {
    #[error("baseline io: {0}")]
    Io(#[from] std::io::Error),

    #[error("baseline json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Results of one bench run, stamped with when it was recorded.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Baseline {
    /// Seconds since the unix epoch; 0 if the system clock predates it.
    pub recorded_at: u64,
    pub tick_count: u32,
    pub results: Vec<BenchmarkResult>,
}

impl Baseline {
    pub fn capture(tick_count: u32, results: &[BenchmarkResult]) -> Self {
        let recorded_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            recorded_at,
            tick_count,
            results: results.to_vec(),
        }
    }

    pub fn scene(&self, name: &str) -> Option<&BenchmarkResult> {
        self.results.iter().find(|r| r.scene_name == name)
    }
}

/// Read a baseline. A missing file is `Ok(None)`; a corrupt one is an error.
pub fn load_baseline(path: &Path) -> Result<Option<Baseline>, BaselineError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&contents)?))
}

pub fn save_baseline(path: &Path, baseline: &Baseline) -> Result<(), BaselineError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(baseline)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// A scene whose mean tick time grew past the threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct Regression {
    pub scene: String,
    pub baseline_ms: f64,
    pub current_ms: f64,
    pub pct: f64,
}

/// Outcome of checking a run against a baseline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Comparison {
    pub regressions: Vec<Regression>,
    /// Scenes with no baseline entry.
    pub unmatched: Vec<String>,
    /// Scenes whose kills, detonations or cleared pixels differ from the
    /// baseline. Their timings measure different work.
    pub diverged: Vec<String>,
}

impl Comparison {
    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty()
    }
}

fn same_outcome(a: &BenchmarkResult, b: &BenchmarkResult) -> bool {
    a.tick_count == b.tick_count
        && a.zombies_killed == b.zombies_killed
        && a.players_caught == b.players_caught
        && a.detonations == b.detonations
        && a.pixels_cleared == b.pixels_cleared
}

/// Check mean tick time per scene against `baseline`.
///
/// Baseline entries with a non-positive mean cannot yield a percentage and
/// are skipped.
pub fn compare(current: &[BenchmarkResult], baseline: &Baseline, threshold_pct: f64) -> Comparison {
    let mut out = Comparison::default();

    for result in current {
        let Some(base) = baseline.scene(&result.scene_name) else {
            out.unmatched.push(result.scene_name.clone());
            continue;
        };
        if !same_outcome(base, result) {
            log::warn!(
                "scene '{}' played out differently from the baseline",
                result.scene_name
            );
            out.diverged.push(result.scene_name.clone());
        }
        if base.timings.mean_ms <= 0.0 {
            continue;
        }
        let pct = (result.timings.mean_ms - base.timings.mean_ms) / base.timings.mean_ms * 100.0;
        if pct > threshold_pct {
            out.regressions.push(Regression {
                scene: result.scene_name.clone(),
                baseline_ms: base.timings.mean_ms,
                current_ms: result.timings.mean_ms,
                pct,
            });
        }
    }

    out
}

/// Format results as a markdown summary table.
pub fn format_markdown(results: &[BenchmarkResult]) -> String {
    let mut out = String::new();
    out.push_str("| Scene | Size | Entities | Kills | Blasts | Cleared px | Mean (ms) | Median (ms) | P95 (ms) | P99 (ms) | Min (ms) | Max (ms) |\n");
    out.push_str("|-------|------|----------|-------|--------|------------|-----------|-------------|----------|----------|----------|----------|\n");

    for r in results {
        out.push_str(&format!(
            "| {} | {}x{} | {} | {} | {} | {} | {:.3} | {:.3} | {:.3} | {:.3} | {:.3} | {:.3} |\n",
            r.scene_name,
            r.width,
            r.height,
            r.spawned_entities,
            r.zombies_killed,
            r.detonations,
            r.pixels_cleared,
            r.timings.mean_ms,
            r.timings.median_ms,
            r.timings.p95_ms,
            r.timings.p99_ms,
            r.timings.min_ms,
            r.timings.max_ms,
        ));
    }

    out
}

/// Human-readable summary of a [`Comparison`].
pub fn format_comparison(cmp: &Comparison, baseline: &Baseline, threshold_pct: f64) -> String {
    let mut out = format!(
        "Against baseline recorded at unix {} ({} ticks):\n",
        baseline.recorded_at, baseline.tick_count
    );

    if cmp.has_regressions() {
        out.push_str(&format!("Mean tick time regressed >{threshold_pct:.0}%:\n"));
        for r in &cmp.regressions {
            out.push_str(&format!(
                "  - {}: {:.3}ms -> {:.3}ms (+{:.1}%)\n",
                r.scene, r.baseline_ms, r.current_ms, r.pct
            ));
        }
    } else {
        out.push_str(&format!("All scenes within {threshold_pct:.0}% of baseline.\n"));
    }
    for scene in &cmp.diverged {
        out.push_str(&format!("  ! {scene}: gameplay outcome differs\n"));
    }
    for scene in &cmp.unmatched {
        out.push_str(&format!("  ? {scene}: not in baseline\n"));
    }
    out
}
