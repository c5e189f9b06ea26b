use std::time::Instant;

use crater_core::config::CraterConfig;
use crater_core::direction::Facing;
use crater_core::types::Timestamp;
use crater_sim::arena::EntityId;
use crater_sim::{GameEvent, Simulation};
use crater_terrain::TerrainError;
use glam::IVec2;

use crate::scenes::{self, SceneConfig};

/// Simulated wall-clock step between ticks.
pub const TICK_MS: u64 = 16;

/// Timing data for a single benchmark run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TimingSeries {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Result of a single scene benchmark.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BenchmarkResult {
    pub scene_name: String,
    pub width: u32,
    pub height: u32,
    pub spawned_entities: u32,
    pub tick_count: u32,
    pub zombies_killed: u32,
    pub players_caught: u32,
    pub detonations: u32,
    pub pixels_cleared: u64,
    pub timings: TimingSeries,
}

/// Runs scripted scenes against the CPU simulation.
pub struct BenchmarkRunner {
    config: CraterConfig,
    tick_count: u32,
}

impl BenchmarkRunner {
    pub fn new(tick_count: u32, config: CraterConfig) -> Self {
        Self { config, tick_count }
    }

    /// Run a single benchmark scene and return timing results.
    pub fn run_scene(&self, scene: &SceneConfig) -> Result<BenchmarkResult, TerrainError> {
        log::info!(
            "Running scene '{}' ({}x{}, {} players, {} zombies)...",
            scene.name,
            scene.width,
            scene.height,
            scene.players,
            scene.zombies
        );

        let grid = scenes::generate_terrain(scene)?;
        let mut sim = Simulation::new(grid, self.config);

        let ground = |x: i32| scenes::surface_height(x, scene.width, scene.height);
        let players: Vec<EntityId> = scenes::spawn_columns(scene.players, scene.width, (0.05, 0.45))
            .into_iter()
            .map(|x| sim.spawn_player(IVec2::new(x, ground(x))))
            .collect();
        for x in scenes::spawn_columns(scene.zombies, scene.width, (0.55, 0.95)) {
            sim.spawn_zombie(IVec2::new(x, ground(x)));
        }
        let spawned = sim.entities().len() as u32;

        let mut frame_times = Vec::with_capacity(self.tick_count as usize);
        let mut zombies_killed = 0u32;
        let mut players_caught = 0u32;
        let mut detonations = 0u32;
        let mut pixels_cleared = 0u64;

        for tick in 0..self.tick_count {
            let now = Timestamp::from_millis(tick as u64 * TICK_MS);

            let frame_start = Instant::now();

            for (i, &player) in players.iter().enumerate() {
                // Stagger players so they do not all act on the same tick.
                let phase = tick + i as u32;
                if phase % scene.fire_interval.max(1) == 0 {
                    sim.fire(player);
                }
                if scene.throw_interval > 0 && phase % scene.throw_interval == 0 {
                    sim.throw(player, scene.throw_charge_ms);
                }
                if phase % 16 == 0 {
                    sim.walk(player, Facing::Right);
                }
            }

            let report = sim.tick(now);
            if report.needs_rebuild {
                sim.clear_rebuild();
            }

            frame_times.push(frame_start.elapsed().as_secs_f64() * 1000.0);

            for event in &report.events {
                match event {
                    GameEvent::ZombieShot { .. } | GameEvent::ZombieBlasted { .. } => {
                        zombies_killed += 1
                    }
                    GameEvent::PlayerCaught { .. } => players_caught += 1,
                }
            }
            detonations += report.detonations.len() as u32;
            pixels_cleared += report.decay.cleared as u64;
            pixels_cleared += report
                .detonations
                .iter()
                .map(|(_, d)| d.stats.cleared as u64)
                .sum::<u64>();
        }

        let timings = compute_timings(&frame_times);
        log::info!(
            "  Done: mean={:.3}ms, p95={:.3}ms, p99={:.3}ms, {} kills, {} detonations",
            timings.mean_ms,
            timings.p95_ms,
            timings.p99_ms,
            zombies_killed,
            detonations
        );

        Ok(BenchmarkResult {
            scene_name: scene.name.to_string(),
            width: scene.width,
            height: scene.height,
            spawned_entities: spawned,
            tick_count: self.tick_count,
            zombies_killed,
            players_caught,
            detonations,
            pixels_cleared,
            timings,
        })
    }
}

/// Compute timing statistics from a list of frame times in milliseconds.
pub fn compute_timings(times: &[f64]) -> TimingSeries {
    if times.is_empty() {
        return TimingSeries {
            mean_ms: 0.0,
            median_ms: 0.0,
            p95_ms: 0.0,
            p99_ms: 0.0,
            min_ms: 0.0,
            max_ms: 0.0,
        };
    }

    let mut sorted = times.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    let p95_idx = ((n as f64) * 0.95).ceil() as usize;
    let p99_idx = ((n as f64) * 0.99).ceil() as usize;

    TimingSeries {
        mean_ms: mean,
        median_ms: median,
        p95_ms: sorted[p95_idx.min(n - 1)],
        p99_ms: sorted[p99_idx.min(n - 1)],
        min_ms: sorted[0],
        max_ms: sorted[n - 1],
    }
}
