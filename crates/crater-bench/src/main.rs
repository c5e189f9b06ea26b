use std::path::PathBuf;
use std::process;

use crater_bench::report;
use crater_bench::runner::BenchmarkRunner;
use crater_bench::scenes;
use crater_core::config::CraterConfig;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut baseline_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut regression_threshold = 10.0f64;
    let mut tick_count = 120u32;
    let mut config_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--baseline" => {
                i += 1;
                baseline_path = Some(PathBuf::from(&args[i]));
            }
            "--output" => {
                i += 1;
                output_path = Some(PathBuf::from(&args[i]));
            }
            "--regression-threshold" => {
                i += 1;
                regression_threshold = args[i]
                    .parse()
                    .expect("invalid --regression-threshold value");
            }
            "--ticks" => {
                i += 1;
                tick_count = args[i].parse().expect("invalid --ticks value");
            }
            "--config" => {
                i += 1;
                config_path = Some(PathBuf::from(&args[i]));
            }
            "--help" | "-h" => {
                eprintln!("Usage: bench-runner [OPTIONS]");
                eprintln!("  --baseline <path>              Load baseline JSON for comparison");
                eprintln!("  --output <path>                Save current results as JSON baseline");
                eprintln!(
                    "  --regression-threshold <pct>   Regression threshold percentage (default: 10)"
                );
                eprintln!("  --ticks <n>                    Ticks per scene (default: 120)");
                eprintln!("  --config <path>                Load simulation config from RON");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(ref path) => load_config(path),
        None => CraterConfig::default(),
    };
    let runner = BenchmarkRunner::new(tick_count, config);

    let scene_configs = scenes::standard_scenes();
    let mut results = Vec::new();

    for scene in &scene_configs {
        match runner.run_scene(scene) {
            Ok(result) => results.push(result),
            Err(e) => {
                eprintln!("Scene '{}' failed: {}", scene.name, e);
                process::exit(1);
            }
        }
    }

    // Print markdown summary
    println!("\n## Benchmark Results\n");
    println!("{}", report::format_markdown(&results));

    // Save output baseline
    if let Some(ref path) = output_path {
        let baseline = report::Baseline::capture(tick_count, &results);
        if let Err(e) = report::save_baseline(path, &baseline) {
            eprintln!("Cannot save baseline {}: {}", path.display(), e);
            process::exit(1);
        }
        log::info!("Saved baseline to {}", path.display());
    }

    // Compare against baseline
    if let Some(ref path) = baseline_path {
        match report::load_baseline(path) {
            Ok(Some(baseline)) => {
                let cmp = report::compare(&results, &baseline, regression_threshold);
                println!(
                    "{}",
                    report::format_comparison(&cmp, &baseline, regression_threshold)
                );
                if cmp.has_regressions() {
                    eprintln!(
                        "ERROR: {} regressions detected, exiting with code 1",
                        cmp.regressions.len()
                    );
                    process::exit(1);
                }
            }
            Ok(None) => log::warn!("Baseline file not found: {}", path.display()),
            Err(e) => {
                eprintln!("Cannot read baseline {}: {}", path.display(), e);
                process::exit(1);
            }
        }
    }

    log::info!("Benchmark complete.");
}

/// Read and validate a RON config, exiting on failure.
fn load_config(path: &std::path::Path) -> CraterConfig {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Cannot read config {}: {}", path.display(), e);
            process::exit(1);
        }
    };
    match CraterConfig::from_ron_str(&contents) {
        Ok(config) => {
            log::info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            eprintln!("Invalid config {}: {}", path.display(), e);
            process::exit(1);
        }
    }
}
