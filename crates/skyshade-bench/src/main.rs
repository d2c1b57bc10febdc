use std::path::PathBuf;
use std::process;

use skyshade_bench::report;
use skyshade_bench::runner::BenchmarkRunner;
use skyshade_bench::scenes;

const DEFAULT_CONFIG: &str = include_str!("../../../data/config/default.ron");
const DEFAULT_VARIANT: &str = include_str!("../../../data/variants/default.ron");

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut baseline_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut regression_threshold = 10.0f64;
    let mut width = 256u32;
    let mut height = 128u32;
    let mut frame_count = 30u32;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--baseline" => {
                baseline_path = Some(PathBuf::from(value(&args, &mut i)));
            }
            "--output" => {
                output_path = Some(PathBuf::from(value(&args, &mut i)));
            }
            "--regression-threshold" => {
                regression_threshold = value(&args, &mut i)
                    .parse()
                    .expect("invalid --regression-threshold value");
            }
            "--width" => {
                width = value(&args, &mut i).parse().expect("invalid --width value");
            }
            "--height" => {
                height = value(&args, &mut i).parse().expect("invalid --height value");
            }
            "--frames" => {
                frame_count = value(&args, &mut i).parse().expect("invalid --frames value");
            }
            "--help" | "-h" => {
                eprintln!("Usage: bench-runner [OPTIONS]");
                eprintln!("  --baseline <path>              Load baseline JSON for comparison");
                eprintln!("  --output <path>                Save current results as JSON baseline");
                eprintln!(
                    "  --regression-threshold <pct>   Regression threshold percentage (default: 10)"
                );
                eprintln!("  --width <px>                   Panorama width (default: 256)");
                eprintln!("  --height <px>                  Panorama height (default: 128)");
                eprintln!("  --frames <n>                   Frames per scene (default: 30)");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let resolved = match skyshade_config::resolve_variant(DEFAULT_CONFIG, DEFAULT_VARIANT) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("ERROR: {e}");
            process::exit(2);
        }
    };
    let runner = match BenchmarkRunner::new(&resolved, width, height, frame_count) {
        Ok(runner) => runner,
        Err(e) => {
            eprintln!("ERROR: {e}");
            process::exit(2);
        }
    };

    let results: Vec<_> = scenes::standard_scenes()
        .iter()
        .map(|scene| runner.run_scene(scene))
        .collect();

    // Print markdown summary
    println!("\n## Benchmark Results\n");
    println!("{}", report::format_markdown(&results));

    // Save output baseline
    if let Some(ref path) = output_path {
        let baseline = report::Baseline {
            timestamp: timestamp(),
            results: results.clone(),
        };
        report::save_baseline(path, &baseline).expect("failed to save baseline");
        log::info!("Saved baseline to {}", path.display());
    }

    // Compare against baseline
    if let Some(ref path) = baseline_path {
        if let Some(baseline) = report::load_baseline(path) {
            for scene in report::changed_outputs(&results, &baseline) {
                log::warn!("Scene '{scene}' renders differently from the baseline");
            }
            let regressions = report::compare(&results, &baseline, regression_threshold);
            println!(
                "{}",
                report::format_comparison(&regressions, regression_threshold)
            );
            if !regressions.is_empty() {
                eprintln!(
                    "ERROR: {} regressions detected, exiting with code 1",
                    regressions.len()
                );
                process::exit(1);
            }
        } else {
            log::warn!("Baseline file not found: {}", path.display());
        }
    }

    log::info!("Benchmark complete.");
}

/// Value following the flag at `args[*i]`; advances `i` past it.
fn value<'a>(args: &'a [String], i: &mut usize) -> &'a str {
    *i += 1;
    match args.get(*i) {
        Some(v) => v,
        None => {
            eprintln!("Missing value for {}", args[*i - 1]);
            process::exit(1);
        }
    }
}

/// Seconds since the Unix epoch, tagged.
fn timestamp() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("bench-{secs}")
}
