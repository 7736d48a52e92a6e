use duel_core::{classify, GestureLog};
use host::{replay_log, ReplayReport, ScreenLayouts};
use std::env;
use std::fs;
use std::time::Instant;

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    println!("🚗 Parking Duel Replay");
    println!("{}", "=".repeat(70));
    println!();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    let command = &args[1];

    match command.as_str() {
        "replay" => {
            if args.len() < 3 {
                eprintln!("Usage: {} replay <log_file> [output_file]", args[0]);
                std::process::exit(1);
            }
            replay_command(&args[2], args.get(3).map(|s| s.as_str()));
        }

        "classify" => {
            if args.len() < 4 {
                eprintln!("Usage: {} classify <width> <height>", args[0]);
                std::process::exit(1);
            }
            classify_command(&args[2], &args[3]);
        }

        "--help" | "-h" => {
            print_usage(&args[0]);
            std::process::exit(0);
        }

        _ => {
            eprintln!("❌ Unknown command: {}", command);
            print_usage(&args[0]);
            std::process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <command> [options]", program);
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  replay <log_file> [output_file]");
    eprintln!("      Replay a recorded gesture log against the parking lot");
    eprintln!("      - log_file: JSON file containing the gesture log");
    eprintln!("      - output_file: Optional file to save the report (JSON)");
    eprintln!("                     Defaults to: duel-report_<hash>_<timestamp>.json");
    eprintln!();
    eprintln!("  classify <width> <height>");
    eprintln!("      Print the screen profile for a viewport size");
    eprintln!();
    eprintln!("Set RUST_LOG=info (or debug) to trace the replay.");
}

fn replay_command(log_file: &str, output_file: Option<&str>) {
    println!("📋 Replaying gesture log");
    println!("  Log file: {}", log_file);
    println!();

    const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024; // 10 MB
    let metadata = fs::metadata(log_file).unwrap_or_else(|e| {
        eprintln!("❌ Error accessing file '{}': {}", log_file, e);
        std::process::exit(1);
    });

    if metadata.len() > MAX_LOG_SIZE {
        eprintln!("❌ Log file too large: {} bytes (max {} bytes)", metadata.len(), MAX_LOG_SIZE);
        std::process::exit(1);
    }

    let log = load_log(log_file).unwrap_or_else(|e| {
        eprintln!("❌ Error loading log: {}", e);
        std::process::exit(1);
    });

    println!("📦 Loaded {} events from log", log.events.len());
    println!("  Viewport: {}x{}", log.viewport.width, log.viewport.height);
    println!();

    let start = Instant::now();
    let report = replay_log(&log, &ScreenLayouts::parking_lot()).unwrap_or_else(|e| {
        eprintln!("❌ Replay failed: {}", e);
        std::process::exit(1);
    });
    println!("  Replay time: {:.3}s", start.elapsed().as_secs_f64());
    println!();

    let default_filename = format!(
        "duel-report_{}_{}.json",
        &report.log_hash[..8],
        chrono::Utc::now().timestamp()
    );
    let file_to_save = output_file.unwrap_or(&default_filename);

    match save_report(&report, file_to_save) {
        Ok(_) => {
            println!("✅ Replay complete");
            println!("  Screen: {:?} ({:?})", report.screen.screen_class, report.screen.orientation);
            println!("  Attempts: {}", report.attempts);
            println!("  Sequence ended: {}", if report.finished { "yes" } else { "no" });
            for s in &report.settlements {
                println!("    attempt {} settled after {} frames", s.attempt, s.frames);
            }
            println!("  Log Hash: 0x{}", report.log_hash);
            println!();
            println!("💾 Report saved to: {}", file_to_save);
            println!("{}", "=".repeat(70));
        }
        Err(e) => {
            eprintln!("❌ Error saving report: {}", e);
            std::process::exit(1);
        }
    }
}

fn classify_command(width: &str, height: &str) {
    let (width, height) = match (width.parse::<f64>(), height.parse::<f64>()) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            eprintln!("❌ Width and height must be numbers");
            std::process::exit(1);
        }
    };

    match classify(width, height) {
        Ok(profile) => match serde_json::to_string_pretty(&profile) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("❌ Error encoding profile: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}

fn load_log(path: &str) -> Result<GestureLog, Box<dyn std::error::Error>> {
    let json = fs::read_to_string(path)?;
    let log: GestureLog = serde_json::from_str(&json)?;
    Ok(log)
}

fn save_report(report: &ReplayReport, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    Ok(())
}
