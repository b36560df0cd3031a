use std::error::Error;
use tracing::{debug, info, warn};

mod config;
mod payload;
mod report;

use config::Config;
use report::TimestampReport;
use tscodec::clock;

const CONFIG_FILE: &str = "config.json";
const VALIDATE_FLAGS: [&str; 3] = ["--validate-config", "--validate", "-v"];
const HELP_FLAGS: [&str; 2] = ["--help", "-h"];

// ========== Logging Setup ==========

fn init_logging(log_config: &config::LogConfig) -> Result<(), Box<dyn Error>> {
    use tracing_appender::rolling;
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    std::fs::create_dir_all(&log_config.directory)?;

    let file_appender = rolling::daily(&log_config.directory, &log_config.file_prefix);

    let timer = || {
        fmt::time::OffsetTime::local_rfc_3339().unwrap_or_else(|_| {
            fmt::time::OffsetTime::new(time::UtcOffset::UTC, time::format_description::well_known::Rfc3339)
        })
    };

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_timer(timer());

    // Console logging on stderr
    let console_layer = fmt::layer().with_writer(std::io::stderr).with_timer(timer());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_config.level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}

fn print_help() {
    println!("Timestamp Inspector");
    println!();
    println!("USAGE:");
    println!("    timestamp_inspector [OPTIONS] [PAYLOAD]...");
    println!();
    println!("PAYLOAD:");
    println!("    1484753291          seconds since the Unix epoch");
    println!("    1484753291000ms     milliseconds since the Unix epoch");
    println!("    898b:587f           two 16-bit hex words in wire order");
    println!("    0x898b587f          4 hex bytes in wire order");
    println!();
    println!("    With no payload the current time is reported.");
    println!();
    println!("OPTIONS:");
    println!("    --validate-config, --validate, -v    Validate configuration and exit");
    println!("    --help, -h                           Show this help message");
    println!();
    println!("Configuration file: {} (in current directory)", CONFIG_FILE);
}

// ========== Main Application ==========

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| HELP_FLAGS.contains(&a.as_str())) {
        print_help();
        std::process::exit(0);
    }

    let validate_only = args.iter().any(|a| VALIDATE_FLAGS.contains(&a.as_str()));

    let config = match Config::from_file(CONFIG_FILE) {
        Ok(cfg) => {
            if validate_only {
                println!("✓ Configuration validation successful");
                println!("  Word order: {}", cfg.decoding.word_order);
                println!("  Display pattern: {}", cfg.display.pattern);
                println!("  UTC offset: {} min", cfg.display.utc_offset_minutes);
                println!("  Log level: {}", cfg.logging.level);
                std::process::exit(0);
            }
            cfg
        }
        Err(e) => {
            if validate_only {
                eprintln!("✗ Configuration validation failed: {}", e);
                std::process::exit(1);
            }
            eprintln!("Warning: Could not load {}: {}", CONFIG_FILE, e);
            eprintln!("Using default configuration");
            Config::default()
        }
    };

    init_logging(&config.logging)?;
    info!(word_order = %config.decoding.word_order, "Timestamp inspector starting");

    let reference = clock::now_codec()?;
    debug!(reference = %reference, "Reference time");

    let tokens: Vec<String> = args
        .into_iter()
        .filter(|a| !VALIDATE_FLAGS.contains(&a.as_str()))
        .collect();

    if tokens.is_empty() {
        let report = TimestampReport::new(reference, &config, &reference)?;
        println!("{}", report);
        return Ok(());
    }

    let mut failures = 0usize;
    for token in &tokens {
        match TimestampReport::from_token(token, &config, &reference) {
            Ok(report) => {
                debug!(token = %token, seconds = report.codec.seconds(), "Decoded payload");
                println!("{}\n", report);
            }
            Err(e) => {
                warn!(token = %token, "Failed to decode payload: {}", e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        warn!("{} of {} payloads could not be decoded", failures, tokens.len());
        std::process::exit(1);
    }

    Ok(())
}
