//! CareSense Agent CLI
//!
//! Local signal-to-alert monitor for in-home care.

use caresense_agent::{
    config::Config,
    core::{AnomalyKind, TrendBin},
    sampler::SimulatedCapture,
    session::MonitoringSession,
    CARE_NOTICE, VERSION,
};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "caresense")]
#[command(author = "CareSense")]
#[command(version = VERSION)]
#[command(about = "Local signal-to-alert monitor for in-home care", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulated capture through the monitoring pipeline
    Monitor {
        /// Stop after this many seconds (runs until Ctrl+C if omitted)
        #[arg(long)]
        seconds: Option<u64>,

        /// Seed for capture and detector randomness (reproducible runs)
        #[arg(long)]
        seed: Option<u64>,

        /// Meter loudness only, without anomaly detection
        #[arg(long)]
        no_detect: bool,
    },

    /// Raise manual alerts and show the derived views
    Simulate {
        /// Comma-separated alert kinds (fall, breathing, speech)
        #[arg(long, default_value = "fall,breathing,speech")]
        events: String,
    },

    /// Ask the care assistant a question
    Chat {
        /// Message to send
        #[arg(required = true)]
        message: Vec<String>,
    },

    /// Show current configuration and where state lives
    Status,

    /// Show configuration as JSON
    Config,

    /// Display the care notice
    Disclaimer,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Monitor {
            seconds,
            seed,
            no_detect,
        } => {
            cmd_monitor(seconds, seed, no_detect);
        }
        Commands::Simulate { events } => {
            cmd_simulate(&events);
        }
        Commands::Chat { message } => {
            cmd_chat(&message.join(" "));
        }
        Commands::Status => {
            cmd_status();
        }
        Commands::Config => {
            cmd_config();
        }
        Commands::Disclaimer => {
            cmd_disclaimer();
        }
    }
}

fn cmd_monitor(seconds: Option<u64>, seed: Option<u64>, no_detect: bool) {
    println!("CareSense Agent v{VERSION}");
    println!();

    let mut config = Config::load().unwrap_or_default();
    if let Some(s) = seed {
        config.capture.seed = Some(s);
    }

    let mut session = match seed {
        Some(s) => MonitoringSession::with_seed(&config, s),
        None => MonitoringSession::new(&config),
    };
    if !no_detect {
        session.start_monitoring();
    }

    println!("Starting monitoring...");
    println!(
        "  Detection: {}",
        if no_detect {
            "disabled (metering only)"
        } else {
            "enabled"
        }
    );
    println!(
        "  Loudness threshold: {:.2}",
        config.detector.loudness_threshold
    );
    println!("  Fire probability: {:.3}", config.detector.fire_probability);
    println!("  Capture tick: {}ms", config.capture.tick_ms);
    match seconds {
        Some(s) => println!("  Run duration: {s}s"),
        None => println!("  Run duration: until Ctrl+C"),
    }
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let mut capture = match SimulatedCapture::open(config.capture.to_capture_config()) {
        Ok(capture) => capture,
        Err(e) => {
            eprintln!("Error opening capture: {e}");
            std::process::exit(1);
        }
    };

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc_handler(r);

    let deadline = seconds.map(|s| Instant::now() + Duration::from_secs(s));
    let tz = config.display_tz();
    let mut last_status = Instant::now();

    // Main sample loop
    while running.load(Ordering::SeqCst) {
        if let Some(deadline) = deadline {
            if Instant::now() >= deadline {
                break;
            }
        }

        match capture.samples().recv_timeout(Duration::from_millis(100)) {
            Ok(sample) => {
                if let Some(alert) = session.feed_sample(sample) {
                    println!(
                        "[{}] ALERT: {} (risk: {})",
                        alert.timestamp.with_timezone(&tz).format("%H:%M:%S"),
                        alert.label,
                        session.risk_score(Utc::now())
                    );
                }
            }
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => {}
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => {
                eprintln!("Capture disconnected unexpectedly");
                break;
            }
        }

        if last_status.elapsed() >= Duration::from_secs(1) {
            if let Some(level) = session.latest_level() {
                println!(
                    "  level {:.3} | risk {:>3} | active alerts {}",
                    level,
                    session.risk_score(Utc::now()),
                    session.active_alerts().len()
                );
            }
            last_status = Instant::now();
        }
    }

    // Stop capture
    println!();
    println!("Stopping monitoring...");
    capture.close();

    let now = Utc::now();
    println!();
    println!("Risk score: {}/100", session.risk_score(now));
    println!("Active alerts: {}", session.active_alerts().len());
    println!();
    print_trend(&session.trend(now));

    // Final stats
    println!();
    println!("{}", session.activity().summary());
}

fn cmd_simulate(events: &str) {
    let config = Config::load().unwrap_or_default();
    let mut session = MonitoringSession::new(&config);

    let mut raised = Vec::new();
    for name in events.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match name.parse::<AnomalyKind>() {
            Ok(kind) => {
                let event = session.trigger_manual(kind);
                println!("Raised: {} (id {})", event.label, event.id);
                raised.push(event);
            }
            Err(e) => {
                eprintln!("Skipping: {e}");
            }
        }
    }

    if raised.is_empty() {
        eprintln!("No events raised. Expected a list like 'fall,breathing,speech'.");
        std::process::exit(1);
    }

    let now = Utc::now();
    println!();
    println!("Risk score: {}/100", session.risk_score(now));
    println!();
    print_trend(&session.trend(now));

    // Walk one alert through its lifecycle
    let first = raised[0].id;
    println!();
    println!("Resolving {first} ...");
    session.resolve_alert(first);
    println!("Risk score after resolve: {}/100", session.risk_score(Utc::now()));
    println!("Active alerts: {}", session.active_alerts().len());
}

fn cmd_chat(message: &str) {
    let config = Config::load().unwrap_or_default();
    let mut session = MonitoringSession::new(&config);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error creating runtime: {e}");
            std::process::exit(1);
        }
    };

    println!("You: {message}");
    let reply = runtime.block_on(session.send_chat_message(message));
    println!("CareSense: {reply}");
}

fn cmd_status() {
    let config = Config::load().unwrap_or_default();

    println!("CareSense Agent Status");
    println!("======================");
    println!();

    println!("Configuration:");
    println!(
        "  Loudness threshold: {:.2}",
        config.detector.loudness_threshold
    );
    println!("  Fire probability: {:.3}", config.detector.fire_probability);
    println!("  Reply delay: {}ms", config.reply_delay.as_millis());
    println!("  Display timezone: {}", config.display_timezone);
    println!("  Capture tick: {}ms", config.capture.tick_ms);
    println!("  Capture frame: {} samples", config.capture.frame_len);
    println!(
        "  Burst probability: {:.2}",
        config.capture.burst_probability
    );
    match config.capture.seed {
        Some(seed) => println!("  Capture seed: {seed}"),
        None => println!("  Capture seed: entropy"),
    }
    println!();

    let config_path = Config::config_path();
    if config_path.exists() {
        println!("Config file: {config_path:?}");
    } else {
        println!("Config file: {config_path:?} (not written; using defaults)");
    }
    println!();
    println!("Alerts and statistics live in memory for one session and are");
    println!("printed when a monitor run stops.");
}

fn cmd_config() {
    let config = Config::load().unwrap_or_default();

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!();
    println!(
        "{}",
        serde_json::to_string_pretty(&config).unwrap_or_else(|_| "Error".to_string())
    );
}

fn cmd_disclaimer() {
    println!("{CARE_NOTICE}");
}

fn print_trend(bins: &[TrendBin]) {
    println!("Event trend (last 12 hours):");
    for bin in bins {
        println!(
            "  {}  {:>3}  {}",
            bin.label,
            bin.count,
            "#".repeat(bin.count.min(40) as usize)
        );
    }
}

/// Set up Ctrl+C handler.
fn ctrlc_handler(running: Arc<AtomicBool>) {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");
}
