//! Demonstration of the CareSense monitoring pipeline.
//!
//! This example shows how to:
//! 1. Open the simulated signal capture
//! 2. Feed loudness samples through a monitoring session
//! 3. Raise and resolve alerts
//! 4. Read the risk score and hourly trend
//! 5. Ask the care assistant a question
//!
//! Run with: cargo run --example session_demo

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use caresense_agent::{
    config::Config,
    core::AnomalyKind,
    sampler::SimulatedCapture,
    session::MonitoringSession,
    CARE_NOTICE,
};
use chrono::Utc;

fn main() {
    println!("CareSense Agent - Session Demo");
    println!("==============================");
    println!();

    // Display care notice
    println!("{CARE_NOTICE}");
    println!();

    // Tune for a short, visibly eventful run. The fixed seeds make every
    // demo run print the same alerts.
    let mut config = Config::default();
    config.detector.fire_probability = 0.15;
    config.capture.burst_probability = 0.3;
    config.capture.seed = Some(7);
    config.reply_delay = Duration::from_millis(400);

    let mut session = MonitoringSession::with_seed(&config, 7);
    session.start_monitoring();

    let mut capture = match SimulatedCapture::open(config.capture.to_capture_config()) {
        Ok(capture) => capture,
        Err(e) => {
            eprintln!("Error opening capture: {e}");
            return;
        }
    };

    println!("Monitoring the simulated signal for 10 seconds...");
    println!();

    // Set up stop flag
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    // Set up Ctrl+C handler
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");

    let start = std::time::Instant::now();
    let mut sample_count = 0;

    while running.load(Ordering::SeqCst) && start.elapsed() < Duration::from_secs(10) {
        match capture.samples().recv_timeout(Duration::from_millis(100)) {
            Ok(sample) => {
                sample_count += 1;
                if sample_count % 40 == 0 {
                    println!(
                        "  [{:>2}s] level {:.3} ({} samples so far)",
                        start.elapsed().as_secs(),
                        sample.level,
                        sample_count
                    );
                }

                if let Some(alert) = session.feed_sample(sample) {
                    println!(
                        "  >>> ALERT: {} at {}",
                        alert.label,
                        alert.timestamp.format("%H:%M:%S")
                    );
                }
            }
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => {}
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }

    println!();
    println!("Stopping capture...");
    capture.close();

    // Raise the two alert kinds the detector cannot produce
    println!();
    println!("Raising manual alerts...");
    let fall = session.trigger_manual(AnomalyKind::Fall);
    println!("  Raised: {}", fall.label);
    let speech = session.trigger_manual(AnomalyKind::Speech);
    println!("  Raised: {}", speech.label);

    // Derived views
    let now = Utc::now();
    println!();
    println!("Risk score: {}/100", session.risk_score(now));
    println!("Active alerts: {}", session.active_alerts().len());
    println!();
    println!("Event trend (last 12 hours):");
    for bin in session.trend(now) {
        println!("  {}  {:>3}", bin.label, bin.count);
    }

    // Resolve one alert and watch the score drop
    println!();
    println!("Resolving the fall alert...");
    session.resolve_alert(fall.id);
    println!("Risk score now: {}/100", session.risk_score(Utc::now()));

    // Ask the assistant
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Error creating runtime");

    println!();
    for question in ["What should I do after a fall?", "Thanks for the help"] {
        println!("You: {question}");
        let reply = runtime.block_on(session.send_chat_message(question));
        println!("CareSense: {reply}");
    }

    // Final statistics
    println!();
    println!("{}", session.activity().summary());
    println!();
    println!("Demo complete!");
}
