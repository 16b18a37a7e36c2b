use juggle_core::config::SessionConfig;
use juggle_core::session::Session;
use juggle_headless::host::HeadlessHost;
use std::time::Duration;

const TICK_RATE_HZ: u32 = 60;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let preset = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "cascade3".to_string());
    let config = match preset.as_str() {
        "cascade3" => SessionConfig::cascade_3(),
        "cascade5" => SessionConfig::cascade_5(),
        "fountain4" => SessionConfig::fountain_4(),
        other => {
            eprintln!(
                "Unknown preset '{}'; expected cascade3, cascade5 or fountain4",
                other
            );
            std::process::exit(1);
        }
    };

    // Validate configuration before starting
    let mut session = match Session::new(config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Invalid session configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Starting {} session: {}",
        preset,
        serde_json::to_string(&config).unwrap_or_default()
    );

    let dt = 1.0 / TICK_RATE_HZ as f64;
    let mut host = HeadlessHost::new(dt);
    let mut tick_interval = tokio::time::interval(Duration::from_secs_f64(dt));
    tick_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut tick_count: u64 = 0;

    loop {
        tick_interval.tick().await;

        let commands = session.advance(dt);
        host.apply(&commands);
        host.integrate(dt);

        // Free-flight positions belong to the host; report them back.
        for (id, pos) in host.active_balls() {
            session.set_flight_position(id, pos);
        }

        let now = session.now();
        for (a, b) in host.contact_begins() {
            if session.contact_began(a, b, now) {
                tracing::info!("catch {:?}/{:?} at t={:.3}s", a, b, now);
            }
        }

        tick_count += 1;
        if tick_count % (TICK_RATE_HZ as u64 * 5) == 0 {
            tracing::info!(
                "t={:.1}s balls={} thrown={} caught={}",
                now,
                session.balls().len(),
                session.balls_thrown(),
                session.balls_caught()
            );
        }
    }
}
