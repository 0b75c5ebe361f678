//! empire-runner: headless driver for the Idle Resource Empire core.
//!
//! Usage:
//!   empire-runner --db saves.db --duration-secs 120
//!   empire-runner --db saves.db --ticks 3600
//!   empire-runner --db :memory: --interactive

use anyhow::Result;
use empire_core::{
    config::{load_catalog, EngineConfig},
    engine::{GameEngine, StartSummary},
    format::{format_amount, format_duration_secs},
    ledger,
    store::SqliteStore,
    types::{now_ms, Millis},
};
use std::env;
use std::io::{self, BufRead, Write};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let tick_ms = parse_arg(&args, "--tick-ms", 1000i64);
    let autosave_ms = parse_arg(&args, "--autosave-ms", 60_000i64);
    let duration_secs = parse_arg(&args, "--duration-secs", 0u64);
    let ticks = parse_arg(&args, "--ticks", 0u64);
    let interactive = args.iter().any(|a| a == "--interactive");
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or("saves.db");
    let slot = args
        .windows(2)
        .find(|w| w[0] == "--slot")
        .map(|w| w[1].as_str())
        .unwrap_or("default");
    let catalog_path = args
        .windows(2)
        .find(|w| w[0] == "--catalog")
        .map(|w| w[1].as_str());

    println!("Idle Resource Empire — empire-runner");
    println!("  db:       {db}");
    println!("  slot:     {slot}");
    println!("  tick:     {tick_ms}ms");
    println!("  autosave: {autosave_ms}ms");
    println!();

    let mut config = EngineConfig {
        slot: slot.to_string(),
        autosave_interval_ms: autosave_ms,
        ..EngineConfig::default()
    };
    if let Some(path) = catalog_path {
        config.catalog = load_catalog(path)?;
        log::info!("Loaded catalog from {path} ({} upgrades)", config.catalog.len());
    }

    let store = SqliteStore::open(db)?;
    store.migrate()?;

    let mut engine = GameEngine::new(config, Box::new(store))?;
    let summary = engine.start(now_ms())?;
    print_start(&summary);

    if interactive {
        run_command_loop(&mut engine)?;
    } else if ticks > 0 {
        run_fast_forward(&mut engine, ticks)?;
    } else {
        run_real_time(&mut engine, tick_ms, duration_secs)?;
    }

    engine.suspend(now_ms());
    print_summary(&engine)?;
    Ok(())
}

fn print_start(summary: &StartSummary) {
    println!("session: {}", summary.session_id);
    if let Some(offline) = &summary.offline {
        println!(
            "away {} ({} credited), earned {}",
            format_duration_secs(offline.offline_secs),
            format_duration_secs(offline.credited_secs),
            format_amount(offline.earned)
        );
    } else if !summary.resumed {
        println!("fresh start");
    }
    println!();
}

/// Real-time mode: one engine tick per `tick_ms` of actual wall time,
/// status line every 15 ticks. `duration_secs == 0` runs until killed.
fn run_real_time(engine: &mut GameEngine, tick_ms: i64, duration_secs: u64) -> Result<()> {
    let deadline: Option<Millis> =
        (duration_secs > 0).then(|| now_ms() + duration_secs as Millis * 1000);
    let mut count: u64 = 0;

    loop {
        std::thread::sleep(std::time::Duration::from_millis(tick_ms as u64));
        let now = now_ms();
        let tick = engine.on_tick(now)?;
        count += 1;
        if count % 15 == 0 {
            println!(
                "t+{count:>5} | {} resources | {:.2}/sec",
                format_amount(tick.amount),
                tick.per_second
            );
        }
        if matches!(deadline, Some(d) if now >= d) {
            break;
        }
    }
    Ok(())
}

/// Fast-forward mode: `ticks` synthetic one-second steps with no
/// sleeping, for soak runs and save-file generation.
fn run_fast_forward(engine: &mut GameEngine, ticks: u64) -> Result<()> {
    let start = now_ms();
    for i in 1..=ticks {
        engine.on_tick(start + i as Millis * 1000)?;
    }
    let state = engine.snapshot().expect("started engine has state");
    println!(
        "fast-forwarded {ticks} ticks: {} resources at {:.2}/sec",
        format_amount(state.resources.amount),
        state.resources.per_second
    );
    Ok(())
}

/// Interactive mode: line commands on stdin until `quit` or EOF.
fn run_command_loop(engine: &mut GameEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    println!("commands: state | collect | buy <id> | upgrades | save | quit");
    loop {
        print!("> ");
        stdout.flush()?;
        buffer.clear();
        if handle.read_line(&mut buffer)? == 0 {
            break; // EOF
        }
        let mut parts = buffer.split_whitespace();
        let now = now_ms();
        match parts.next() {
            Some("quit") => break,
            Some("state") => {
                engine.on_tick(now)?;
                let state = engine.snapshot().expect("started engine has state");
                println!("{}", serde_json::to_string_pretty(state)?);
            }
            Some("collect") => {
                engine.on_tick(now)?;
                let amount = engine.on_manual_collect()?;
                println!("collected; balance {}", format_amount(amount));
            }
            Some("buy") => {
                let id = match parts.next().and_then(|s| s.parse().ok()) {
                    Some(id) => id,
                    None => {
                        println!("usage: buy <id>");
                        continue;
                    }
                };
                engine.on_tick(now)?;
                match engine.on_purchase(id) {
                    Ok(receipt) => println!(
                        "bought {} (level {}) for {}; next costs {}; rate {:.2}/sec",
                        receipt.name,
                        receipt.level,
                        format_amount(receipt.cost_paid),
                        format_amount(receipt.next_cost),
                        receipt.per_second
                    ),
                    Err(e) => println!("rejected: {e}"),
                }
            }
            Some("upgrades") => {
                engine.on_tick(now)?;
                let state = engine.snapshot().expect("started engine has state");
                for u in &state.upgrades {
                    let lock = if u.unlocked { " " } else { "*" };
                    println!(
                        "{lock}{:>2}. {:<20} level {:>3} | cost {:>8} | +{:.2}/sec each",
                        u.id,
                        u.name,
                        u.level,
                        format_amount(u.cost),
                        u.base_effect
                    );
                }
                if let Some(next) = ledger::next_locked(&state.upgrades) {
                    println!(" next unlock: {} (buy upgrade {})", next.name, next.id - 1);
                }
            }
            Some("save") => {
                engine.save(now)?;
                println!("saved");
            }
            Some(other) => println!("unknown command: {other}"),
            None => {}
        }
    }
    Ok(())
}

fn print_summary(engine: &GameEngine) -> Result<()> {
    let state = match engine.snapshot() {
        Some(state) => state,
        None => return Ok(()),
    };

    println!();
    println!("=== SESSION SUMMARY ===");
    println!("  resources:  {}", format_amount(state.resources.amount));
    println!("  rate:       {:.2}/sec", state.resources.per_second);
    for u in state.upgrades.iter().filter(|u| u.level > 0) {
        println!("  {:<20} level {}", u.name, u.level);
    }
    println!(
        "  lifetime:   {} earned, {} upgrades bought, {} played",
        format_amount(state.stats.total_resources_earned),
        state.stats.total_upgrades_purchased,
        format_duration_secs(state.stats.total_time_played as f64 / 1000.0)
    );
    if let Some(at) = engine.last_saved_at()? {
        let when = chrono::DateTime::from_timestamp_millis(at)
            .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| format!("{at}ms"));
        println!("  last saved: {when}");
    }
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
