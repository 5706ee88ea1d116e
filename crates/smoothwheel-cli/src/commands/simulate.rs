use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use smoothwheel_core::{AppConfig, FixedDisplays, FrameClock, TunableSource};
use smoothwheel_engine::{
    Axis, MemoryStore, ScrollEngine, ScrollSession, ScrollStore, SurfaceEvent, WheelEvent,
};

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Wheel rotations, one per frame; `0` is a frame with no wheel input (e.g. `1 1 0 0.5`)
    #[arg(required = true, allow_negative_numbers = true)]
    rotations: Vec<f64>,

    /// Animation rate, overrides the configured refresh rate
    #[arg(long)]
    fps: Option<u32>,

    /// Lines per wheel notch
    #[arg(short = 'a', long, default_value_t = 3)]
    scroll_amount: u32,

    /// Scroll sideways (as if a modifier were held)
    #[arg(long)]
    horizontal: bool,

    /// Maximum frames to coast after the last wheel event
    #[arg(short = 't', long, default_value_t = 600)]
    ticks: u32,

    /// Print one JSON object per frame
    #[arg(long)]
    json: bool,

    /// Drive the engine from the real frame timer instead of stepping frames
    #[arg(long)]
    realtime: bool,
}

#[derive(Debug, Serialize)]
struct Frame {
    frame: u32,
    elapsed_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    rotation: Option<f64>,
    velocity: f64,
    axis: Axis,
    offset: i32,
}

/// The simulator has no display of its own: an explicit rate or the fallback
fn frame_clock(config: &AppConfig, fps: Option<u32>) -> Result<FrameClock> {
    let clock = match fps.or(config.display.refresh_rate_hz) {
        Some(rate) => FrameClock::detect(
            &FixedDisplays(vec![rate]),
            config.display.fallback_refresh_rate_hz,
        )?,
        None => FrameClock::new(config.display.fallback_refresh_rate_hz)?,
    };
    Ok(clock)
}

/// A rotation of zero means the wheel was idle that frame
fn wheel_event(args: &SimulateArgs, rotation: f64) -> Option<WheelEvent> {
    (rotation != 0.0).then_some(WheelEvent {
        rotation,
        scroll_amount: args.scroll_amount,
        horizontal: args.horizontal,
    })
}

pub async fn run(config: &AppConfig, args: SimulateArgs) -> Result<()> {
    let clock = frame_clock(config, args.fps)?;
    if args.realtime {
        return run_realtime(config, args, clock).await;
    }

    let frames = replay(config, &args, clock)?;
    for record in &frames {
        print_frame(&args, record)?;
    }

    if let Some(last) = frames.last() {
        info!(
            "Came to rest at offset {} after {} frames",
            last.offset, last.frame
        );
    }

    Ok(())
}

/// Step the engine one frame per rotation, then let it coast to rest
fn replay(config: &AppConfig, args: &SimulateArgs, clock: FrameClock) -> Result<Vec<Frame>> {
    let mut store = MemoryStore::default();
    let mut engine = ScrollEngine::attach(&mut store, config.scroll.clone(), clock);
    let mut frames = Vec::new();

    for &rotation in &args.rotations {
        if let Some(event) = wheel_event(args, rotation) {
            let outcome = engine.on_wheel_event(&event)?;
            debug!(rotation, ?outcome, "Wheel");
        }

        engine.on_timer_tick(&mut store)?;
        frames.push(snapshot(&engine, &store, frames.len(), Some(rotation)));
    }

    engine.on_scroll_settled();

    for _ in 0..args.ticks {
        if !engine.is_moving() {
            break;
        }
        engine.on_timer_tick(&mut store)?;
        frames.push(snapshot(&engine, &store, frames.len(), None));
    }

    Ok(frames)
}

fn snapshot<C: TunableSource>(
    engine: &ScrollEngine<C>,
    store: &MemoryStore,
    index: usize,
    rotation: Option<f64>,
) -> Frame {
    let frame = index as u32 + 1;
    Frame {
        frame,
        elapsed_ms: f64::from(frame) * engine.clock().millis(),
        rotation,
        velocity: engine.velocity(),
        axis: engine.axis(),
        offset: store.offset(engine.axis()),
    }
}

fn print_frame(args: &SimulateArgs, record: &Frame) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string(record)?);
    } else {
        let wheel = record
            .rotation
            .filter(|r| *r != 0.0)
            .map(|r| format!("{:+.2}", r))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>5} {:>8.0}ms  wheel {:>6}  v {:>+9.4}  offset {}",
            record.frame, record.elapsed_ms, wheel, record.velocity, record.offset
        );
    }

    Ok(())
}

async fn run_realtime(config: &AppConfig, args: SimulateArgs, clock: FrameClock) -> Result<()> {
    let (tx, rx) = mpsc::channel(64);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut session = ScrollSession::attach(MemoryStore::default(), config.scroll.clone(), clock);

    let period = clock.tick_interval();
    let ticks = args.ticks;
    let script: Vec<Option<WheelEvent>> = args
        .rotations
        .iter()
        .map(|&rotation| wheel_event(&args, rotation))
        .collect();

    tokio::spawn(async move {
        for event in script {
            if let Some(event) = event {
                if tx.send(SurfaceEvent::Wheel(event)).await.is_err() {
                    return;
                }
            }
            tokio::time::sleep(period).await;
        }

        let _ = tx.send(SurfaceEvent::Settled).await;
        tokio::time::sleep(period.saturating_mul(ticks)).await;
        let _ = tx.send(SurfaceEvent::Detach).await;
    });

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(true);
        }
    });

    session.run(rx, shutdown_rx).await;

    let axis = session.engine().axis();
    let store = session.detach();
    println!(
        "Final {:?} offset {} after {} writes",
        axis,
        store.offset(axis),
        store.writes().len()
    );

    Ok(())
}
