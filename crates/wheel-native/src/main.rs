use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use wheel_core::{
    select_weighted, CenterAngle, ManualClock, RandomSource, Segment, SpinEngine, SpinResult,
    SpinState, WheelConfig,
};

// Safety net so a misconfigured run can't loop forever (ten minutes of frames at 60fps)
const MAX_FRAMES_PER_SPIN: u32 = 36_000;
// Radius of the synthetic pointer path used for --fling, in screen units
const FLING_RADIUS: f64 = 100.0;
const FLING_SAMPLES: u32 = 6;

#[derive(Parser)]
#[command(name = "wheel-native", about = "Headless prize wheel simulator")]
struct Cli {
    /// JSON wheel configuration; a demo wheel is used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Number of spins to animate
    #[arg(short, long, default_value_t = 1)]
    spins: u32,
    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
    /// Simulated display refresh rate
    #[arg(long, default_value_t = 60.0)]
    fps: f64,
    /// Start each spin with a drag released at this speed (degrees per frame)
    #[arg(long)]
    fling: Option<f64>,
    /// Only run the selector this many times and print frequencies
    #[arg(long)]
    trials: Option<u32>,
    /// Print each result as a JSON line
    #[arg(long)]
    json: bool,
    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => demo_config(),
    };
    config.validate().context("invalid wheel configuration")?;
    if !(cli.fps.is_finite() && cli.fps > 0.0) {
        bail!("--fps must be positive, got {}", cli.fps);
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if let Some(trials) = cli.trials {
        print_frequencies(&config, trials, &mut rng);
        return Ok(());
    }

    run_spins(&cli, config, rng)
}

fn load_config(path: &Path) -> Result<WheelConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn demo_config() -> WheelConfig {
    let prizes = [
        ("free-shipping", "Free shipping", "SHIP", 3.0),
        ("ten-off", "10% off", "TEN", 2.0),
        ("no-luck", "No luck", "", 4.0),
        ("twenty-off", "20% off", "TWENTY", 1.0),
        ("gift", "Mystery gift", "GIFT", 0.5),
        ("five-off", "5% off", "FIVE", 3.0),
    ];
    WheelConfig::new(
        prizes
            .iter()
            .map(|(id, label, value, w)| Segment::new(*id, *label, *value).with_weight(*w))
            .collect(),
    )
}

fn print_frequencies(config: &WheelConfig, trials: u32, rng: &mut dyn RandomSource) {
    let mut counts = vec![0u32; config.segments.len()];
    for _ in 0..trials {
        if let Some(i) = select_weighted(&config.segments, rng) {
            counts[i] += 1;
        }
    }
    let total: f64 = config.segments.iter().map(Segment::effective_weight).sum();
    println!("{:<16} {:>9} {:>9}", "segment", "expected", "observed");
    for (seg, count) in config.segments.iter().zip(&counts) {
        let expected = if total > 0.0 {
            seg.effective_weight() / total
        } else {
            1.0 / config.segments.len() as f64
        };
        let observed = f64::from(*count) / f64::from(trials.max(1));
        println!(
            "{:<16} {:>8.2}% {:>8.2}%",
            seg.id,
            expected * 100.0,
            observed * 100.0
        );
    }
}

fn run_spins(cli: &Cli, config: WheelConfig, rng: StdRng) -> Result<()> {
    let clock = ManualClock::new();
    let frame_dt =
        Duration::try_from_secs_f64(1.0 / cli.fps).context("--fps is too small to step")?;
    let results: Rc<RefCell<Vec<SpinResult>>> = Rc::new(RefCell::new(Vec::new()));

    let mut engine = SpinEngine::new(config)?
        .with_rng(rng)
        .with_clock(clock.clone())
        .with_angle_source(CenterAngle::new(0.0, 0.0));
    {
        let results = results.clone();
        engine.on_spin_complete(move |r| results.borrow_mut().push(r.clone()));
    }
    engine.on_frame(|f| {
        if f.peg_bump {
            log::debug!("[frame] peg bump at {:.2}° ({:.2})", f.rotation, f.deflection);
        }
    });

    for n in 0..cli.spins {
        let started = match cli.fling {
            Some(speed) => fling(&mut engine, &clock, frame_dt, speed),
            None => engine.spin().is_started(),
        };
        if !started {
            log::warn!("[spin] spin {} did not start (state {:?})", n + 1, engine.state());
            continue;
        }

        let mut frames = 0u32;
        let mut bumps = 0u32;
        while engine.state() != SpinState::Idle {
            clock.advance(frame_dt);
            if let Some(frame) = engine.tick() {
                if frame.peg_bump && frame.state == SpinState::Spinning {
                    bumps += 1;
                }
            }
            frames += 1;
            if frames > MAX_FRAMES_PER_SPIN {
                bail!("spin {} did not settle after {} frames", n + 1, frames);
            }
        }
        log::debug!("[spin] {} frames, {} peg bumps", frames, bumps);
    }

    for r in results.borrow().iter() {
        if cli.json {
            println!("{}", serde_json::to_string(r)?);
        } else {
            println!(
                "#{:<2} {:<16} rotation {:>9.2}° in {:.2}s",
                r.index,
                r.segment.label,
                r.rotation,
                r.duration.as_secs_f64()
            );
        }
    }
    engine.teardown();
    Ok(())
}

/// Drag the wheel round a circle at `speed` degrees per frame and let go.
fn fling(engine: &mut SpinEngine, clock: &ManualClock, frame_dt: Duration, speed: f64) -> bool {
    let point = |deg: f64| {
        let rad = deg.to_radians();
        (FLING_RADIUS * rad.sin(), -FLING_RADIUS * rad.cos())
    };
    let start = engine.rotation();
    let (x, y) = point(start);
    if !engine.begin_drag(x, y) {
        return false;
    }
    for i in 1..=FLING_SAMPLES {
        clock.advance(frame_dt);
        let (x, y) = point(start + speed * f64::from(i));
        engine.update_drag(x, y);
    }
    let velocity = engine.end_drag();
    log::info!("[drag] released at {:.2}°/frame", velocity);
    engine.state() == SpinState::Spinning
}
