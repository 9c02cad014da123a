use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use spinwheel::label::{Label, LabelSet};
use spinwheel::protocol::{ControlCommand, SOCKET_PATH};
use spinwheel::wheel::{IndexPolicy, RandomSource, SpinConfig, SpinSource, Tick, Wheel};
use std::io::Write;
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "spinwheel", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Show the wheel overlay
    Show,
    /// Hide the wheel overlay, abandoning any running spin
    Hide,
    /// Spin the wheel in the running daemon
    Spin,
    /// Add a name to the wheel
    Add { name: String },
    /// Remove a name from the wheel
    Remove { name: String },
    /// Remove every name from the wheel
    Clear,
    /// Spin a wheel offline and print the winner
    Pick {
        /// Names to put on the wheel
        #[arg(required = true)]
        names: Vec<String>,

        /// Seed for a reproducible pick
        #[arg(short, long)]
        seed: Option<u64>,

        /// Map the resting angle with the (N - 1) multiplier
        #[arg(long)]
        legacy: bool,

        /// Simulated frame rate, up to 1000
        #[arg(long, default_value_t = 60.0)]
        fps: f64,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Show => send_command(&ControlCommand::Show),
        Commands::Hide => send_command(&ControlCommand::Hide),
        Commands::Spin => send_command(&ControlCommand::Spin),
        Commands::Clear => send_command(&ControlCommand::Clear),
        Commands::Add { name } => send_command(&ControlCommand::Add(Label::new(name))),
        Commands::Remove { name } => send_command(&ControlCommand::Remove(Label::new(name))),
        Commands::Pick {
            names,
            seed,
            legacy,
            fps,
        } => pick(names, seed, legacy, fps),
    }
}

const MAX_FPS: f64 = 1000.0;

fn check_fps(fps: f64) -> anyhow::Result<f64> {
    if !(fps > 0.0 && fps <= MAX_FPS) {
        anyhow::bail!("--fps must be in (0, {}], got {}", MAX_FPS, fps);
    }
    Ok(fps)
}

fn pick(names: Vec<String>, seed: Option<u64>, legacy: bool, fps: f64) -> anyhow::Result<()> {
    let fps = check_fps(fps)?;

    let labels = LabelSet::from_names(&names);
    if labels.is_empty() {
        anyhow::bail!("No usable names were given.");
    }

    let config = SpinConfig {
        index_policy: if legacy {
            IndexPolicy::Legacy
        } else {
            IndexPolicy::Uniform
        },
        ..SpinConfig::default()
    };

    let winner = match seed {
        Some(seed) => run_headless(
            Wheel::with_source(config, RandomSource::new(StdRng::seed_from_u64(seed)))?,
            &labels,
            fps,
        ),
        None => run_headless(Wheel::new(config)?, &labels, fps),
    }?;

    println!("{}", winner);
    Ok(())
}

/// Drives the wheel with a simulated frame clock until it stops.
fn run_headless<S: SpinSource>(
    mut wheel: Wheel<S>,
    labels: &LabelSet,
    fps: f64,
) -> anyhow::Result<Label> {
    if !wheel.start_spin(labels.as_slice(), |_| {}) {
        anyhow::bail!("The wheel refused to spin.");
    }

    let frame_ms = 1000.0 / fps;
    let mut frame = 0u64;
    loop {
        match wheel.tick(frame as f64 * frame_ms) {
            Tick::Frame { rotation } => log::trace!("frame {}: {:.4} rad", frame, rotation),
            Tick::Resolved { selection, .. } => return Ok(selection),
            Tick::Idle => anyhow::bail!("The wheel stopped without a winner."),
        }
        frame += 1;
    }
}

fn send_command(cmd: &ControlCommand) -> anyhow::Result<()> {
    let line = cmd.to_line()?;
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to classwheel daemon at {}: {}. Is classwheel running?",
            SOCKET_PATH,
            e
        )
    })?;

    stream.write_all(line.as_bytes())?;
    Ok(())
}
