/* 3rd party libraries */
use clap::Parser;
use crossbeam_channel as cbc;
use log::{error, info};
use std::io;
use std::path::PathBuf;
use std::thread::{Builder, JoinHandle};

/* Custom libraries */
use config::Config;
use error::Error;
use simulation::{Clock, Control, Simulation, Snapshot};

/* Modules */
mod activity;
mod config;
mod dispatcher;
mod display;
mod elevator;
mod error;
mod generator;
mod rng;
mod shared;
mod simulation;

/// Multi-elevator dispatch simulator
#[derive(Parser, Debug)]
#[clap(version, about)]
struct Args {
    /// Configuration file, defaults to ./config.toml when present
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Seed for a reproducible run, overrides the configuration file
    #[clap(long, value_parser)]
    seed: Option<u64>,

    /// Run on a virtual clock without a terminal UI and print the final state as JSON
    #[clap(long)]
    headless: bool,

    /// Number of ticks to run in headless mode
    #[clap(long, value_parser, default_value_t = 100)]
    ticks: u64,

    /// Start the simulation right away instead of waiting for the start key
    #[clap(long)]
    autostart: bool,
}

/* Main */
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    unwrap_or_exit!(run(args));
}

fn run(args: Args) -> error::Result<()> {
    // Load the configuration
    let mut config = config::load_config(args.config.as_deref())?;
    if args.seed.is_some() {
        config.simulation.seed = args.seed;
    }

    let mut simulation = Simulation::new(&config.simulation);

    if args.headless {
        let now = simulation::run_headless(&mut simulation, args.ticks);
        println!("{}", serde_json::to_string_pretty(&simulation.snapshot(now))?);
        return Ok(());
    }

    if args.autostart {
        simulation.start();
    }
    run_interactive(simulation, &config)
}

fn run_interactive(simulation: Simulation, config: &Config) -> error::Result<()> {
    // Initialize channels
    let (control_tx, control_rx) = cbc::unbounded::<Control>();
    let (snapshot_tx, snapshot_rx) = cbc::unbounded::<Snapshot>();

    let _terminal = display::TerminalGuard::new()?;

    // Start the input module
    let poll_interval = config.display.refresh_rate;
    let input_thread = Builder::new().name("input".into());
    let input_handle = input_thread.spawn(move || display::run_input(control_tx, poll_interval))?;

    // Start the display module
    let display_config = config.display.clone();
    let display_thread = Builder::new().name("display".into());
    let display_handle =
        display_thread.spawn(move || display::run_display(snapshot_rx, &display_config))?;

    // Start the clock
    let clock = Clock::new(simulation, control_rx, snapshot_tx);
    let clock_thread = Builder::new().name("clock".into());
    let clock_handle = clock_thread.spawn(move || clock.run())?;

    let simulation = clock_handle.join().map_err(|_| Error::Thread("clock"))?;
    let input_result = join_worker(input_handle, "input");
    join_worker(display_handle, "display")?;
    input_result?;

    info!(
        "Exited after {} calls and {} trips",
        simulation.stats().total_calls,
        simulation.stats().total_trips
    );
    Ok(())
}

/// Joins a worker thread that reports terminal I/O errors, logging why it stopped.
fn join_worker(handle: JoinHandle<io::Result<()>>, name: &'static str) -> error::Result<()> {
    match handle.join() {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => {
            error!("{} thread stopped: {}", name, e);
            Err(Error::Io(e))
        }
        Err(_) => {
            error!("{} thread panicked", name);
            Err(Error::Thread(name))
        }
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod main_tests {
    use super::*;

    #[test]
    fn test_join_worker_reports_io_error() {
        // Purpose: Verify that a worker's I/O error is returned instead of dropped

        // Arrange
        let handle = Builder::new()
            .name("input".into())
            .spawn(|| Err(io::Error::new(io::ErrorKind::Other, "terminal gone")))
            .unwrap();

        // Act
        let result = join_worker(handle, "input");

        // Assert
        match result {
            Err(Error::Io(e)) => assert_eq!(e.to_string(), "terminal gone"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_join_worker_reports_panic() {
        let handle = Builder::new()
            .name("display".into())
            .spawn(|| -> io::Result<()> { panic!("draw failed") })
            .unwrap();

        assert!(matches!(
            join_worker(handle, "display"),
            Err(Error::Thread("display"))
        ));
    }

    #[test]
    fn test_join_worker_clean_exit() {
        let handle = Builder::new().spawn(|| Ok(())).unwrap();

        assert!(join_worker(handle, "input").is_ok());
    }
}
