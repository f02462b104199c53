/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, info};
use std::time::{Duration, Instant};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::simulation::{Simulation, Snapshot};

/***************************************/
/*               Enums                 */
/***************************************/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Toggle,
    Reset,
    Quit,
}

enum Event {
    Control(Control),
    Tick,
    TransitionDue,
    Disconnected,
}

/**
 * Drives a `Simulation` in real time.
 *
 * The clock owns the simulation and is its only writer. It waits on three
 * sources at once: the control channel, a ticker that only exists while the
 * simulation runs, and a one-shot timer for the earliest scheduled
 * transition. After every event a fresh snapshot is published.
 *
 * # Fields
 * - `control_rx`:      Receives Start/Pause, Reset and Quit requests.
 * - `snapshot_tx`:     Publishes a snapshot after every handled event.
 * - `ticker`:          Fires every tick period while running, never otherwise.
 * - `started`:         Origin of simulation time.
 */
pub struct Clock {
    simulation: Simulation,
    control_rx: cbc::Receiver<Control>,
    snapshot_tx: cbc::Sender<Snapshot>,
    tick_period: Duration,
    ticker: cbc::Receiver<Instant>,
    started: Instant,
}

/***************************************/
/*             Public API              */
/***************************************/
impl Clock {
    pub fn new(
        simulation: Simulation,
        control_rx: cbc::Receiver<Control>,
        snapshot_tx: cbc::Sender<Snapshot>,
    ) -> Clock {
        let tick_period = Duration::from_millis(simulation.tick_period());
        let mut clock = Clock {
            simulation,
            control_rx,
            snapshot_tx,
            tick_period,
            ticker: cbc::never(),
            started: Instant::now(),
        };
        if clock.simulation.is_running() {
            clock.ticker = cbc::tick(clock.tick_period);
        }
        clock
    }

    /// Runs until `Control::Quit` arrives or the control channel closes.
    /// Returns the simulation as it was left.
    pub fn run(mut self) -> Simulation {
        self.publish();

        loop {
            match self.wait_for_event() {
                Event::Control(Control::Quit) | Event::Disconnected => break,
                Event::Control(control) => self.handle_control(control),
                Event::Tick => {
                    let now = self.now();
                    self.simulation.fire_due(now);
                    self.simulation.tick(now);
                }
                Event::TransitionDue => {
                    let now = self.now();
                    self.simulation.fire_due(now);
                }
            }
            self.publish();
        }

        info!("Clock stopped");
        self.simulation
    }

    fn wait_for_event(&mut self) -> Event {
        let timer = match self.simulation.next_deadline() {
            Some(due) => cbc::after(Duration::from_millis(due.saturating_sub(self.now()))),
            None => cbc::never(),
        };

        cbc::select! {
            recv(self.control_rx) -> control => match control {
                Ok(control) => Event::Control(control),
                Err(_) => Event::Disconnected,
            },
            recv(self.ticker) -> _ => Event::Tick,
            recv(timer) -> _ => Event::TransitionDue,
        }
    }

    fn handle_control(&mut self, control: Control) {
        debug!("Clock received {:?}", control);
        match control {
            Control::Toggle => {
                if self.simulation.toggle() {
                    self.ticker = cbc::tick(self.tick_period);
                } else {
                    self.ticker = cbc::never();
                }
            }
            Control::Reset => {
                self.simulation.reset();
                self.ticker = cbc::never();
            }
            Control::Quit => {}
        }
    }

    fn publish(&self) {
        // The display may already be gone during shutdown
        let _ = self.snapshot_tx.send(self.simulation.snapshot(self.now()));
    }

    fn now(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}

/// Runs `ticks` clock periods on a virtual clock starting at zero.
/// Transitions fire at their exact due times between ticks. Returns the final time.
pub fn run_headless(simulation: &mut Simulation, ticks: u64) -> u64 {
    let period = simulation.tick_period();
    let mut now = 0;

    simulation.start();
    for _ in 0..ticks {
        now += period;
        simulation.fire_due(now);
        simulation.tick(now);
    }

    info!("Headless run finished after {} ticks", ticks);
    now
}
