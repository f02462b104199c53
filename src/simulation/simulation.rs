/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::info;
use serde::Serialize;
use std::collections::VecDeque;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::activity::{ActivityLog, LogCategory, LogEntry};
use crate::config::SimulationConfig;
use crate::dispatcher;
use crate::elevator::ElevatorFSM;
use crate::generator::CallGenerator;
use crate::rng::SimRng;
use crate::shared::{Call, Elevator, SimulationStats};
use crate::simulation::scheduler::Scheduler;

/***************************************/
/*       Public data structures        */
/***************************************/

/// Read-only copy of the simulation handed to the presentation layer.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub now: u64,
    pub running: bool,
    #[serde(rename = "nFloors")]
    pub n_floors: u8,
    pub elevators: Vec<Elevator>,
    pub calls: Vec<Call>,
    pub logs: Vec<LogEntry>,
    pub stats: SimulationStats,
    #[serde(rename = "averageWaitTime")]
    pub average_wait_time: f64,
}

/**
 * The whole simulation state, owned by a single driver.
 *
 * Time is passed in explicitly as milliseconds since the driver started, so
 * the same state can be run against the wall clock or a virtual one.
 *
 * # Fields
 * - `elevators`:   One car per id, index `i` holds id `i + 1`.
 * - `calls`:       Pending hall calls, oldest first.
 * - `activity`:    Bounded newest-first event history.
 * - `stats`:       Call and assignment counters.
 * - `running`:     Run flag. Ticks are ignored while it is cleared.
 * - `scheduler`:   Outstanding door-close and floor-commit transitions.
 */
pub struct Simulation {
    config: SimulationConfig,
    elevators: Vec<Elevator>,
    calls: VecDeque<Call>,
    activity: ActivityLog,
    stats: SimulationStats,
    running: bool,
    generator: CallGenerator,
    fsm: ElevatorFSM,
    scheduler: Scheduler,
    rng: SimRng,
}

/***************************************/
/*             Public API              */
/***************************************/
impl Simulation {
    pub fn new(config: &SimulationConfig) -> Simulation {
        Simulation::with_rng(config, SimRng::new(config.seed))
    }

    pub fn with_rng(config: &SimulationConfig, rng: SimRng) -> Simulation {
        Simulation {
            config: config.clone(),
            elevators: initial_elevators(config.n_elevators),
            calls: VecDeque::new(),
            activity: ActivityLog::new(config.log_capacity),
            stats: SimulationStats::default(),
            running: false,
            generator: CallGenerator::new(config),
            fsm: ElevatorFSM::new(config),
            scheduler: Scheduler::new(),
            rng,
        }
    }

    /// Runs one clock period: generate, dispatch, then step every car in order.
    /// Does nothing while paused.
    pub fn tick(&mut self, now: u64) -> bool {
        if !self.running {
            return false;
        }

        if let Some(call) = self.generator.maybe_generate(&mut self.rng, now) {
            self.add_call(call, now);
        }

        dispatcher::dispatch(
            &mut self.elevators,
            &mut self.calls,
            &mut self.stats,
            &mut self.activity,
            now,
        );

        for index in 0..self.elevators.len() {
            let deferred = self.fsm.advance(
                &mut self.elevators[index],
                &mut self.rng,
                &mut self.activity,
                now,
            );
            if let Some(deferred) = deferred {
                self.scheduler.schedule(now, index, deferred);
            }
        }

        true
    }

    /// Applies every live transition due at or before `now`. Runs while paused.
    pub fn fire_due(&mut self, now: u64) -> usize {
        let mut fired = 0;
        while let Some(due) = self.scheduler.pop_due(now) {
            if let Some(elevator) = self.elevators.get_mut(due.elevator) {
                self.fsm
                    .handle_transition(elevator, due.transition, &mut self.activity, due.at);
                fired += 1;
            }
        }
        fired
    }

    pub fn next_deadline(&mut self) -> Option<u64> {
        self.scheduler.next_deadline()
    }

    pub fn add_call(&mut self, call: Call, now: u64) {
        self.stats.total_calls += 1;
        self.activity.push(
            now,
            LogCategory::Call,
            format!("New {} call on floor {}", call.direction, call.floor),
        );
        self.calls.push_back(call);
    }

    pub fn start(&mut self) {
        if !self.running {
            info!("Simulation started");
            self.running = true;
        }
    }

    pub fn pause(&mut self) {
        if self.running {
            info!("Simulation paused");
            self.running = false;
        }
    }

    pub fn toggle(&mut self) -> bool {
        if self.running {
            self.pause();
        } else {
            self.start();
        }
        self.running
    }

    /// Back to the initial state. Outstanding transitions are cancelled first.
    pub fn reset(&mut self) {
        self.scheduler.cancel_all();
        self.elevators = initial_elevators(self.config.n_elevators);
        self.calls.clear();
        self.activity.clear();
        self.stats = SimulationStats::default();
        self.generator.reset();
        self.fsm.reset();
        self.running = false;
        info!("Simulation reset");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn tick_period(&self) -> u64 {
        self.config.tick_period
    }

    #[cfg(test)]
    pub fn elevators(&self) -> &[Elevator] {
        &self.elevators
    }

    #[cfg(test)]
    pub fn elevators_mut(&mut self) -> &mut [Elevator] {
        &mut self.elevators
    }

    #[cfg(test)]
    pub fn calls(&self) -> impl Iterator<Item = &Call> {
        self.calls.iter()
    }

    #[cfg(test)]
    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    #[cfg(test)]
    pub fn pending_transitions(&mut self) -> usize {
        self.scheduler.len()
    }

    pub fn snapshot(&self, now: u64) -> Snapshot {
        Snapshot {
            now,
            running: self.running,
            n_floors: self.config.n_floors,
            elevators: self.elevators.clone(),
            calls: self.calls.iter().cloned().collect(),
            logs: self.activity.entries().cloned().collect(),
            stats: self.stats.clone(),
            average_wait_time: self.stats.average_wait_time(),
        }
    }
}

fn initial_elevators(n_elevators: u8) -> Vec<Elevator> {
    (1..=n_elevators).map(Elevator::new).collect()
}
