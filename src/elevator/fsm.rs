/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::debug;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::activity::{ActivityLog, LogCategory};
use crate::config::SimulationConfig;
use crate::rng::SimRng;
use crate::shared::{Direction, Elevator, Passenger};

/***************************************/
/*       Public data structures        */
/***************************************/

/// A state change that completes some time after the step that started it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    CloseDoors,
    CommitMove { floor: u8 },
}

/// A transition to apply once `delay` milliseconds have passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deferred {
    pub delay: u64,
    pub transition: Transition,
}

/**
 * Steps the elevators of the building.
 *
 * The `ElevatorFSM` (Finite State Machine) holds the building parameters shared
 * by all cars and advances one car at a time. A step either opens the doors at
 * the current floor, starts a move to the neighbouring floor, or does nothing.
 * Opening doors and starting a move both return a `Deferred` transition that
 * the caller must apply later with `handle_transition`.
 *
 * # Fields
 * - `n_floors`:            Number of floors, numbered 1 to `n_floors`.
 * - `move_time`:           Time a single floor move takes, also the minimum time between moves.
 * - `door_open_time`:      Time the doors stay open at a stop.
 * - `pickup_probability`:  Chance that a passenger boards at a stop.
 * - `max_passengers`:      Optional car capacity. A full car takes no one on.
 * - `next_passenger_id`:   Id handed to the next boarding passenger.
 */
pub struct ElevatorFSM {
    n_floors: u8,
    move_time: u64,
    door_open_time: u64,
    pickup_probability: f64,
    max_passengers: Option<usize>,
    next_passenger_id: u64,
}

impl ElevatorFSM {
    pub fn new(config: &SimulationConfig) -> ElevatorFSM {
        ElevatorFSM {
            n_floors: config.n_floors,
            move_time: config.move_time,
            door_open_time: config.door_open_time,
            pickup_probability: config.pickup_probability,
            max_passengers: config.max_passengers,
            next_passenger_id: 0,
        }
    }

    pub fn reset(&mut self) {
        self.next_passenger_id = 0;
    }

    /// Advances `elevator` by one step.
    pub fn advance(
        &mut self,
        elevator: &mut Elevator,
        rng: &mut SimRng,
        activity: &mut ActivityLog,
        now: u64,
    ) -> Option<Deferred> {
        // Busy until the pending transition fires
        if elevator.is_moving || elevator.is_door_open {
            return None;
        }

        if let Some(last_move) = elevator.last_move {
            if now.saturating_sub(last_move) < self.move_time {
                return None;
            }
        }

        if self.should_stop(elevator) {
            Some(self.stop_at_floor(elevator, rng, activity, now))
        } else {
            self.start_moving(elevator, now)
        }
    }

    /// Applies a transition previously returned by `advance`.
    pub fn handle_transition(
        &self,
        elevator: &mut Elevator,
        transition: Transition,
        activity: &mut ActivityLog,
        now: u64,
    ) {
        match transition {
            Transition::CloseDoors => {
                elevator.is_door_open = false;
                debug!("Elevator {} closed doors at floor {}", elevator.id, elevator.floor);
            }
            Transition::CommitMove { floor } => {
                elevator.floor = floor;
                elevator.is_moving = false;
                activity.push(
                    now,
                    LogCategory::Movement,
                    format!("Elevator {} moved to floor {}", elevator.id, floor),
                );
            }
        }
    }

    fn should_stop(&self, elevator: &Elevator) -> bool {
        elevator.target_floors.contains(&elevator.floor)
            || elevator
                .passengers
                .iter()
                .any(|p| p.destination_floor == elevator.floor)
    }

    fn stop_at_floor(
        &mut self,
        elevator: &mut Elevator,
        rng: &mut SimRng,
        activity: &mut ActivityLog,
        now: u64,
    ) -> Deferred {
        let floor = elevator.floor;
        elevator.is_door_open = true;
        elevator.target_floors.remove(&floor);

        // Drop off
        let before = elevator.passengers.len();
        elevator.passengers.retain(|p| p.destination_floor != floor);
        let dropped = before - elevator.passengers.len();
        if dropped > 0 {
            activity.push(
                now,
                LogCategory::Dropoff,
                format!(
                    "Elevator {} dropped off {} passenger(s) at floor {}",
                    elevator.id, dropped, floor
                ),
            );
        }

        // Pick up
        let has_room = self
            .max_passengers
            .map_or(true, |max| elevator.passengers.len() < max);
        if has_room && rng.gen_bool(self.pickup_probability) {
            if let Some(destination) = self.choose_destination(elevator, rng) {
                self.board_passenger(elevator, destination, activity, now);
            }
        }

        Deferred {
            delay: self.door_open_time,
            transition: Transition::CloseDoors,
        }
    }

    // Destination ahead of the car, or any other floor for an idle car
    fn choose_destination(&self, elevator: &Elevator, rng: &mut SimRng) -> Option<u8> {
        let floor = elevator.floor;
        match elevator.direction {
            Direction::Up if floor < self.n_floors => Some(rng.gen_range(floor + 1..=self.n_floors)),
            Direction::Down if floor > 1 => Some(rng.gen_range(1..floor)),
            Direction::Idle if self.n_floors > 1 => {
                let pick = rng.gen_range(1..self.n_floors);
                Some(if pick >= floor { pick + 1 } else { pick })
            }
            _ => None,
        }
    }

    fn board_passenger(
        &mut self,
        elevator: &mut Elevator,
        destination: u8,
        activity: &mut ActivityLog,
        now: u64,
    ) {
        // An idle car heads for its new passenger
        if elevator.direction == Direction::Idle {
            elevator.direction = if destination > elevator.floor {
                Direction::Up
            } else {
                Direction::Down
            };
        }

        self.next_passenger_id += 1;
        elevator.passengers.push(Passenger {
            id: self.next_passenger_id,
            origin_floor: elevator.floor,
            destination_floor: destination,
            direction: elevator.direction,
        });
        elevator.target_floors.insert(destination);

        activity.push(
            now,
            LogCategory::Pickup,
            format!(
                "Elevator {} picked up passenger to floor {}",
                elevator.id, destination
            ),
        );
    }

    fn start_moving(&self, elevator: &mut Elevator, now: u64) -> Option<Deferred> {
        elevator.direction = self.choose_direction(elevator);

        let next_floor = match elevator.direction {
            Direction::Up if elevator.floor < self.n_floors => elevator.floor + 1,
            Direction::Down if elevator.floor > 1 => elevator.floor - 1,
            _ => return None,
        };

        elevator.is_moving = true;
        elevator.last_move = Some(now);

        Some(Deferred {
            delay: self.move_time,
            transition: Transition::CommitMove { floor: next_floor },
        })
    }

    fn choose_direction(&self, elevator: &Elevator) -> Direction {
        let floor = elevator.floor;
        let has_targets = !elevator.target_floors.is_empty();

        match elevator.direction {
            // Turn around at the ends of the shaft
            Direction::Up if floor >= self.n_floors => {
                if has_targets {
                    Direction::Down
                } else {
                    Direction::Idle
                }
            }
            Direction::Down if floor <= 1 => {
                if has_targets {
                    Direction::Up
                } else {
                    Direction::Idle
                }
            }

            // Nothing left to do
            _ if !elevator.has_work() => Direction::Idle,

            // Start moving if necessary
            Direction::Idle => {
                if self.has_orders_in_direction(elevator, Direction::Up) {
                    Direction::Up
                } else if self.has_orders_in_direction(elevator, Direction::Down) {
                    Direction::Down
                } else {
                    Direction::Idle
                }
            }

            direction => direction,
        }
    }

    fn has_orders_in_direction(&self, elevator: &Elevator, direction: Direction) -> bool {
        let floor = elevator.floor;
        let mut destinations = elevator
            .target_floors
            .iter()
            .copied()
            .chain(elevator.passengers.iter().map(|p| p.destination_floor));

        match direction {
            Direction::Up => destinations.any(|f| f > floor),
            Direction::Down => destinations.any(|f| f < floor),
            Direction::Idle => false,
        }
    }
}
