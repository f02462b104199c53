/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::collections::VecDeque;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::activity::{ActivityLog, LogCategory};
use crate::shared::{Call, CallDirection, Direction, Elevator, SimulationStats};

/***************************************/
/*             Constants               */
/***************************************/
const DISTANCE_WEIGHT: i64 = 10;
const PASSENGER_WEIGHT: i64 = 5;
const TARGET_WEIGHT: i64 = 3;
const SAME_DIRECTION_BONUS: i64 = 20;
const IDLE_BONUS: i64 = 15;

/***************************************/
/*             Public API              */
/***************************************/

/// Cost of sending `elevator` to `call`. Lower is better.
pub fn score(elevator: &Elevator, call: &Call) -> i64 {
    let distance = (elevator.floor as i64 - call.floor as i64).abs();

    let mut score = distance * DISTANCE_WEIGHT
        + elevator.passengers.len() as i64 * PASSENGER_WEIGHT
        + elevator.target_floors.len() as i64 * TARGET_WEIGHT;

    // Already heading the right way and has not passed the call floor
    if elevator.direction == Direction::from(call.direction) {
        let on_the_way = match call.direction {
            CallDirection::Up => elevator.floor <= call.floor,
            CallDirection::Down => elevator.floor >= call.floor,
        };
        if on_the_way {
            score -= SAME_DIRECTION_BONUS;
        }
    }

    if elevator.direction == Direction::Idle {
        score -= IDLE_BONUS;
    }

    score
}

/// Index of the lowest scoring elevator, first one on ties. `None` without elevators.
pub fn find_best_elevator(elevators: &[Elevator], call: &Call) -> Option<usize> {
    let mut best: Option<(usize, i64)> = None;

    for (index, elevator) in elevators.iter().enumerate() {
        let candidate = score(elevator, call);
        match best {
            Some((_, best_score)) if candidate >= best_score => {}
            _ => best = Some((index, candidate)),
        }
    }

    best.map(|(index, _)| index)
}

/// Commits `elevator` to serving `call`.
pub fn assign_call(elevator: &mut Elevator, call: &Call) {
    elevator.target_floors.insert(call.floor);

    if elevator.direction == Direction::Idle {
        elevator.direction = if call.floor > elevator.floor {
            Direction::Up
        } else if call.floor < elevator.floor {
            Direction::Down
        } else {
            Direction::Idle
        };
    }
}

/**
 * Assigns the oldest pending call, if any, to the best elevator.
 *
 * Only the head of the queue is looked at. With no elevators the call stays
 * queued. Returns the index of the elevator that took the call.
 */
pub fn dispatch(
    elevators: &mut [Elevator],
    calls: &mut VecDeque<Call>,
    stats: &mut SimulationStats,
    activity: &mut ActivityLog,
    now: u64,
) -> Option<usize> {
    let call = calls.front()?;
    let index = find_best_elevator(elevators, call)?;
    let call = calls.pop_front()?;

    let elevator = &mut elevators[index];
    assign_call(elevator, &call);

    stats.record_assignment(now.saturating_sub(call.created_at));
    activity.push(
        now,
        LogCategory::System,
        format!("Elevator {} assigned to floor {}", elevator.id, call.floor),
    );

    Some(index)
}
