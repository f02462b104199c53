/*
 * Unit tests for elevator module
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - test_fsm_stop_at_target_without_pickup
 * - test_fsm_stop_at_target_with_pickup
 * - test_fsm_dropoff
 * - test_fsm_busy_elevator_is_skipped
 * - test_fsm_move_gate
 * - test_fsm_start_and_commit_move
 * - test_fsm_reverse_at_top
 * - test_fsm_reverse_at_bottom
 * - test_fsm_no_work_goes_idle
 * - test_fsm_idle_with_targets_starts_moving
 * - test_fsm_idle_pickup_sets_direction
 * - test_fsm_pickup_respects_capacity
 * - test_fsm_close_doors
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod fsm_tests {
    use crate::activity::{ActivityLog, LogCategory};
    use crate::config::SimulationConfig;
    use crate::elevator::{Deferred, ElevatorFSM, Transition};
    use crate::rng::SimRng;
    use crate::shared::Direction::{Down, Idle, Up};
    use crate::shared::{Elevator, Passenger};

    fn setup_fsm(pickup_probability: f64) -> (ElevatorFSM, SimRng, ActivityLog) {
        // Default configuration
        let config = SimulationConfig {
            n_floors: 10,
            move_time: 1000,
            door_open_time: 3000,
            pickup_probability,
            seed: Some(4145),
            ..SimulationConfig::default()
        };

        (
            ElevatorFSM::new(&config),
            SimRng::new(config.seed),
            ActivityLog::new(50),
        )
    }

    fn passenger(id: u64, destination_floor: u8) -> Passenger {
        Passenger {
            id,
            origin_floor: 1,
            destination_floor,
            direction: Up,
        }
    }

    #[test]
    fn test_fsm_stop_at_target_without_pickup() {
        // Purpose: Verify that reaching a target floor opens the doors and clears the target

        // Arrange
        let (mut fsm, mut rng, mut activity) = setup_fsm(0.0);
        let mut elevator = Elevator::new(1);
        elevator.floor = 5;
        elevator.target_floors.insert(5);

        // Act
        let deferred = fsm.advance(&mut elevator, &mut rng, &mut activity, 10_000);

        // Assert
        assert_eq!(
            deferred,
            Some(Deferred {
                delay: 3000,
                transition: Transition::CloseDoors
            })
        );
        assert!(elevator.is_door_open);
        assert!(!elevator.is_moving);
        assert!(elevator.target_floors.is_empty());
        assert!(activity.is_empty());
    }

    #[test]
    fn test_fsm_stop_at_target_with_pickup() {
        // Purpose: Verify that a boarding passenger is recorded and becomes a target

        // Arrange
        let (mut fsm, mut rng, mut activity) = setup_fsm(1.0);
        let mut elevator = Elevator::new(2);
        elevator.floor = 5;
        elevator.direction = Up;
        elevator.target_floors.insert(5);

        // Act
        fsm.advance(&mut elevator, &mut rng, &mut activity, 0);

        // Assert
        assert_eq!(elevator.passengers.len(), 1);
        let destination = elevator.passengers[0].destination_floor;
        assert!(destination > 5 && destination <= 10);
        assert_eq!(elevator.passengers[0].origin_floor, 5);
        assert_eq!(elevator.passengers[0].direction, Up);
        assert!(elevator.target_floors.contains(&destination));

        let entries: Vec<_> = activity.entries().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, LogCategory::Pickup);
        assert_eq!(
            entries[0].message,
            format!("Elevator 2 picked up passenger to floor {}", destination)
        );
    }

    #[test]
    fn test_fsm_dropoff() {
        // Purpose: Verify that every passenger bound for the floor leaves, and only them

        // Arrange
        let (mut fsm, mut rng, mut activity) = setup_fsm(0.0);
        let mut elevator = Elevator::new(3);
        elevator.floor = 4;
        elevator.direction = Up;
        elevator.passengers = vec![passenger(1, 4), passenger(2, 4), passenger(3, 8)];
        elevator.target_floors.extend([4, 8]);

        // Act
        fsm.advance(&mut elevator, &mut rng, &mut activity, 0);

        // Assert
        assert!(elevator.is_door_open);
        assert_eq!(elevator.passengers.len(), 1);
        assert_eq!(elevator.passengers[0].destination_floor, 8);
        assert_eq!(elevator.target_floors.iter().copied().collect::<Vec<_>>(), vec![8]);

        let entry = activity.entries().next().unwrap();
        assert_eq!(entry.category, LogCategory::Dropoff);
        assert_eq!(entry.message, "Elevator 3 dropped off 2 passenger(s) at floor 4");
    }

    #[test]
    fn test_fsm_busy_elevator_is_skipped() {
        // Purpose: Verify that a moving car or a car with open doors ignores steps

        // Arrange
        let (mut fsm, mut rng, mut activity) = setup_fsm(1.0);
        let mut moving = Elevator::new(1);
        moving.is_moving = true;
        moving.direction = Up;
        moving.target_floors.insert(1);

        let mut open = Elevator::new(2);
        open.is_door_open = true;
        open.target_floors.insert(1);

        // Act
        let moving_result = fsm.advance(&mut moving, &mut rng, &mut activity, 0);
        let open_result = fsm.advance(&mut open, &mut rng, &mut activity, 0);

        // Assert
        assert_eq!(moving_result, None);
        assert_eq!(open_result, None);
        assert!(moving.target_floors.contains(&1));
        assert!(open.target_floors.contains(&1));
        assert!(activity.is_empty());
    }

    #[test]
    fn test_fsm_move_gate() {
        // Purpose: Verify that a car that just moved waits out the move period

        // Arrange
        let (mut fsm, mut rng, mut activity) = setup_fsm(0.0);
        let mut elevator = Elevator::new(1);
        elevator.floor = 3;
        elevator.direction = Up;
        elevator.target_floors.insert(6);
        elevator.last_move = Some(5000);

        // Act
        let too_soon = fsm.advance(&mut elevator, &mut rng, &mut activity, 5999);
        let on_time = fsm.advance(&mut elevator, &mut rng, &mut activity, 6000);

        // Assert
        assert_eq!(too_soon, None);
        assert!(on_time.is_some());
        assert!(elevator.is_moving);
    }

    #[test]
    fn test_fsm_start_and_commit_move() {
        // Purpose: Verify that a move is started at once and committed by the transition

        // Arrange
        let (mut fsm, mut rng, mut activity) = setup_fsm(0.0);
        let mut elevator = Elevator::new(4);
        elevator.floor = 2;
        elevator.direction = Up;
        elevator.target_floors.insert(5);

        // Act
        let deferred = fsm
            .advance(&mut elevator, &mut rng, &mut activity, 2000)
            .unwrap();

        // Assert
        assert_eq!(deferred.delay, 1000);
        assert_eq!(deferred.transition, Transition::CommitMove { floor: 3 });
        assert!(elevator.is_moving);
        assert!(!elevator.is_door_open);
        assert_eq!(elevator.last_move, Some(2000));
        assert_eq!(elevator.floor, 2);
        assert!(activity.is_empty());

        // Act
        fsm.handle_transition(&mut elevator, deferred.transition, &mut activity, 3000);

        // Assert
        assert_eq!(elevator.floor, 3);
        assert!(!elevator.is_moving);
        let entry = activity.entries().next().unwrap();
        assert_eq!(entry.category, LogCategory::Movement);
        assert_eq!(entry.message, "Elevator 4 moved to floor 3");
        assert_eq!(entry.timestamp, 3000);
    }

    #[test]
    fn test_fsm_reverse_at_top() {
        // Purpose: Verify the turnaround rules at the top floor

        // Arrange
        let (mut fsm, mut rng, mut activity) = setup_fsm(0.0);
        let mut with_targets = Elevator::new(1);
        with_targets.floor = 10;
        with_targets.direction = Up;
        with_targets.target_floors.insert(4);

        let mut without_targets = Elevator::new(2);
        without_targets.floor = 10;
        without_targets.direction = Up;

        // Act
        let turned = fsm.advance(&mut with_targets, &mut rng, &mut activity, 0);
        let stopped = fsm.advance(&mut without_targets, &mut rng, &mut activity, 0);

        // Assert
        assert_eq!(with_targets.direction, Down);
        assert_eq!(turned.unwrap().transition, Transition::CommitMove { floor: 9 });
        assert_eq!(without_targets.direction, Idle);
        assert_eq!(stopped, None);
        assert!(!without_targets.is_moving);
        assert_eq!(without_targets.last_move, None);
    }

    #[test]
    fn test_fsm_reverse_at_bottom() {
        // Purpose: Verify the turnaround rules at the bottom floor

        let (mut fsm, mut rng, mut activity) = setup_fsm(0.0);
        let mut elevator = Elevator::new(1);
        elevator.floor = 1;
        elevator.direction = Down;
        elevator.target_floors.insert(7);

        let deferred = fsm.advance(&mut elevator, &mut rng, &mut activity, 0);

        assert_eq!(elevator.direction, Up);
        assert_eq!(deferred.unwrap().transition, Transition::CommitMove { floor: 2 });
    }

    #[test]
    fn test_fsm_no_work_goes_idle() {
        // Purpose: Verify that a car without targets or passengers settles to idle in place

        let (mut fsm, mut rng, mut activity) = setup_fsm(0.0);
        let mut elevator = Elevator::new(1);
        elevator.floor = 6;
        elevator.direction = Down;

        let deferred = fsm.advance(&mut elevator, &mut rng, &mut activity, 0);

        assert_eq!(deferred, None);
        assert_eq!(elevator.direction, Idle);
        assert_eq!(elevator.floor, 6);
        assert!(!elevator.is_moving);
    }

    #[test]
    fn test_fsm_idle_with_targets_starts_moving() {
        // Purpose: Verify that an idle car holding targets heads for them

        let (mut fsm, mut rng, mut activity) = setup_fsm(0.0);
        let mut elevator = Elevator::new(1);
        elevator.floor = 6;
        elevator.target_floors.insert(2);

        let deferred = fsm.advance(&mut elevator, &mut rng, &mut activity, 0);

        assert_eq!(elevator.direction, Down);
        assert_eq!(deferred.unwrap().transition, Transition::CommitMove { floor: 5 });
    }

    #[test]
    fn test_fsm_idle_pickup_sets_direction() {
        // Purpose: Verify that an idle car picking someone up turns toward their floor

        // Arrange
        let (mut fsm, mut rng, mut activity) = setup_fsm(1.0);

        for floor in 1..=10u8 {
            let mut elevator = Elevator::new(1);
            elevator.floor = floor;
            elevator.target_floors.insert(floor);

            // Act
            fsm.advance(&mut elevator, &mut rng, &mut activity, 0);

            // Assert
            let destination = elevator.passengers[0].destination_floor;
            assert_ne!(destination, floor);
            assert!((1..=10).contains(&destination));
            let expected = if destination > floor { Up } else { Down };
            assert_eq!(elevator.direction, expected);
            assert_eq!(elevator.passengers[0].direction, expected);
        }
    }

    #[test]
    fn test_fsm_pickup_respects_capacity() {
        // Purpose: Verify that a full car takes no one on

        // Arrange
        let config = SimulationConfig {
            pickup_probability: 1.0,
            max_passengers: Some(1),
            ..SimulationConfig::default()
        };
        let mut fsm = ElevatorFSM::new(&config);
        let mut rng = SimRng::new(Some(1));
        let mut activity = ActivityLog::new(50);

        let mut elevator = Elevator::new(1);
        elevator.floor = 3;
        elevator.direction = Up;
        elevator.passengers = vec![passenger(1, 9)];
        elevator.target_floors.extend([3, 9]);

        // Act
        fsm.advance(&mut elevator, &mut rng, &mut activity, 0);

        // Assert
        assert!(elevator.is_door_open);
        assert_eq!(elevator.passengers.len(), 1);
        assert!(activity.is_empty());
    }

    #[test]
    fn test_fsm_close_doors() {
        // Purpose: Verify that closing the doors keeps the car where it is

        let (fsm, _rng, mut activity) = setup_fsm(0.0);
        let mut elevator = Elevator::new(1);
        elevator.floor = 7;
        elevator.is_door_open = true;

        fsm.handle_transition(&mut elevator, Transition::CloseDoors, &mut activity, 0);

        assert!(!elevator.is_door_open);
        assert_eq!(elevator.floor, 7);
        assert!(activity.is_empty());
    }
}
