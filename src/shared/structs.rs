/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Idle,
}

/// Direction requested by a hall call. Calls never ask to stay put.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CallDirection {
    Up,
    Down,
}

impl From<CallDirection> for Direction {
    fn from(item: CallDirection) -> Self {
        match item {
            CallDirection::Up => Direction::Up,
            CallDirection::Down => Direction::Down,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Idle => write!(f, "idle"),
        }
    }
}

impl fmt::Display for CallDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Direction::from(*self), f)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Call {
    pub id: u64,
    pub floor: u8,
    pub direction: CallDirection,
    #[serde(rename = "createdAt")]
    pub created_at: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Passenger {
    pub id: u64,
    #[serde(rename = "originFloor")]
    pub origin_floor: u8,
    #[serde(rename = "destinationFloor")]
    pub destination_floor: u8,
    pub direction: Direction,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Elevator {
    pub id: u8,
    pub floor: u8,
    pub direction: Direction,
    pub passengers: Vec<Passenger>,
    #[serde(rename = "targetFloors")]
    pub target_floors: BTreeSet<u8>,
    #[serde(rename = "isMoving")]
    pub is_moving: bool,
    #[serde(rename = "isDoorOpen")]
    pub is_door_open: bool,
    #[serde(rename = "lastMove")]
    pub last_move: Option<u64>,
}

impl Elevator {
    pub fn new(id: u8) -> Elevator {
        Elevator {
            id,
            floor: 1,
            direction: Direction::Idle,
            passengers: Vec::new(),
            target_floors: BTreeSet::new(),
            is_moving: false,
            is_door_open: false,
            last_move: None,
        }
    }

    pub fn has_work(&self) -> bool {
        !self.target_floors.is_empty() || !self.passengers.is_empty()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SimulationStats {
    #[serde(rename = "totalCalls")]
    pub total_calls: u64,
    #[serde(rename = "totalTrips")]
    pub total_trips: u64,
    #[serde(rename = "totalWaitTime")]
    pub total_wait_time: u64,
}

impl SimulationStats {
    /// Mean milliseconds between a call being created and it being assigned.
    pub fn average_wait_time(&self) -> f64 {
        if self.total_trips == 0 {
            return 0.0;
        }
        self.total_wait_time as f64 / self.total_trips as f64
    }

    pub fn record_assignment(&mut self, wait: u64) {
        self.total_trips += 1;
        self.total_wait_time += wait;
    }
}
