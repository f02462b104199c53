pub mod macros;
pub mod structs;

pub use structs::Call;
pub use structs::CallDirection;
pub use structs::Direction;
pub use structs::Elevator;
pub use structs::Passenger;
pub use structs::SimulationStats;
