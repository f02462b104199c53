pub mod fsm;
pub mod fsm_tests;

pub use fsm::Deferred;
pub use fsm::ElevatorFSM;
pub use fsm::Transition;
