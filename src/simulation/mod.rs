pub mod clock;
pub mod scheduler;
pub mod simulation;

pub use clock::run_headless;
pub use clock::Clock;
pub use clock::Control;
pub use simulation::Simulation;
pub use simulation::Snapshot;
