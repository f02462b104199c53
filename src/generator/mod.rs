pub mod call_generator;

pub use call_generator::CallGenerator;
