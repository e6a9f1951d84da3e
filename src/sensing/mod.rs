pub mod controller;
pub mod loop_worker;
pub mod simulator;

pub use controller::SimulationController;
pub use loop_worker::SimulationContext;
pub use simulator::SensorSimulator;
