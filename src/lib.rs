pub mod bodies;
pub mod gui;
pub mod math;
pub mod sim;
