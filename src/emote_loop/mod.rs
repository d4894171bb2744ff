pub mod controller;

pub use controller::EmoteLoopController;
