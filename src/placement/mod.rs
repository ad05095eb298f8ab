pub mod controller;

pub use controller::PlacementController;
