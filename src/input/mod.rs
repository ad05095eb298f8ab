pub mod events;
pub mod handler;

// Re-export the essential types
pub use events::{EventHandled, MapEvent};
pub use handler::InputHandler;
