pub mod events;

pub use events::{EventBus, UiEvent};
