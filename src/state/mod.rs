pub mod id;
pub mod palette;
pub mod pixels;

pub use id::{IdGenerator, SequentialIdGenerator, UuidIdGenerator};
pub use palette::PaletteStore;
pub use pixels::{Pixel, PixelId, PixelStore};
