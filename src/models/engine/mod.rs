pub mod hit_window;
pub mod note;
pub mod pattern;
pub mod pixel_system;

pub use hit_window::HitWindow;
pub use note::{Direction, Note};
pub use pattern::{DEFAULT_BPM, beat_interval, generate, last_note_time};
pub use pixel_system::PixelSystem;
