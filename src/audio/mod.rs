//! Background music
//!
//! A dedicated worker thread keeps one looping music stream alive and follows
//! the host lifecycle: paused while the app is in the background, resumed when
//! it comes back, released on teardown. The stream itself is supplied by the
//! host through `MusicSource`.

pub mod controller;
pub mod stream;

pub use controller::{AudioController, AudioStatus};
pub use stream::{AudioError, MusicSource, MusicStream, SilentSource, SilentStream};
