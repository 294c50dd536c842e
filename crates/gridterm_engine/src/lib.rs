//! The soft-terminal display engine.
//!
//! [`Terminal`] consumes an application-to-terminal byte stream (decoded
//! through `gridterm_parser`) and maintains a two-dimensional character
//! cell grid behind the [`ScreenBuffer`] seam. Keyboard and mouse mode
//! changes, and the reports the terminal itself generates, flow out
//! through the [`KeyboardSink`] and [`MouseSink`] contracts.

mod cell;
pub use cell::*;

mod cell_layout;
pub use cell_layout::*;

mod screen;
pub use screen::*;

mod keyboard;
pub use keyboard::*;

mod terminal;
pub use terminal::*;
