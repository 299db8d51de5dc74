//! Input decoding and dialog event dispatch.

mod bus;
mod input;

pub use bus::{DialogEvent, DialogPhase, EventBus};
pub use input::{InputEvent, Key, KeyEvent, Modifiers, MouseAction, MouseBtn, MouseEvent};
