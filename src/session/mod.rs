mod controller;
mod state;

pub use controller::EditSessionController;
pub use state::{Direction, EditMode, EditPhase, EditSession};
