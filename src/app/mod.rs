pub(crate) mod input;
mod options;
mod runtime;
mod subscriptions;

pub use input::classify;
pub use options::{ChipCellConfig, ChipCellOptions};
pub use runtime::{ChipCell, ChipCellView, ChipIntent};
pub use subscriptions::{OutsideClick, SubscriptionPlan};
