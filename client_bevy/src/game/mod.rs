mod core;
mod hud;
mod input;
mod lights;
mod paddles;
mod puck;
mod round;
mod table;

pub use core::CorePlugin;
pub(crate) use core::{FixedSet, MatchRuntime, MatchSettings, Role, UpdateSet};
pub use hud::HudPlugin;
pub use input::InputPlugin;
pub use lights::LightsPlugin;
pub use paddles::PaddlesPlugin;
pub use puck::PuckPlugin;
pub use round::RoundPlugin;
pub use table::TablePlugin;
