mod constants;
mod game;
mod player;

pub use constants::*;
pub use game::*;
pub use player::*;
