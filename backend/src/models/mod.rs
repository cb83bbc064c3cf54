pub mod assignment;
pub mod availability;
pub mod game;
pub mod ids;
pub mod macros;
pub mod referee;
pub mod time;

pub use assignment::*;
pub use availability::*;
pub use game::*;
pub use ids::*;
pub use referee::*;
pub use time::*;
