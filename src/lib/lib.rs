//!
//! memer  -- Memes on demand
//!

             extern crate fontdb;
             extern crate glob;
             extern crate image;
#[macro_use] extern crate log;
             extern crate rand;
             extern crate rusttype;
             extern crate serde;
#[macro_use] extern crate serde_derive;


#[cfg(test)] #[macro_use] extern crate serde_json;
#[cfg(test)] #[macro_use] extern crate spectral;


mod caption;
mod error;
mod gacha;
mod model;
mod resources;
mod session;
mod share;
#[cfg(test)] mod testing;


pub use caption::*;
pub use error::Error;
pub use gacha::{pick, GachaPick};
pub use model::*;
pub use resources::*;
pub use session::*;
pub use share::*;
