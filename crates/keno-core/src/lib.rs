//! Keno ball cages.
//!
//! A [`Cage`] holds a fixed set of numbered balls in a bounded [`BallPool`].
//! The first pick fills the cage and starts its rotor blades ([`Agitator`]),
//! which keep grabbing balls and throwing them back. Later picks peek at one
//! ball and report roughly how many are left. A [`CageSet`] serves several
//! cages in a fixed order.
//!
//! ```no_run
//! use keno_core::CageSet;
//!
//! # async fn example() -> keno_core::KenoResult<()> {
//! let cages = CageSet::keno()?;
//! print!("{}", cages.render_picks().await); // Inserting 100 balls ...
//! print!("{}", cages.render_picks().await); // Ball 42 (~99 remain) ...
//! # Ok(())
//! # }
//! ```

pub mod agitator;
pub mod cage;
pub mod cage_set;
pub mod config;
pub mod error;
pub mod pool;

pub use agitator::{agitate_once, Agitator, Round};
pub use cage::{Cage, CageState, Pick};
pub use cage_set::{CageSet, KENO_CAPACITIES};
pub use config::{
    CageConfig, UnderflowPolicy, DEFAULT_BLADES, DEFAULT_HIT_FREQUENCY,
    MAX_HIT_FREQUENCY,
};
pub use error::{KenoError, KenoResult};
pub use pool::{Ball, BallPool};
