//! NDLab - nuclear structure and decay data.
//!
//! A [`Ndlab`] session translates field/filter expressions written against the
//! nuclear-data catalog into SQL, runs them through an [`Executor`] and turns
//! the rows into typed model instances. Instances navigate to related data on
//! demand and cache what they fetch.
//!
//! # Example
//!
//! ```no_run
//! use ndlab::{Config, Ndlab};
//!
//! # fn main() -> Result<(), ndlab::Error> {
//! let db = Ndlab::open(Config::new("ndlab_db.s3db"))?;
//!
//! let mut xe = db.nuclide("135XE")?;
//! for level in xe.levels(&db, "LEVEL.ENERGY < 1000")? {
//!     println!("{} keV {}", level.energy, level.jp.as_deref().unwrap_or("?"));
//! }
//!
//! let rows = db.query("GAMMA.ENERGY, GAMMA.REL_PHOTON_INTENS", "GAMMA.NUC_ID = '60NI'")?;
//! println!("{} gammas", rows.len());
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod chain;
pub mod config;
pub mod error;
pub mod executor;
pub mod materialize;
pub mod model;
pub mod session;

pub use cache::{FilterArg, RelationSlot};
pub use config::{Config, DEFAULT_DB_PATH};
pub use error::Error;
pub use executor::{Executor, SqliteExecutor};
pub use materialize::{materialize, remove_duplicates, Entity, FromRow};
pub use model::{
    radiated_energy, Capture, DecayGamma, DecayMode, DecayRadiation, FissionYield, Gamma, Level,
    LevelDecay, Nuclide, PhotonTotal, RadiationDetail, RadiationKind, YieldKind,
};
pub use ndlab_core::{Qualifier, Quantity, RawValue, Row};
pub use session::Ndlab;
