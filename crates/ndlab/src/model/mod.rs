//! Typed nuclear-data model.
//!
//! Instances are built from rows by the session and navigate to related data
//! on demand. Every navigation method takes the session and a filter; the
//! result is cached on the instance per [`RelationSlot`](crate::cache::RelationSlot)
//! rules.

mod decay;
mod fission;
mod gamma;
mod level;
mod nuclide;
mod photon;
mod radiation;

pub use decay::{radiated_energy, DecayMode, LevelDecay};
pub use fission::{FissionYield, YieldKind};
pub use gamma::{DecayGamma, Gamma};
pub use level::Level;
pub use nuclide::Nuclide;
pub use photon::PhotonTotal;
pub use radiation::{Capture, DecayRadiation, RadiationDetail, RadiationKind};

use crate::cache::{FilterArg, RelationSlot};
use crate::error::Error;
use crate::executor::Executor;
use crate::materialize::FromRow;
use crate::session::Ndlab;

/// Instance behind a single-target relation, fetched once with `filter`.
pub(crate) fn related<'a, T: FromRow, E: Executor>(
    slot: &'a mut RelationSlot<Vec<T>>,
    db: &Ndlab<E>,
    filter: &str,
) -> Result<&'a T, Error> {
    slot.get_or_fill(FilterArg::Default, |_| db.fetch(filter))?
        .first()
        .ok_or_else(|| Error::not_found(T::ENTITY, filter))
}

pub(crate) fn nuclide_filter(nucid: &str) -> String {
    format!("NUCLIDE.NUC_ID = '{nucid}'")
}

pub(crate) fn level_filter(nucid: &str, l_seqno: i64) -> String {
    format!("LEVEL.NUC_ID = '{nucid}' AND LEVEL.SEQNO = {l_seqno}")
}
