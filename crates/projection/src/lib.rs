//! Geodetic projection engine seam.
//!
//! The terrain crates never do projection math themselves. They describe a
//! projection as a PROJ-style specification string (`+proj=eqc +lat_ts=0 ...`),
//! ask a [`ProjectionEngine`] for an opaque handle, and transform
//! 3-component coordinates between two handles. Angular coordinates are
//! always radians at this boundary.
//!
//! [`ProjEngine`] is the default engine, backed by the PROJ library.
//! [`Proj4Engine`] is a pure-Rust alternative built on `proj4rs`; it covers
//! fewer projections (no omerc, aeqd, eqdc, cass, gnom, mill, ortho, poly,
//! robin, sinu, vandg, nzmg or cea).

pub mod engine;
pub mod error;
pub mod proj4;
pub mod proj_engine;
pub mod spec;

pub use engine::ProjectionEngine;
pub use error::EngineError;
pub use proj4::{Proj4Engine, Proj4Handle};
pub use proj_engine::{ProjEngine, ProjHandle};
pub use spec::ProjSpec;

/// Engine used when a caller does not pick one.
pub type DefaultEngine = ProjEngine;
