#![allow(dead_code, non_snake_case, non_upper_case_globals)]

//! High-harmonic generation dipole response in the strong-field
//! approximation.
//!
//! Two engines compute the dipole moment induced in a single atom by a
//! driving laser field:
//! - [`lewenstein`]: numerical integration over the travel time of the
//!   Lewenstein integral, for fields in one, two, or three dimensions;
//! - [`yakovlev`]: a sum over the classical returning trajectories, for
//!   linearly polarized fields.
//!
//! Both work natively in scaled atomic units (see [`units`]) and accept SI
//! inputs when given the driving wavelength.

pub mod utils;
pub mod error;
pub mod units;
pub mod vector;
pub mod integrate;
pub mod dipole;
pub mod window;
pub mod lewenstein;
pub mod yakovlev;
pub mod cutoff;
pub mod field;
pub mod ionization;
pub mod config;

pub use error::{ HhgError, HhgResult };
pub use units::{ Quantity, Target };
pub use dipole::DipoleElements;
pub use lewenstein::{ lewenstein, LewensteinParams };
pub use yakovlev::{ yakovlev, YakovlevParams };
pub use cutoff::{ cutoff, cutoff_amplitude };
