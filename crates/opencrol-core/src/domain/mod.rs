//! Pure translation domain: geometry, surface modes, gesture and chord
//! engines, and the typed agent status report.

pub mod chord;
pub mod geometry;
pub mod gesture;
pub mod status;
pub mod surface;
