//! Export renderers.
//!
//! The core renders export text and file names; writing or downloading the
//! file belongs to the host.

pub mod csv;
