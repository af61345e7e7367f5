//! Domain and wire-level types shared between the survey flow core and
//! the desktop front-end.

pub mod domain;
pub mod error;
pub mod protocol;
