//! Command-line front end for the cardwire vCard codec.

pub mod cmd;
pub mod io;
pub mod logging;
