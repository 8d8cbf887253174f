//! CLI command implementations
//!
//! Each submodule implements one subcommand and writes to the supplied
//! writer in the requested [`OutputFormat`](crate::output::OutputFormat).

pub mod hedge;
pub mod implied_vol;
pub mod mc;
pub mod price;
