#![deny(bare_trait_objects)]

//! Various optional utilities for the simplify crate.
//!
//! - [`parser`] reads point lists from text,
//! - [`debugging`] helps turning a failing input into a small test case.

pub extern crate simplify_path as path;

pub use path::geom::euclid;
pub use path::math;

pub mod debugging;
pub mod parser;
