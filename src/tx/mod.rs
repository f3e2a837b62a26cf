//! Transaction Module
//!
//! The signing engine: turns unsigned transactions into broadcast-ready hex
//! using an external signer.

mod signer;

pub use signer::*;
