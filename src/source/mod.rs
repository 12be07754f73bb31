// src/source/mod.rs
//
// Where passage text comes from. The orchestrator only sees this trait.

pub mod gateway;
pub mod memory;

pub use gateway::GatewaySource;
pub use memory::DocumentSource;

use crate::{error::Result, range::FetchUnit};

/// Fetches the passages of one unit as an ordered, unnumbered list.
///
/// An empty list means nothing was found. Implementations are shared across
/// worker threads.
pub trait PassageSource: Send + Sync {
    fn fetch(&self, unit: &FetchUnit, translation: &str, show_numbers: bool) -> Result<Vec<String>>;
}

impl<T: PassageSource + ?Sized> PassageSource for &T {
    fn fetch(&self, unit: &FetchUnit, translation: &str, show_numbers: bool) -> Result<Vec<String>> {
        (**self).fetch(unit, translation, show_numbers)
    }
}
