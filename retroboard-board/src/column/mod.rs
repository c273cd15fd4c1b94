//! Column commands

mod group;

pub use group::ApplyGrouping;
