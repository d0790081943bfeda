//! Subcommand implementations.

pub(crate) mod aggregate;
pub(crate) mod classify;
pub(crate) mod dispatch;
pub(crate) mod features;
pub(crate) mod report;
pub(crate) mod sample;
