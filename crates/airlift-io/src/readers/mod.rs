//! Readers that turn raw files into an immutable `Dataset`.

pub mod csv;
