//! Minions skills - a schema-governed record store
//!
//! Stores records of three skill types (definitions, assignments, results)
//! as one JSON file per record, and validates field data against each
//! type's declared schema. Ships a `skills` binary over the library.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, calls the store)
//! - [`core`] - Type registry, validator, record store, and configuration
//! - [`ui`] - User-facing output
//!
//! # Guarantees
//!
//! 1. A record's id, type and creation time never change
//! 2. Every write replaces a whole file atomically
//! 3. Validation reports every defect and never mutates its input
//! 4. Create and update store fields as given; validation is explicit

pub mod cli;
pub mod core;
pub mod ui;
