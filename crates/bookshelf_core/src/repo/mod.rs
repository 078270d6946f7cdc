//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the catalog's data access contract.
//! - Isolate SQLite query details from callers.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, `InvalidQuery`)
//!   in addition to DB transport errors.
//! - Every mutation is committed before the call returns.

pub mod book_repo;
