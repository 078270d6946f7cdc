//! Catalog domain model.
//!
//! # Responsibility
//! - Define the canonical book record and the request shapes around it.
//! - Keep persistence concerns out of the value types.
//!
//! # Invariants
//! - Every persisted book is identified by a store-assigned `BookId`.
//! - Value types carry no behavior beyond construction and equality.

pub mod book;
