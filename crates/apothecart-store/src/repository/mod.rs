//! # Repository Layer
//!
//! Data access for cart persistence.
//!
//! One repository here: [`cart::CartRepository`]. Each repository owns a
//! clone of the pool and is cheap to construct per call.

pub mod cart;
