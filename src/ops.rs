//! Shopper account operations composed from the fetchers.
//!
//! These are the building blocks a storefront's route handlers call; they return typed
//! outcomes and leave response writing to the host.

pub mod customer;
pub mod login;
pub mod signup;

pub use customer::*;
pub use login::*;
pub use signup::*;
