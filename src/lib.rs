//! Personal task board kept in a remote document store.
//!
//! [`session`] decides whether anyone is signed in, [`store`] keeps the
//! user's tasks newest first in step with the [`remote`] store, and [`view`]
//! turns them into what the user sees. [`controller::Board`] wires these
//! together for a front end such as the `taskboard` binary.

pub mod cli;
pub mod config;
pub mod controller;
pub mod log;
pub mod model;
pub mod remote;
pub mod session;
pub mod store;
pub mod view;

#[cfg(all(test, feature = "e2e"))]
mod e2e_tests;
