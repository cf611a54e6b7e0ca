//! Discussion domain module.
//!
//! # Module Structure
//!
//! - `model`: Wire-shaped discussion types (`Discussion`, `Message`, ...)
//! - `service`: The `DiscussionService` trait seam to the remote service
//! - `scheduler`: The cancellable single-slot turn timer
//! - `controller`: Session lifecycle and the turn-taking loop
//! - `event`: Events the controller publishes to front-ends

mod controller;
mod event;
mod model;
mod scheduler;
mod service;

#[cfg(test)]
mod controller_test;

pub use controller::SessionController;
pub use event::SessionEvent;
pub use model::{Discussion, Message, StopSummary, StrategyDocument};
pub use scheduler::TurnScheduler;
pub use service::DiscussionService;
