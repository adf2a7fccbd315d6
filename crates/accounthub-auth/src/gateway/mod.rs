//! Per-request authorization gateway.
//!
//! The gateway maps (path, session fact) to a decision before any handler
//! runs. It is a pure function over the static route policy: no I/O, no
//! locking, safe to call concurrently on every request.

pub mod decide;
pub mod policy;

pub use decide::{Decision, Gateway};
pub use policy::{RouteClass, RoutePolicy};
