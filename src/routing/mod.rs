//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Site-relative path ("rdf_entity/aHR0cDov...")
//!     → router.rs (route lookup, priority order)
//!     → matcher.rs (segment-by-segment comparison)
//!     → Return: RouteMatch { route, params } or unrouted
//!
//! Route Compilation (at startup / reload):
//!     RouteConfig[]
//!     → Compile patterns
//!     → Sort by priority
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same input always matches same route
//! - First match wins (ordered by priority)

pub mod matcher;
pub mod router;

pub use matcher::{PatternError, RoutePattern};
pub use router::{RouteMatch, RouteTable, Router};
