//! Entity URI resolution subsystem.
//!
//! # Data Flow
//! ```text
//! User input ("abc123", "https://site/rdf_entity/aHR0...", "/rdf_entity/aHR0...")
//!     → classifier.rs (ExternalUrl | LocalUrl | RelativePath)
//!     → engine.rs
//!         ExternalUrl            → IdentifierLookup::exists
//!         LocalUrl/RelativePath  → RouteTable::match_path → IdentifierCodec::decode
//!     → ResolutionOutcome
//!     → report.rs (Redirect | Display | FieldError)
//! ```
//!
//! # Design Decisions
//! - Collaborators are injected as trait objects; no global registry
//! - Resolution is side-effect free and safe to repeat
//! - Every failure becomes one user-facing field error

pub mod classifier;
pub mod engine;
pub mod report;

pub use classifier::{classify, InputKind, Site};
pub use engine::{ResolutionOutcome, Resolver, UnresolvedReason};
pub use report::{Report, Reporter, INPUT_FIELD};
