//! Version parsing, comparison and change classification
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Source    │────▶│   Semver    │◀────│   Checker   │
//! │ (resolve)   │     │  (compare)  │     │ (predicates)│
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   ▲                   │
//!        ▼                   │                   ▼
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ binary, k/v │     │   Change    │◀────│ only-changed│
//! │   store     │     │ (classify)  │     │   checks    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`semver`]: Triple parsing and lexicographic comparison
//! - [`change`]: Single-component change classification
//! - [`checker`]: Boolean predicates built on the two above
//! - [`source`]: Adapters resolving the installed version string
//! - [`error`]: Error type shared by the whole layer

pub mod change;
pub mod checker;
pub mod error;
pub mod semver;
pub mod source;

pub use change::{ChangeResult, only_changed, only_changed_from_source};
pub use error::VersionError;
pub use semver::{CompareResult, compare_parsed, compare_versions, parse_version};
