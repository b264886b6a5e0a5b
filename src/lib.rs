//! Pennant
//!
//! Pennant is an immutable flag algebra: composable markers that attach to values without
//! subclassing, enum registries or side tables.
//!
//! ```
//! use pennant::prelude::*;
//!
//! let flag = pointed([1, 2, 3]) | flag_about("ready", false);
//!
//! assert_eq!(flag.len(), 4);
//! assert!(flag.is_truthy());
//! assert_eq!((-pointed([3])).apply(pointed([1, 2, 3])), pointed([1, 2]));
//! ```

pub mod constructors;
pub mod flags;
pub mod mapping;
pub mod matching;
pub mod prelude;
pub mod vector;
