//! opt: an optional container with monadic combinators, visitor dispatch,
//! and a lazily resolved variant whose producer runs at most once.
//!
//! ```
//! use opt::Opt;
//!
//! let port = Opt::of_nullable(std::env::var("NO_SUCH_VAR_FOR_DOCS").ok())
//!     .map_nullable(|s| s.parse::<u16>().ok())
//!     .filter(|p| *p != 0)
//!     .get_or(8080);
//! assert_eq!(port, 8080);
//! ```

pub mod convert;
pub mod error;
pub mod iter;
pub mod lazy;
pub mod opt;
pub mod visitor;

pub use error::{OptError, Result, NO_VALUE_PRESENT};
pub use iter::{flatten, sequence, IntoIter, Iter};
pub use lazy::Deferred;
pub use opt::Opt;
pub use visitor::{from_fns, FnVisitor, OptVisitor};
