//! Error kinds surfaced by `Opt` accessors.

use std::borrow::Cow;

use thiserror::Error;

pub const NO_VALUE_PRESENT: &str = "No value present";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum OptError {
    /// A required argument arrived without a value. Only raised at the
    /// nullable boundary (`Opt::try_of`, `Opt::try_lazy`).
    #[error("The value can't be null: {0}")]
    NullArgument(&'static str),
    /// Unconditional extraction from an absent container.
    #[error("{0}")]
    EmptyContainer(Cow<'static, str>),
}

impl OptError {
    pub fn empty() -> Self { OptError::EmptyContainer(Cow::Borrowed(NO_VALUE_PRESENT)) }

    pub fn is_empty_container(&self) -> bool { matches!(self, OptError::EmptyContainer(_)) }

    pub fn is_null_argument(&self) -> bool { matches!(self, OptError::NullArgument(_)) }
}

pub type Result<T, E = OptError> = core::result::Result<T, E>;
