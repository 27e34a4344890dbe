//! Result type aliases

use crate::error::FsmError;

/// Standard Result type for stock operations
pub type FsmResult<T> = Result<T, FsmError>;
