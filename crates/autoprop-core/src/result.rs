//! Result type alias used across the workspace

use crate::error::AutopropError;

pub type Result<T> = std::result::Result<T, AutopropError>;
