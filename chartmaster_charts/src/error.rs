// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate alloc;

use alloc::string::String;
use core::fmt;

/// Errors from the domain calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    /// No record carried a usable value for the requested key(s).
    EmptyInput,
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => f.write_str("no numeric values to derive a domain from"),
        }
    }
}

impl core::error::Error for DomainError {}

/// Errors from scale lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaleError {
    /// The category is not part of the band scale's domain.
    InvalidCategory(String),
}

impl fmt::Display for ScaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCategory(c) => write!(f, "category {c:?} is not in the scale domain"),
        }
    }
}

impl core::error::Error for ScaleError {}

/// Errors returned by geometry builders.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartError {
    /// Nothing to render. [`ChartSpec::build`](crate::ChartSpec::build) turns this into an
    /// empty geometry.
    EmptyInput,
    /// A category lookup failed.
    InvalidCategory(String),
    /// Pie values contain a negative number or do not sum to a positive total.
    InvalidPieTotal {
        /// Sum of the values that were supplied.
        total: f64,
    },
    /// A record lacks a value that a strict accessor requires.
    MissingAccessorValue {
        /// Row key of the record.
        row_key: u64,
        /// Accessor key that had no usable value.
        key: String,
    },
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => f.write_str("no records to render"),
            Self::InvalidCategory(c) => write!(f, "category {c:?} is not in the scale domain"),
            Self::InvalidPieTotal { total } => {
                write!(f, "pie values must be non-negative with a positive total (got {total})")
            }
            Self::MissingAccessorValue { row_key, key } => {
                write!(f, "record {row_key} has no usable value for {key:?}")
            }
        }
    }
}

impl core::error::Error for ChartError {}

impl From<DomainError> for ChartError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::EmptyInput => Self::EmptyInput,
        }
    }
}

impl From<ScaleError> for ChartError {
    fn from(value: ScaleError) -> Self {
        match value {
            ScaleError::InvalidCategory(c) => Self::InvalidCategory(c),
        }
    }
}

/// Errors from [`ChartConfig::set`](crate::ChartConfig::set).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The dotted path does not name a setting.
    UnknownPath(String),
    /// The value has the wrong type for the setting.
    TypeMismatch {
        /// Dotted path of the setting.
        path: String,
        /// Description of the expected value.
        expected: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPath(path) => write!(f, "unknown config path {path:?}"),
            Self::TypeMismatch { path, expected } => {
                write!(f, "config path {path:?} expects {expected}")
            }
        }
    }
}

impl core::error::Error for ConfigError {}
