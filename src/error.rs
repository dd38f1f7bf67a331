// SPDX-License-Identifier: Apache-2.0

//! Error types for tree configuration and netlist checks.

/// Errors raised while validating or loading a tree configuration. Nothing is
/// emitted when one of these is returned.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("row count must be a positive power of two, got {0}")]
    InvalidRowCount(usize),

    #[error(
        "word width must be between 1 and {max}, got {0}",
        max = crate::config::MAX_WORD_WIDTH
    )]
    InvalidWordWidth(usize),

    #[error("{field} \"{name}\" is not a legal Verilog identifier")]
    InvalidIdentifier { field: &'static str, name: String },

    #[error("name \"{0}\" is used more than once in the generated module")]
    NameCollision(String),

    #[error(
        "adder {adder} produces {result_width} bits from {operand_width}-bit operands, expected {}",
        .operand_width + 1
    )]
    AdderContract {
        adder: String,
        operand_width: usize,
        result_width: usize,
    },

    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),
}

/// Structural problems found in a module definition.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NetlistError {
    #[error("{module}: {signal} is not declared")]
    UnknownSignal { module: String, signal: String },

    #[error("{module}: {signal}[{index}] is out of range")]
    IndexOutOfRange {
        module: String,
        signal: String,
        index: usize,
    },

    #[error("{context} expects {expected} bits but is connected to {actual} bits")]
    WidthMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    #[error("{0} is undriven")]
    Undriven(String),

    #[error("{0} is multiply driven")]
    MultiplyDriven(String),

    #[error("{0} is unused")]
    Unused(String),

    #[error("{0} is unconnected")]
    Unconnected(String),

    #[error("{context} can overflow: range [{min}, {max}] does not fit in {width} signed bits")]
    Overflow {
        context: String,
        min: String,
        max: String,
        width: usize,
    },
}

/// Crate-level error returned by generation entry points.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Netlist(#[from] NetlistError),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}
