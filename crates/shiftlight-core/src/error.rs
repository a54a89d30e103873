//! Error types for shiftlight-core

use thiserror::Error;

use crate::frame::Field;

/// Errors produced while evaluating an arithmetic expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Expression (or one operand of it) is empty
    #[error("expression cannot be empty")]
    Empty,

    /// Token looks like a variable name but is not defined
    #[error("undefined variable: {0}")]
    UndefinedVariable(String),

    /// Token is neither an integer nor a valid variable name
    #[error("invalid expression: {0}")]
    InvalidToken(String),

    /// Opening and closing parentheses do not match up
    #[error("unbalanced parentheses in: {0}")]
    UnbalancedParentheses(String),

    /// Integer division by zero
    #[error("division by zero")]
    DivisionByZero,

    /// Intermediate result does not fit in an i32
    #[error("arithmetic overflow")]
    Overflow,
}

/// Errors produced while parsing variable declarations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariableError {
    /// Line is not of the form `name=value`
    #[error("line {line}: invalid variable format '{text}', expected name=value")]
    MalformedDeclaration {
        /// 1-based line number
        line: usize,
        /// Offending line (trimmed)
        text: String,
    },

    /// Name contains characters outside `[a-zA-Z0-9_-]`
    #[error("line {line}: invalid variable name '{name}' (valid characters: a-z, A-Z, 0-9, _, -)")]
    InvalidName {
        /// 1-based line number, 0 when set through `VariableTable::set`
        line: usize,
        /// Offending name
        name: String,
    },

    /// Value is outside 0-9999
    #[error("line {line}: value of '{name}' must be in range 0-9999, got {value}")]
    ValueOutOfRange {
        /// 1-based line number, 0 when set through `VariableTable::set`
        line: usize,
        /// Variable name
        name: String,
        /// Value as written
        value: String,
    },
}

/// Errors produced while decoding a frame line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Line does not start with a terminated `[...]` group
    #[error("LED list must be enclosed in brackets at the start of the line, e.g. [1,2,4-6,8]")]
    MalformedBracket,

    /// `]` is not followed by a comma
    #[error("expected ',' after the LED list")]
    MissingFieldSeparator,

    /// LED list element is not a number or range
    #[error("invalid LED index: '{0}'")]
    InvalidLedIndex(String),

    /// Range with start greater than end, or more than one dash
    #[error("invalid LED range: '{0}'")]
    InvalidRange(String),

    /// LED index outside 1-13
    #[error("LED index must be between 1 and 13: {0}")]
    LedIndexOutOfRange(i64),

    /// Fewer than nine fields after the LED list
    #[error("expected at least 9 fields after the LED list, found {0}")]
    TooFewFields(usize),

    /// Extra fields beyond what the blink mode allows
    #[error("too many fields: blink mode {blink_mode} allows {allowed}, found {found}")]
    TooManyFields {
        /// Blink mode of the line
        blink_mode: u8,
        /// Number of fields allowed after the LED list
        allowed: usize,
        /// Number of fields found after the LED list
        found: usize,
    },

    /// Numeric field could not be parsed or evaluated
    #[error("invalid {field}: {source}")]
    InvalidNumericField {
        /// Which field failed
        field: Field,
        /// Why it failed
        #[source]
        source: EvalError,
    },

    /// RPM value outside 0-9999
    #[error("{field} must be in range 0-9999, got {value}")]
    RpmRangeViolation {
        /// Which RPM field
        field: Field,
        /// Resolved value
        value: i32,
    },

    /// Start RPM above end RPM
    #[error("start RPM ({start}) must not exceed end RPM ({end})")]
    RpmOrderViolation {
        /// Resolved start RPM
        start: i32,
        /// Resolved end RPM
        end: i32,
    },

    /// Color channel outside 0-255
    #[error("{field} must be in range 0-255, got {value}")]
    ColorRangeViolation {
        /// Which color channel
        field: Field,
        /// Resolved value
        value: i32,
    },

    /// Blink mode is not a plain integer in 0-2
    #[error("blink mode must be 0, 1 or 2, got '{0}'")]
    InvalidBlinkMode(String),

    /// Blink parameter missing, unresolvable, or outside 0-255
    #[error("blink mode {blink_mode} requires a value in range 0-255: {reason}")]
    InvalidOptionalValue {
        /// Blink mode of the line
        blink_mode: u8,
        /// What went wrong
        reason: String,
    },

    /// Frame has no LEDs
    #[error("frame must light at least one LED")]
    EmptyLedSet,
}

/// Errors produced by [`Animation`](crate::Animation) mutations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnimationError {
    /// Sequence already holds the maximum number of frames
    #[error("maximum number of frames ({0}) reached")]
    CapacityExceeded(usize),

    /// Line could not be decoded
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Errors produced while loading a program file
#[derive(Debug, Error)]
pub enum ProgramError {
    /// Variables section is invalid
    #[error("invalid variables section: {0}")]
    Variables(#[from] VariableError),

    /// File could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
