use alloc::string::String;
use core::fmt;

use crate::params::Parameter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// A parameter name that is not one of the six metrical parameters.
    UnknownParameter(String),
    /// A value that the named parameter does not accept.
    InvalidValue { parameter: Parameter, value: String },
    /// An assignment that leaves this parameter unknown where all six are required.
    Unresolved(Parameter),
    /// An assignment entry that is not of the form `name=value`.
    MalformedAssignment(String),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::UnknownParameter(name) => write!(f, "unknown parameter '{}'", name),
            ProtocolError::InvalidValue { parameter, value } => write!(
                f,
                "'{}' is not a value of {} (expected {} or {})",
                value,
                parameter,
                parameter.value_name(crate::Polarity::Minus),
                parameter.value_name(crate::Polarity::Plus)
            ),
            ProtocolError::Unresolved(parameter) => {
                write!(f, "assignment leaves {} unspecified", parameter)
            }
            ProtocolError::MalformedAssignment(entry) => {
                write!(f, "expected name=value, found '{}'", entry)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ProtocolError {}
