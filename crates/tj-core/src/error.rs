//! Configuration error type.
//!
//! Every variant is raised while validating a [`MatchConfig`][crate::MatchConfig]
//! or constructing a [`Field`][crate::Field], i.e. before the first tick.
//! Nothing in the running simulation produces a `ConfigError`.

use thiserror::Error;

use crate::Role;

/// Invalid inputs to world initialisation.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid field dimensions {width} x {height}")]
    InvalidField { width: f32, height: f32 },

    #[error("agents_per_team must be at least 1")]
    NoAgents,

    #[error("role assignment table is empty")]
    EmptyRoleAssignment,

    #[error("role {role} is assigned but missing from the {table} table")]
    MissingRole { role: Role, table: &'static str },

    #[error("role {role}: attribute `{attribute}` has invalid value {value}")]
    InvalidAttribute {
        role:      Role,
        attribute: &'static str,
        value:     f32,
    },

    #[error("parameter `{name}` has invalid value {value}")]
    InvalidParameter { name: &'static str, value: f32 },
}

/// Shorthand result type for configuration validation.
pub type ConfigResult<T> = Result<T, ConfigError>;
