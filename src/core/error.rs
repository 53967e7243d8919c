//! Error handling for the constraint solver.
//!
//! All fallible builder operations return `Result<T, SolverError>`. The
//! core solving loop itself never errors — an unsatisfiable problem is
//! reported as a result with zero solutions, not an `Err`.
//!
//! # Example
//!
//! ```
//! use parabb::prelude::*;
//!
//! let mut builder = Builder::new();
//! let x = builder.add_var("x", 0, 5).unwrap();
//! match builder.add_temporal_constraint(x, 0, Op::Ne, x) {
//!     Err(SolverError::InvalidConstraint { message, .. }) => {
//!         println!("rejected: {message}");
//!     }
//!     other => panic!("expected a rejection, got {other:?}"),
//! }
//! ```

/// Errors raised while constructing a problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// A constraint used an operator this solver does not support in
    /// that position (`!=` and `in` outside domain restriction).
    InvalidConstraint {
        /// What makes the constraint invalid.
        message: String,
        /// Variables involved, if known.
        variables: Option<Vec<String>>,
    },

    /// A variable name was referenced that was never registered with
    /// `Builder::add_var`.
    InvalidVariable {
        /// What makes the reference invalid.
        message: String,
        /// The offending name.
        name: Option<String>,
    },

    /// A domain bound was malformed (e.g. `lb > ub` at declaration
    /// time, before any narrowing has happened).
    InvalidDomain {
        /// What makes the domain invalid.
        message: String,
        /// The offending variable name.
        variable_name: Option<String>,
    },

    /// A `LinearIneq` or `Reified` constraint was given mismatched
    /// operand lengths.
    InvalidInput {
        /// What makes the input invalid.
        message: String,
        /// Name of the builder method that rejected it.
        function_name: Option<String>,
    },
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConstraint { message, variables } => {
                write!(f, "invalid constraint: {message}")?;
                if let Some(vars) = variables {
                    if !vars.is_empty() {
                        write!(f, " [variables: {}]", vars.join(", "))?;
                    }
                }
                Ok(())
            }
            Self::InvalidVariable { message, name } => {
                write!(f, "invalid variable: {message}")?;
                if let Some(name) = name {
                    write!(f, " (name: {name})")?;
                }
                Ok(())
            }
            Self::InvalidDomain {
                message,
                variable_name,
            } => {
                write!(f, "invalid domain: {message}")?;
                if let Some(name) = variable_name {
                    write!(f, " (variable: {name})")?;
                }
                Ok(())
            }
            Self::InvalidInput {
                message,
                function_name,
            } => {
                write!(f, "invalid input: {message}")?;
                if let Some(func) = function_name {
                    write!(f, " in function '{func}'")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for SolverError {}

impl SolverError {
    /// An `InvalidConstraint` error with no variable context.
    #[must_use]
    pub fn invalid_constraint(message: impl Into<String>) -> Self {
        Self::InvalidConstraint {
            message: message.into(),
            variables: None,
        }
    }

    /// An `InvalidConstraint` error naming the involved variables.
    #[must_use]
    pub fn invalid_constraint_with_vars(message: impl Into<String>, variables: Vec<String>) -> Self {
        Self::InvalidConstraint {
            message: message.into(),
            variables: Some(variables),
        }
    }

    /// An `InvalidVariable` error for an unknown name.
    #[must_use]
    pub fn unknown_variable(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::InvalidVariable {
            message: "no variable registered with this name".to_string(),
            name: Some(name),
        }
    }

    /// An `InvalidDomain` error for a declared-backwards domain.
    #[must_use]
    pub fn invalid_domain(message: impl Into<String>, variable_name: impl Into<String>) -> Self {
        Self::InvalidDomain {
            message: message.into(),
            variable_name: Some(variable_name.into()),
        }
    }

    /// An `InvalidInput` error for a shape mismatch.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>, function_name: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            function_name: Some(function_name.into()),
        }
    }
}

/// Shorthand result alias used by every fallible builder method.
pub type SolverResult<T> = Result<T, SolverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_constraint_displays_message() {
        let e = SolverError::invalid_constraint("unsupported operator !=");
        assert_eq!(e.to_string(), "invalid constraint: unsupported operator !=");
    }

    #[test]
    fn unknown_variable_displays_name() {
        let e = SolverError::unknown_variable("z");
        assert!(e.to_string().contains("(name: z)"));
    }
}
