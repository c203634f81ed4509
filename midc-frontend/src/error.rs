use thiserror::Error;
use tracing::error;

use midc_ssa::SsaViolation;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("function {function} is not in valid SSA form:{}", render_violations(.violations))]
    InvalidSsa {
        function: String,
        violations: Vec<SsaViolation>,
    },
}

impl CompileError {
    pub fn report(&self) {
        match self {
            CompileError::InvalidSsa {
                function,
                violations,
            } => {
                for violation in violations {
                    error!(function = %function, "{}", violation);
                }
            }
        }
    }
}

fn render_violations(violations: &[SsaViolation]) -> String {
    let mut result = String::new();
    for violation in violations {
        result.push_str("\n  ");
        result.push_str(&violation.to_string());
    }
    result
}
