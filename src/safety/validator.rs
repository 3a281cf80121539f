//! Instruction Validator
//!
//! Structural checks on a built instruction before it is signed. The
//! validator never inspects payload semantics; interpreting the byte
//! payload is the owning adapter's job. A validation failure means the
//! instruction-building logic is defective, so these errors are fatal
//! and never retried.

use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("instruction targets program {actual}, expected {expected}")]
    ProgramMismatch { expected: Pubkey, actual: Pubkey },

    #[error("instruction has no accounts")]
    EmptyAccounts,

    #[error("instruction has {actual} accounts, requires at least {required}")]
    InsufficientAccounts { required: usize, actual: usize },
}

/// Structural validator for built instructions.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstructionValidator;

impl InstructionValidator {
    pub fn new() -> Self {
        Self
    }

    /// Check that the instruction targets the expected program and carries
    /// at least one account. A missing payload is only a warning: some
    /// program variants legitimately take zero-length data.
    pub fn validate(
        &self,
        instruction: &Instruction,
        expected_program: &Pubkey,
    ) -> Result<(), ValidationError> {
        if instruction.program_id != *expected_program {
            return Err(ValidationError::ProgramMismatch {
                expected: *expected_program,
                actual: instruction.program_id,
            });
        }

        if instruction.accounts.is_empty() {
            return Err(ValidationError::EmptyAccounts);
        }

        if instruction.data.is_empty() {
            warn!(program = %instruction.program_id, "instruction has empty payload");
        }

        debug!(program = %expected_program, "instruction validated");
        Ok(())
    }

    /// Check that the instruction carries at least `required` accounts.
    pub fn validate_account_count(
        &self,
        instruction: &Instruction,
        required: usize,
    ) -> Result<(), ValidationError> {
        let actual = instruction.accounts.len();
        if actual < required {
            return Err(ValidationError::InsufficientAccounts { required, actual });
        }
        Ok(())
    }
}
