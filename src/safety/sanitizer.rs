//! Behavior Sanitizer
//!
//! Post-build normalization pass that reduces on-chain fingerprinting of
//! an instruction before signing. Sanitization is a functional pass: the
//! input instruction is never mutated and the result is stable under
//! repeated application.

use solana_sdk::instruction::Instruction;
use tracing::debug;

/// Per-variant sanitization policy.
///
/// Account reordering is deliberately opt-in: most Solana programs decode
/// accounts positionally, and reordering would change transaction
/// semantics. Only enable it for programs whose account roles are keyed
/// by flags rather than position.
#[derive(Debug, Clone, Default)]
pub struct SanitizePolicy {
    /// Sort the account list by pubkey string. Unsafe for positional
    /// decoders; leave off unless the target program is order-independent.
    pub reorder_accounts: bool,
    /// Adapter-injected payload marker to strip, if the variant adds one.
    pub payload_marker: Option<Vec<u8>>,
}

/// Normalizes instructions according to a [`SanitizePolicy`].
#[derive(Debug, Clone, Default)]
pub struct BehaviorSanitizer {
    policy: SanitizePolicy,
}

impl BehaviorSanitizer {
    pub fn new(policy: SanitizePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &SanitizePolicy {
        &self.policy
    }

    /// Full sanitization pass: strip the payload marker, then normalize
    /// account order where the policy allows it. Idempotent.
    pub fn sanitize(&self, instruction: &Instruction) -> Instruction {
        debug!(program = %instruction.program_id, "sanitizing instruction");
        let stripped = self.strip_metadata(instruction);
        if self.policy.reorder_accounts {
            self.normalize_account_order(&stripped)
        } else {
            stripped
        }
    }

    /// Reorder the account list by pubkey string.
    ///
    /// Correctness hazard: for programs with positional account semantics
    /// this changes what the instruction does. The adapter layer decides
    /// per program whether this is safe; [`SanitizePolicy::reorder_accounts`]
    /// defaults to off for that reason.
    pub fn normalize_account_order(&self, instruction: &Instruction) -> Instruction {
        let mut accounts = instruction.accounts.clone();
        accounts.sort_by_key(|meta| meta.pubkey.to_string());

        Instruction {
            program_id: instruction.program_id,
            accounts,
            data: instruction.data.clone(),
        }
    }

    /// Remove the adapter-injected identifying marker from the payload.
    /// For variants that inject none, this is a no-op copy.
    pub fn strip_metadata(&self, instruction: &Instruction) -> Instruction {
        let data = match &self.policy.payload_marker {
            Some(marker) if !marker.is_empty() && instruction.data.ends_with(marker) => {
                instruction.data[..instruction.data.len() - marker.len()].to_vec()
            }
            _ => instruction.data.clone(),
        };

        Instruction {
            program_id: instruction.program_id,
            accounts: instruction.accounts.clone(),
            data,
        }
    }
}
