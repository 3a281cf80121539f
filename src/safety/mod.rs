//! Safety Layer - Transaction-safety pipeline
//!
//! Three gates every instruction passes before signing, in a fixed order:
//!
//! 1. [`AllowlistManager`]: is the target program approved at all?
//!    Checked before any transport call is made.
//! 2. [`InstructionValidator`]: structural checks against the expected
//!    program identity and account-count policy.
//! 3. [`BehaviorSanitizer`]: fingerprint-reducing normalization pass.
//!
//! Adapters own one instance of each and run them in that order inside
//! every transaction build; a failure at any gate aborts the whole build.

pub mod allowlist;
pub mod sanitizer;
pub mod validator;

pub use allowlist::AllowlistManager;
pub use sanitizer::{BehaviorSanitizer, SanitizePolicy};
pub use validator::{InstructionValidator, ValidationError};
