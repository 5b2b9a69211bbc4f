//! Short code generation.
//!
//! Codes are drawn from the operating system CSPRNG so that knowing some
//! codes reveals nothing about others.

use crate::error::AppError;

/// Alphabet for generated codes: lowercase, uppercase, digits.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default length of generated codes.
pub const DEFAULT_CODE_LENGTH: usize = 7;

/// Largest multiple of the alphabet size that fits in a byte.
///
/// Bytes at or above this value are rejected so every symbol stays equally likely.
const REJECTION_BOUND: u8 = (256 / ALPHABET.len() * ALPHABET.len()) as u8;

/// Source of candidate short codes.
///
/// Implementations are pure generators with no knowledge of storage;
/// uniqueness is arbitrated by the [`crate::domain::repositories::LinkRepository`].
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Returns a code of exactly `length` characters.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::RandomSourceUnavailable`] if no randomness can be obtained.
    fn generate(&self, length: usize) -> Result<String, AppError>;
}

/// [`CodeGenerator`] backed by the operating system entropy source.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self, length: usize) -> Result<String, AppError> {
        generate_code(length)
    }
}

/// Generates a cryptographically secure random short code.
///
/// Each character is drawn independently and uniformly from [`ALPHABET`].
///
/// # Errors
///
/// Returns [`AppError::RandomSourceUnavailable`] if `getrandom` fails.
///
/// # Examples
///
/// ```
/// use url_shortener::utils::code_generator::generate_code;
///
/// let code = generate_code(7).unwrap();
/// assert_eq!(code.len(), 7);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> Result<String, AppError> {
    let mut code = String::with_capacity(length);
    // Rejection discards ~3% of bytes, so one extra chunk usually suffices.
    let mut buffer = vec![0u8; length + length / 8 + 4];

    while code.len() < length {
        getrandom::fill(&mut buffer)
            .map_err(|e| AppError::RandomSourceUnavailable(e.to_string()))?;

        for &byte in buffer.iter().filter(|&&b| b < REJECTION_BOUND) {
            if code.len() == length {
                break;
            }
            code.push(ALPHABET[usize::from(byte) % ALPHABET.len()] as char);
        }
    }

    Ok(code)
}

/// Returns true if `code` could possibly name a stored mapping.
///
/// Empty codes and codes containing a path separator are rejected before any
/// storage lookup.
pub fn is_well_formed_code(code: &str) -> bool {
    !code.is_empty() && !code.contains(['/', '\\'])
}
