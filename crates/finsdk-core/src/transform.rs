//! Stateless string-transform entry points.
//!
//! All three are labeled-concatenation placeholders: "encrypt" and "decrypt"
//! are not inverses of each other and "process" performs no analysis. Absent
//! input yields a fixed sentinel string instead of an error value, matching
//! the host-facing contract.
use tracing::warn;

/// Fixed reply returned by every transform when the input is absent.
pub const NULL_INPUT_ERROR: &str = "Error: Null input";

/// Label prefixed by [`process_memory`].
pub const PROCESSED_PREFIX: &str = "Processed Memory: ";

/// Label prefixed by [`encrypt`].
pub const ENCRYPTED_PREFIX: &str = "Encrypted: ";

/// Label prefixed by [`decrypt`].
pub const DECRYPTED_PREFIX: &str = "Decrypted: ";

/// Prefix the input with the memory-processing label.
pub fn process_memory(input: Option<&str>) -> String {
    label(PROCESSED_PREFIX, input)
}

/// Prefix the input with the encryption label. Not real cryptography.
pub fn encrypt(input: Option<&str>) -> String {
    label(ENCRYPTED_PREFIX, input)
}

/// Prefix the input with the decryption label. Does not invert [`encrypt`].
pub fn decrypt(input: Option<&str>) -> String {
    label(DECRYPTED_PREFIX, input)
}

fn label(prefix: &str, input: Option<&str>) -> String {
    match input {
        Some(s) => {
            let mut out = String::with_capacity(prefix.len() + s.len());
            out.push_str(prefix);
            out.push_str(s);
            out
        }
        None => {
            warn!(prefix, "transform received null input");
            NULL_INPUT_ERROR.to_string()
        }
    }
}
