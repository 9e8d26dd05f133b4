//! Sensitive-string masking helpers
//!
//! Masks values before they reach logs or user-facing output. The default
//! is a fixed-length mask so the rendered value leaks nothing about the
//! original's length.

use tracing::{debug, error};

use crate::constants::{DEFAULT_MASK_CHAR, DEFAULT_MASK_LENGTH};

/// Options controlling how a sensitive string is masked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskOptions {
    /// Whether masking is applied at all; when false the input passes through
    pub mask_flag: bool,
    /// Emit a fixed number of mask characters instead of matching the
    /// input's length
    pub use_fixed_mask_length: bool,
    /// Number of mask characters emitted when fixed-length masking is on
    pub mask_length: usize,
    /// The character used for masking
    pub mask_char: char,
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self {
            mask_flag: true,
            use_fixed_mask_length: true,
            mask_length: DEFAULT_MASK_LENGTH,
            mask_char: DEFAULT_MASK_CHAR,
        }
    }
}

impl MaskOptions {
    /// Mask with as many characters as the input has
    pub fn variable_length(mut self) -> Self {
        self.use_fixed_mask_length = false;
        self
    }

    /// Disable masking entirely
    pub fn disabled(mut self) -> Self {
        self.mask_flag = false;
        self
    }

    /// Set the mask character
    pub fn mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    /// Set the fixed mask length
    pub fn mask_length(mut self, mask_length: usize) -> Self {
        self.mask_length = mask_length;
        self
    }
}

/// Mask a sensitive string for display
///
/// An absent input logs an error and yields an empty string rather than
/// failing; an empty input yields an empty string.
pub fn mask_sensitive_string(input: Option<&str>, options: &MaskOptions) -> String {
    let input = match input {
        Some(s) => s,
        None => {
            error!("mask input was absent - returning an empty string");
            return String::new();
        }
    };

    let result = if input.is_empty() {
        String::new()
    } else if options.mask_flag && options.use_fixed_mask_length {
        options
            .mask_char
            .to_string()
            .repeat(options.mask_length)
    } else if options.mask_flag {
        options.mask_char.to_string().repeat(input.chars().count())
    } else {
        input.to_string()
    };

    debug!("masked string length: {}", result.chars().count());
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_length_mask() {
        let masked = mask_sensitive_string(Some("hunter2"), &MaskOptions::default());
        assert_eq!(masked, "********");
    }

    #[test]
    fn test_variable_length_mask() {
        let options = MaskOptions::default().variable_length();
        assert_eq!(mask_sensitive_string(Some("abc"), &options), "***");
    }

    #[test]
    fn test_masking_disabled() {
        let options = MaskOptions::default().disabled();
        assert_eq!(mask_sensitive_string(Some("abc"), &options), "abc");
    }

    #[test]
    fn test_custom_mask_char_and_length() {
        let options = MaskOptions::default().mask_char('#').mask_length(3);
        assert_eq!(mask_sensitive_string(Some("secret"), &options), "###");
    }

    #[test]
    fn test_absent_and_empty_input() {
        assert_eq!(mask_sensitive_string(None, &MaskOptions::default()), "");
        assert_eq!(mask_sensitive_string(Some(""), &MaskOptions::default()), "");
    }
}
