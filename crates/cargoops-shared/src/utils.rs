//! Utility functions

/// Redact an opaque credential for logs, keeping only a short prefix.
pub fn mask_credential(credential: &str) -> String {
    let prefix: String = credential.chars().take(4).collect();
    if prefix.chars().count() < 4 || credential.chars().count() <= 8 {
        "***".to_string()
    } else {
        format!("{}***", prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_long_credential() {
        assert_eq!(mask_credential("adm-12345678"), "adm-***");
    }

    #[test]
    fn test_mask_short_credential() {
        assert_eq!(mask_credential("abc"), "***");
        assert_eq!(mask_credential("12345678"), "***");
    }
}
