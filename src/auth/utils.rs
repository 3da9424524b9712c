use sha2::{Digest, Sha256};

/// Unsalted SHA-256 digest, lowercase hex. Accounts in `User_data.csv` are
/// stored this way.
pub fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

pub fn verify_password(password: &str, hashed_password: &str) -> bool {
    hash_password(password) == hashed_password
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic_hex() {
        let hashed = hash_password("s3cret");
        assert_eq!(hashed, hash_password("s3cret"));
        assert_eq!(hashed.len(), 64);
        assert!(hashed.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn matches_sha256_hex() {
        assert_eq!(
            hash_password("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn verifies_only_the_original_password() {
        for password in ["", "a", "hunter2", "pässwörd", "with space "].iter() {
            let hashed = hash_password(password);
            assert!(verify_password(password, &hashed));
            assert!(!verify_password(&format!("{}x", password), &hashed));
        }
    }

    #[test]
    fn rejects_a_stored_plaintext() {
        assert!(!verify_password("hunter2", "hunter2"));
    }
}
