//! SHA-512-crypt password hashing
//!
//! Produces the `$6$<salt>$<digest>` strings Dovecot accepts for the
//! `SHA512-CRYPT` scheme (what `doveadm pw -s SHA512-CRYPT` emits).

use crate::{Error, Result};
use rand::Rng;
use sha_crypt::{sha512_crypt_b64, Sha512Params, ROUNDS_DEFAULT};

/// Scheme prefix of a SHA-512-crypt string
pub const SHA512_PREFIX: &str = "$6$";

/// Longest salt the scheme accepts
pub const SALT_MAX_LEN: usize = 16;

const SALT_ALPHABET: &[u8] = b"./0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Hash a clear-text password.
///
/// Uses the default 5000 rounds, so no `rounds=` field is emitted. A random
/// salt is generated when `salt` is `None`; a given salt must be at most
/// [`SALT_MAX_LEN`] characters from `./0-9A-Za-z`.
pub fn hash_password(password: &str, salt: Option<&str>) -> Result<String> {
    let salt = match salt {
        Some(salt) => {
            check_salt(salt)?;
            salt.to_string()
        }
        None => generate_salt(),
    };

    let params = Sha512Params::new(ROUNDS_DEFAULT)
        .map_err(|e| Error::Password(format!("Invalid hash parameters: {:?}", e)))?;

    let digest = sha512_crypt_b64(password.as_bytes(), salt.as_bytes(), &params)
        .map_err(|e| Error::Password(format!("Failed to hash password: {:?}", e)))?;

    Ok(format!("{}{}${}", SHA512_PREFIX, salt, digest))
}

fn check_salt(salt: &str) -> Result<()> {
    if salt.len() > SALT_MAX_LEN {
        return Err(Error::Password(format!(
            "salt is longer than {} characters",
            SALT_MAX_LEN
        )));
    }
    if !salt.bytes().all(|b| SALT_ALPHABET.contains(&b)) {
        return Err(Error::Password(format!("invalid character in salt '{}'", salt)));
    }
    Ok(())
}

fn generate_salt() -> String {
    let mut rng = rand::thread_rng();
    (0..SALT_MAX_LEN)
        .map(|_| SALT_ALPHABET[rng.gen_range(0..SALT_ALPHABET.len())] as char)
        .collect()
}
