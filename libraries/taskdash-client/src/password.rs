//! Password hashing.

use crate::error::Result;
use tracing::warn;

/// Hash a password using bcrypt
pub(crate) fn hash_password(password: &str, cost: u32) -> Result<String> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Whether `stored` is a bcrypt hash rather than a plaintext password.
pub(crate) fn is_hashed(stored: &str) -> bool {
    stored.len() == 60 && stored.starts_with("$2")
}

/// Check `password` against a stored value.
///
/// Plaintext values left by older clients match only by exact equality, and
/// only when `accept_plaintext` is set.
pub(crate) fn verify_password(password: &str, stored: &str, accept_plaintext: bool) -> bool {
    if is_hashed(stored) {
        return match bcrypt::verify(password, stored) {
            Ok(matches) => matches,
            Err(e) => {
                warn!(error = %e, "Stored password hash is malformed");
                false
            }
        };
    }

    if !accept_plaintext || stored.is_empty() {
        return false;
    }

    warn!("Stored password is not hashed; comparing as plaintext");
    stored == password
}
