pub mod activate;
pub mod admin;
pub mod authenticate;
pub mod password_reset;
pub mod register;

use rand::RngExt;

use crate::domain::types::TOKEN_LEN;

/// Charset for token values (lowercase hex, the legacy wire format).
const CHARSET: &[u8] = b"0123456789abcdef";

/// Generate an opaque single-use token value.
pub(crate) fn generate_token() -> String {
    let mut rng = rand::rng();
    (0..TOKEN_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}
