use rand::distributions::Alphanumeric;
use rand::Rng;

/// Default length of generated values.
pub const DEFAULT_LENGTH: usize = 32;

/// The 62 characters generated values are drawn from.
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Random alphanumeric string of exactly `length` characters, for `state`
/// and `nonce` values.
///
/// Uses the thread-local CSPRNG.
pub fn generate_random_string(length: usize) -> String {
    generate_random_string_with(&mut rand::thread_rng(), length)
}

/// Same as [`generate_random_string`] with a caller-supplied generator.
pub fn generate_random_string_with<R: Rng>(rng: &mut R, length: usize) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
