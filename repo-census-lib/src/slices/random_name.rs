const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of every generated name.
pub const NAME_LEN: usize = 10;

/// A random name of [`NAME_LEN`] lowercase alphanumeric characters.
///
/// Used to keep chunk directories and copied files from colliding; not suitable for secrets.
#[must_use]
pub fn random_name() -> String {
    (0..NAME_LEN)
        .map(|_| char::from(ALPHABET[fastrand::usize(..ALPHABET.len())]))
        .collect()
}
