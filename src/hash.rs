//! BLAKE3 hashing for artifact checksums and the build identity

use blake3::Hasher;

/// Hash prefix for BLAKE3 hashes
pub const HASH_PREFIX: &str = "blake3:";

/// Calculate the BLAKE3 hash of a text blob
pub fn hash_text(text: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(text.as_bytes());
    format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex())
}

/// Calculate the build identity hash over every bundling input.
///
/// Covers the monolith text, each module's project-relative path and source
/// text in discovery order, and the manifest text when configured. Null
/// separators keep path/content boundaries unambiguous. Two builds see the
/// same identity iff their inputs are identical, which is what makes the
/// emitted banner reproducible — no wall-clock anywhere.
pub fn build_identity(
    monolith: &str,
    modules: &[(&str, &str)],
    manifest: Option<&str>,
) -> String {
    let mut hasher = Hasher::new();

    hasher.update(monolith.as_bytes());
    hasher.update(b"\0");

    for (path, text) in modules {
        hasher.update(path.as_bytes());
        hasher.update(b"\0");
        hasher.update(text.as_bytes());
        hasher.update(b"\0");
    }

    if let Some(manifest) = manifest {
        hasher.update(manifest.as_bytes());
        hasher.update(b"\0");
    }

    format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex())
}
