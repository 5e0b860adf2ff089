//! Code page resolution for textual field data.

use encoding_rs::{Encoding, IBM866, WINDOWS_1251, WINDOWS_1252};

/// Fallback encoding when neither the caller nor the code-page byte
/// supplies one. Matches the cp866 default historically used by Russian
/// bank registries, the most common source of headerless tables.
pub fn default_encoding() -> &'static Encoding {
    IBM866
}

/// Maps a prolog code-page byte to a text encoding.
///
/// Entries follow the dBASE language-driver table. The "ascii" driver
/// (87) resolves to windows-1252, its Encoding Standard superset. Code
/// pages 1 (cp437) and 2 (cp850) have no Encoding Standard equivalent
/// and resolve to `None` like any unknown byte.
pub fn encoding_for_code_page(code_page: u8) -> Option<&'static Encoding> {
    match code_page {
        3 => Some(WINDOWS_1252),
        87 => Some(WINDOWS_1252),
        101 => Some(IBM866),
        201 => Some(WINDOWS_1251),
        _ => None,
    }
}

/// Resolves a caller-supplied encoding label such as `"cp866"` or
/// `"windows-1251"` against the Encoding Standard label registry.
pub fn encoding_for_label(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.as_bytes())
}
