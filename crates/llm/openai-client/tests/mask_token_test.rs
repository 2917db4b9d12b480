//! Unit tests for [`openai_client::mask_token`].
//!
//! Ensures API keys are masked for safe logging: first 7 chars + `***` + last 4 chars.
//! Keys of length ≤ 11 (or non-ASCII keys) are fully masked as `***`.

use openai_client::mask_token;

/// **Test: Short or empty tokens are fully masked.**
///
/// **Expected:** Any token of length ≤ 11 returns `"***"` (no prefix/suffix shown).
#[test]
fn mask_token_short_returns_all_star() {
    assert_eq!(mask_token(""), "***");
    assert_eq!(mask_token("a"), "***");
    assert_eq!(mask_token("sk-12345"), "***");
    assert_eq!(mask_token("sk-proj-12"), "***");
}

/// **Test: Long tokens show first 7 and last 4 characters.**
#[test]
fn mask_token_long_shows_head_and_tail() {
    assert_eq!(mask_token("sk-proj-abcdefghijklmnop"), "sk-proj***mnop");
    assert_eq!(mask_token("sk-proj-xyzw"), "sk-proj***xyzw");
}

/// **Test: A key pasted with non-ASCII characters is never sliced.**
///
/// **Expected:** Fully masked instead of panicking on a char boundary.
#[test]
fn mask_token_non_ascii_fully_masked() {
    assert_eq!(mask_token("ключ-ключ-ключ-ключ"), "***");
}
