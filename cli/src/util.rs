// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Number of grapheme clusters in `s`.
pub fn grapheme_len(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Display width of the first `n` grapheme clusters of `s`.
pub fn unicode_width_of_slice(s: &str, n: usize) -> usize {
    s.graphemes(true).take(n).map(UnicodeWidthStr::width).sum()
}

/// Return the byte range of the grapheme cluster at index `g_idx` in `s`.
/// If out of bounds, returns None.
pub fn byte_range_of_grapheme_at(s: &str, g_idx: usize) -> Option<Range<usize>> {
    s.grapheme_indices(true)
        .nth(g_idx)
        .map(|(start, g)| start..start + g.len())
}

/// Byte offset where the grapheme cluster at `g_idx` starts, the end of `s` when out of
/// bounds.
pub fn byte_index_of_grapheme(s: &str, g_idx: usize) -> usize {
    s.grapheme_indices(true)
        .nth(g_idx)
        .map_or(s.len(), |(start, _)| start)
}

/// Serializes tests that touch process environment variables.
#[cfg(test)]
pub fn env_lock() -> &'static tokio::sync::Mutex<()> {
    use std::sync::OnceLock;

    static ENV_LOCK: OnceLock<tokio::sync::Mutex<()>> = OnceLock::new();
    ENV_LOCK.get_or_init(|| tokio::sync::Mutex::new(()))
}
