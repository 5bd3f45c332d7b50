//! Byte set lookup tables for O(1) membership testing
//!
//! The scanner asks "is this byte one of these delimiters?" on every step, so
//! sets are pre-computed into 256-entry tables. All sets used by the engine
//! are ASCII; multi-byte UTF-8 sequences never match and are stepped over
//! byte by byte, which keeps every reported offset on a char boundary.

/// A set of bytes with O(1) membership
///
/// # Example
///
/// ```rust
/// use headerscan::header::char_class::CharSet;
///
/// let set = CharSet::new(b"{;");
/// assert!(set.contains(b'{'));
/// assert!(!set.contains(b'}'));
/// ```
#[derive(Clone, Copy)]
pub struct CharSet {
    table: [bool; 256],
    len: usize,
}

impl CharSet {
    /// Build a set from its member bytes
    pub const fn new(bytes: &[u8]) -> Self {
        let mut table = [false; 256];
        let mut len = 0;
        let mut i = 0;
        while i < bytes.len() {
            if !table[bytes[i] as usize] {
                table[bytes[i] as usize] = true;
                len += 1;
            }
            i += 1;
        }
        Self { table, len }
    }

    /// Check whether `b` is a member
    #[inline(always)]
    pub const fn contains(&self, b: u8) -> bool {
        self.table[b as usize]
    }

    /// Number of distinct member bytes
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the set has no members
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl std::fmt::Debug for CharSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let members: String = (0u8..=127)
            .filter(|b| self.contains(*b))
            .map(|b| b as char)
            .collect();
        f.debug_tuple("CharSet").field(&members).finish()
    }
}

/// Whitespace bytes skipped between declarations
pub const WHITESPACE: CharSet = CharSet::new(b" \t\n\r\x0b\x0c");

/// Horizontal whitespace (no line breaks)
pub const BLANK: CharSet = CharSet::new(b" \t");

/// Bytes that may appear in a C++ identifier
pub const IDENT: CharSet =
    CharSet::new(b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_");

/// Check if a byte can continue an identifier
#[inline(always)]
pub fn is_ident_byte(b: u8) -> bool {
    IDENT.contains(b)
}

/// Check whether `keyword` occurs at `pos` as a whole word
///
/// The byte before `pos` and the byte after the keyword must not be
/// identifier bytes, so `classic` never matches `class`.
pub fn starts_with_word(text: &str, pos: usize, keyword: &str) -> bool {
    let bytes = text.as_bytes();
    if pos > bytes.len() || !bytes[pos..].starts_with(keyword.as_bytes()) {
        return false;
    }
    if pos > 0 && is_ident_byte(bytes[pos - 1]) {
        return false;
    }
    match bytes.get(pos + keyword.len()) {
        Some(&b) => !is_ident_byte(b),
        None => true,
    }
}

/// Find `keyword` as a whole word at or after `start`
///
/// Returns the offset of the keyword, or `None`.
pub fn find_word(text: &str, start: usize, keyword: &str) -> Option<usize> {
    let finder = memchr::memmem::Finder::new(keyword.as_bytes());
    let bytes = text.as_bytes();
    let mut from = start;
    while from <= bytes.len() {
        let found = from + finder.find(&bytes[from..])?;
        if starts_with_word(text, found, keyword) {
            return Some(found);
        }
        from = found + 1;
    }
    None
}
