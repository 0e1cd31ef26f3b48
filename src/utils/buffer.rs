//! Growable byte buffer used to assemble strings.
//!
//! Tracks its own logical capacity so growth is observable and always
//! follows the doubling policy:
//!
//! ```text
//! capacity = INITIAL_CAPACITY * GROWTH_FACTOR^n
//! ```
//!
//! Only `buf[..len]` is live; whatever the backing storage holds past that
//! point is never read.

/// Capacity of a freshly created builder, in bytes.
pub const INITIAL_CAPACITY: usize = 32;

/// Multiplier applied to the capacity whenever an append would overflow it.
pub const GROWTH_FACTOR: usize = 2;

/// Append-only byte buffer with amortized doubling growth.
#[derive(Debug, Clone)]
pub struct StringBuilder {
    buf: Vec<u8>,
    len: usize,
    capacity: usize,
}

impl StringBuilder {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Create a builder with a custom initial capacity (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buf: vec![0; capacity],
            len: 0,
            capacity,
        }
    }

    /// Append a whole string.
    #[inline]
    pub fn append(&mut self, s: &str) {
        self.append_bytes(s.as_bytes());
    }

    /// Append at most `max` bytes of `s`.
    ///
    /// The cut is moved back to a character boundary, so a character is never
    /// split. A cap larger than `s` copies all of it.
    #[allow(unused)]
    pub fn append_n(&mut self, s: &str, max: usize) {
        let mut count = max.min(s.len());
        while !s.is_char_boundary(count) {
            count -= 1;
        }
        self.append(&s[..count]);
    }

    /// Append a single byte.
    pub fn append_byte(&mut self, byte: u8) {
        self.reserve(1);
        self.buf[self.len] = byte;
        self.len += 1;
    }

    /// Append raw bytes.
    pub fn append_bytes(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        self.reserve(bytes.len());
        self.buf[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
    }

    /// Reset the length to zero, keeping the allocated capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Copy the live bytes out as a string.
    pub fn build(&self) -> String {
        String::from_utf8_lossy(self.as_bytes()).into_owned()
    }

    /// Copy the live bytes out in reverse order.
    ///
    /// Bytes are reversed individually, so a buffer that was filled
    /// back-to-front (as the path decomposer does) comes out in source order.
    pub fn build_reversed(&self) -> String {
        let reversed: Vec<u8> = self.as_bytes().iter().rev().copied().collect();
        String::from_utf8_lossy(&reversed).into_owned()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    #[inline]
    #[allow(unused)]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[allow(unused)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    #[allow(unused)]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Double the capacity until `additional` more bytes fit.
    fn reserve(&mut self, additional: usize) {
        let needed = self.len + additional;
        if needed <= self.capacity {
            return;
        }

        let mut capacity = self.capacity;
        while capacity < needed {
            capacity *= GROWTH_FACTOR;
        }

        self.buf.resize(capacity, 0);
        self.capacity = capacity;
    }
}

impl Default for StringBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_mixed() {
        let mut builder = StringBuilder::new();
        builder.append("saske\t");
        builder.append("naruto");
        builder.append("sakurã");
        builder.append("dasjkldjaskd\n\nllll");
        builder.append_byte(b'k');
        builder.append_byte(b'l');
        builder.append_byte(b'i');
        builder.append("veryloongworkkkkkkkkdddasdsa");
        builder.append_byte(b'x');

        assert_eq!(
            builder.build(),
            "saske\tnarutosakurãdasjkldjaskd\n\nllllkliveryloongworkkkkkkkkdddasdsax"
        );
    }

    #[test]
    fn test_capacity_doubles_with_bytes() {
        let mut builder = StringBuilder::new();
        for _ in 0..64 {
            builder.append_byte(b'x');
        }

        assert_eq!(builder.build(), "x".repeat(64));
        assert_eq!(builder.len(), 64);

        let capacity = builder.capacity();
        assert!(capacity >= 64);
        assert_eq!(capacity % INITIAL_CAPACITY, 0);
        assert!((capacity / INITIAL_CAPACITY).is_power_of_two());
    }

    #[test]
    fn test_large_append_grows_in_one_step() {
        // Needs several doublings at once: 32 -> 64 -> 128 -> 256
        let mut builder = StringBuilder::new();
        let long = "a".repeat(200);
        builder.append(&long);

        assert_eq!(builder.capacity(), 256);
        assert_eq!(builder.build(), long);
    }

    #[test]
    fn test_build_reversed() {
        let mut builder = StringBuilder::new();
        for byte in b"abcd" {
            builder.append_byte(*byte);
        }
        assert_eq!(builder.build_reversed(), "dcba");
    }

    #[test]
    fn test_build_reversed_restores_multibyte() {
        // Filled back-to-front, like the path decomposer does
        let mut builder = StringBuilder::new();
        for byte in "sakurã".bytes().rev() {
            builder.append_byte(byte);
        }
        assert_eq!(builder.build_reversed(), "sakurã");
    }

    #[test]
    fn test_empty_builder() {
        let builder = StringBuilder::new();
        assert_eq!(builder.build(), "");
        assert_eq!(builder.build_reversed(), "");
        assert!(builder.is_empty());
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut builder = StringBuilder::new();
        builder.append(&"somerandomstuff".repeat(4));
        let capacity = builder.capacity();
        assert_eq!(builder.build(), "somerandomstuff".repeat(4));

        builder.clear();
        assert_eq!(builder.build(), "");
        assert_eq!(builder.capacity(), capacity);

        builder.append("again");
        assert_eq!(builder.build(), "again");
    }

    #[test]
    fn test_append_n_truncates() {
        let mut builder = StringBuilder::new();
        builder.append_n("somerandomstuff", 4);
        assert_eq!(builder.build(), "some");
    }

    #[test]
    fn test_append_n_stops_at_char_boundary() {
        let mut builder = StringBuilder::new();
        builder.append_n("ã", 1);
        assert_eq!(builder.build(), "");

        builder.append_n("sakurã", 6);
        assert_eq!(builder.build(), "sakur");

        builder.clear();
        builder.append_n("sakurã", 7);
        assert_eq!(builder.build(), "sakurã");
    }

    #[test]
    fn test_append_n_cap_larger_than_source() {
        let mut builder = StringBuilder::new();
        builder.append_n("somerandomstuf", 999_999);
        assert_eq!(builder.build(), "somerandomstuf");
    }

    #[test]
    fn test_append_empty_is_noop() {
        let mut builder = StringBuilder::new();
        builder.append("");
        builder.append_n("abc", 0);
        assert!(builder.is_empty());
        assert_eq!(builder.capacity(), INITIAL_CAPACITY);
    }
}
