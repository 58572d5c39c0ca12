//! Key Codec Module
//!
//! Bidirectional mapping between a resource locator and a flat on-disk
//! filename. Path separators would nest the file under subdirectories, so
//! every `/` is substituted with a fixed sentinel character.
//!
//! The transform is lossy for keys that contain the sentinel verbatim: a
//! locator with a literal `-` decodes to a different key than it was encoded
//! from. Known limitation of the filename convention.

/// Character substituted for `/` in on-disk filenames.
const SENTINEL: char = '-';

// == To Disk Name ==
/// Converts a cache key to its flat on-disk filename.
pub fn to_disk_name(key: &str) -> String {
    key.replace('/', &SENTINEL.to_string())
}

// == From Disk Name ==
/// Converts an on-disk filename back to the cache key it was encoded from.
pub fn from_disk_name(name: &str) -> String {
    name.replace(SENTINEL, "/")
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_disk_name_replaces_separators() {
        assert_eq!(
            to_disk_name("http://example.com/a/b.png"),
            "http:--example.com-a-b.png"
        );
    }

    #[test]
    fn test_from_disk_name_restores_separators() {
        assert_eq!(
            from_disk_name("http:--example.com-a-b.png"),
            "http://example.com/a/b.png"
        );
    }

    #[test]
    fn test_round_trip_without_sentinel() {
        let key = "http://example.com/assets/logo.png";
        assert_eq!(from_disk_name(&to_disk_name(key)), key);
    }

    #[test]
    fn test_key_without_separators_unchanged() {
        assert_eq!(to_disk_name("plainkey"), "plainkey");
        assert_eq!(from_disk_name("plainkey"), "plainkey");
    }

    #[test]
    fn test_sentinel_collision_is_lossy() {
        // A key containing the sentinel verbatim does not round-trip.
        let key = "http://example.com/some-page";
        assert_ne!(from_disk_name(&to_disk_name(key)), key);
    }
}
