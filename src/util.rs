//! Shared utility functions.

/// Memory scrypt needs for a given cost exponent (r = 8): 128 * r * 2^logn bytes.
pub fn scrypt_memory_bytes(logn: u8) -> u64 {
    // 1024 = 2^10, so anything past 2^53 no longer fits
    if logn > 53 {
        u64::MAX
    } else {
        1024u64 << logn
    }
}

/// Convert a byte count to a human-readable string.
///
/// >= 1 GiB -> "X GiB", >= 1 MiB -> "X MiB", >= 1 KiB -> "X KiB", otherwise -> "X B".
pub fn human_bytes(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    const GIB: u64 = MIB * 1024;
    if bytes >= GIB {
        format!("{} GiB", bytes / GIB)
    } else if bytes >= MIB {
        format!("{} MiB", bytes / MIB)
    } else if bytes >= KIB {
        format!("{} KiB", bytes / KIB)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_bytes_small() {
        assert_eq!(human_bytes(0), "0 B");
        assert_eq!(human_bytes(1023), "1023 B");
    }

    #[test]
    fn test_human_bytes_units() {
        assert_eq!(human_bytes(1024), "1 KiB");
        assert_eq!(human_bytes(1024 * 1024), "1 MiB");
        assert_eq!(human_bytes(3 * 1024 * 1024 * 1024), "3 GiB");
    }

    #[test]
    fn test_scrypt_memory_for_profiles() {
        // Device-link profile
        assert_eq!(human_bytes(scrypt_memory_bytes(10)), "1 MiB");
        // Storage profile
        assert_eq!(human_bytes(scrypt_memory_bytes(16)), "64 MiB");
        assert_eq!(human_bytes(scrypt_memory_bytes(22)), "4 GiB");
    }

    #[test]
    fn test_scrypt_memory_saturates() {
        assert_eq!(scrypt_memory_bytes(255), u64::MAX);
    }
}
