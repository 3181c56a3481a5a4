//! Bob Jenkins' lookup3 `hashlittle2`, as used by CASC to name files.
//!
//! CASC stores a listfile entry as the 64-bit value `(c << 32) | b` produced by
//! `hashlittle2` with both seeds at zero, computed over the upper-cased,
//! backslash-separated path. Callers normalise; these functions hash the exact
//! bytes they are given.

/// Number of distinct bucket keys produced by [`bucket_key`].
pub const BUCKET_COUNT: usize = 256;

#[inline(always)]
fn mix(a: &mut u32, b: &mut u32, c: &mut u32) {
    *a = a.wrapping_sub(*c);
    *a ^= c.rotate_left(4);
    *c = c.wrapping_add(*b);
    *b = b.wrapping_sub(*a);
    *b ^= a.rotate_left(6);
    *a = a.wrapping_add(*c);
    *c = c.wrapping_sub(*b);
    *c ^= b.rotate_left(8);
    *b = b.wrapping_add(*a);
    *a = a.wrapping_sub(*c);
    *a ^= c.rotate_left(16);
    *c = c.wrapping_add(*b);
    *b = b.wrapping_sub(*a);
    *b ^= a.rotate_left(19);
    *a = a.wrapping_add(*c);
    *c = c.wrapping_sub(*b);
    *c ^= b.rotate_left(4);
    *b = b.wrapping_add(*a);
}

#[inline(always)]
fn final_mix(a: &mut u32, b: &mut u32, c: &mut u32) {
    *c ^= *b;
    *c = c.wrapping_sub(b.rotate_left(14));
    *a ^= *c;
    *a = a.wrapping_sub(c.rotate_left(11));
    *b ^= *a;
    *b = b.wrapping_sub(a.rotate_left(25));
    *c ^= *b;
    *c = c.wrapping_sub(b.rotate_left(16));
    *a ^= *c;
    *a = a.wrapping_sub(c.rotate_left(4));
    *b ^= *a;
    *b = b.wrapping_sub(a.rotate_left(14));
    *c ^= *b;
    *c = c.wrapping_sub(b.rotate_left(24));
}

#[inline(always)]
fn read_u32(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Computes lookup3 `hashlittle2` over `key` with the seeds `pc` and `pb`.
///
/// Returns `(c, b)`, the primary and secondary 32-bit results, in the order
/// the reference implementation writes them back through `pc` and `pb`.
pub fn hashlittle2(key: &[u8], pc: u32, pb: u32) -> (u32, u32) {
    let init = 0xdead_beef_u32.wrapping_add(key.len() as u32).wrapping_add(pc);
    let (mut a, mut b, mut c) = (init, init, init.wrapping_add(pb));

    let mut rest = key;
    while rest.len() > 12 {
        a = a.wrapping_add(read_u32(&rest[0..4]));
        b = b.wrapping_add(read_u32(&rest[4..8]));
        c = c.wrapping_add(read_u32(&rest[8..12]));
        mix(&mut a, &mut b, &mut c);
        rest = &rest[12..];
    }

    // Zero-length tail skips the final mix.
    if rest.is_empty() {
        return (c, b);
    }

    // Bytes past the end contribute nothing, so a zero-padded block matches
    // the byte-wise fallthrough of the reference switch.
    let mut tail = [0u8; 12];
    tail[..rest.len()].copy_from_slice(rest);
    a = a.wrapping_add(read_u32(&tail[0..4]));
    b = b.wrapping_add(read_u32(&tail[4..8]));
    c = c.wrapping_add(read_u32(&tail[8..12]));
    final_mix(&mut a, &mut b, &mut c);

    (c, b)
}

/// Hashes an already-normalised path the way CASC root files key it.
#[inline]
pub fn hash_path(path: &str) -> u64 {
    let (c, b) = hashlittle2(path.as_bytes(), 0, 0);
    ((c as u64) << 32) | b as u64
}

/// Projects a hash onto one of [`BUCKET_COUNT`] buckets (its low byte).
///
/// The index is built and probed with this same projection.
#[inline(always)]
pub const fn bucket_key(hash: u64) -> u8 {
    (hash & 0xFF) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOUR_SCORE: &[u8] = b"Four score and seven years ago";

    #[test]
    fn test_hashlittle2_empty() {
        assert_eq!(hashlittle2(b"", 0, 0), (0xdeadbeef, 0xdeadbeef));
        assert_eq!(hashlittle2(b"", 0, 0xdeadbeef), (0xbd5b7dde, 0xdeadbeef));
        assert_eq!(
            hashlittle2(b"", 0xdeadbeef, 0xdeadbeef),
            (0x9c093ccd, 0xbd5b7dde)
        );
    }

    #[test]
    fn test_hashlittle2_reference_vectors() {
        assert_eq!(hashlittle2(FOUR_SCORE, 0, 0), (0x17770551, 0xce7226e6));
        assert_eq!(hashlittle2(FOUR_SCORE, 0, 1), (0xe3607cae, 0xbd371de4));
        assert_eq!(hashlittle2(FOUR_SCORE, 1, 0), (0xcd628161, 0x6cbea4b3));
    }

    #[test]
    fn test_hash_path_vectors() {
        assert_eq!(hash_path(""), 0xdeadbeef_deadbeef);
        assert_eq!(hash_path("FOO\\BAR.BLP"), 0x60dd81ca_811a3e2e);
        assert_eq!(hash_path("A\\B_C_D.BLP"), 0x1b90b307_e1312f90);
        assert_eq!(
            hash_path("INTERFACE\\ICONS\\INV_MISC_QUESTIONMARK.BLP"),
            0x9eb59e3c_76124837
        );
    }

    #[test]
    fn test_exact_block_length() {
        // 12 bytes exactly: one block handled entirely by the tail path.
        assert_eq!(hash_path("ABCDEFGHIJKL"), 0x4dcc6ecf_4f3dc944);
    }

    #[test]
    fn test_hash_is_case_and_order_sensitive() {
        assert_ne!(hash_path("FOO\\BAR.BLP"), hash_path("foo\\bar.blp"));
        assert_ne!(hash_path("AB"), hash_path("BA"));
        assert_eq!(hash_path("FOO\\BAR.BLP"), hash_path("FOO\\BAR.BLP"));
    }

    #[test]
    fn test_bucket_key_is_low_byte() {
        assert_eq!(bucket_key(0), 0);
        assert_eq!(bucket_key(0x1234_5678_9ABC_DEF0), 0xF0);
        assert_eq!(bucket_key(u64::MAX), 0xFF);
        assert_eq!(bucket_key(hash_path("FOO\\BAR.BLP")), 46);
    }
}
