macro_rules! byte_map {
    // ===== 256 lookup table =====
    {
        $(#[$meta:meta])*
        $vis:vis const fn $fn_id:ident($byte:ident:$u8:ty) { $e:expr }
    } => {
        $(#[$meta])*
        $vis const fn $fn_id($byte: $u8) -> bool {
            static PAT: [bool; 256] = {
                let mut bytes = [false; 256];
                let mut $byte = 0u8;
                const fn filter($byte: $u8) -> bool {
                    $e
                }
                loop {
                    bytes[$byte as usize] = filter($byte);
                    if $byte == 255 {
                        break;
                    }
                    $byte += 1;
                }
                bytes
            };
            PAT[$byte as usize]
        }
    };
}

byte_map! {
    /// token   = 1*tchar
    /// tchar   = "!" / "#" / "$" / "%" / "&" / "'" / "*"
    ///         / "+" / "-" / "." / "^" / "_" / "`" / "|" / "~"
    ///         / DIGIT / ALPHA
    #[inline(always)]
    pub const fn is_token(byte: u8) {
        matches!(
            byte,
            | b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*'
            | b'+' | b'-' | b'.' | b'^' | b'_' | b'`' | b'|' | b'~'
        )
        || byte.is_ascii_alphanumeric()
    }
}

byte_map! {
    /// field-content = field-vchar [ 1*( SP / HTAB / field-vchar ) field-vchar ]
    /// field-vchar   = VCHAR / obs-text
    #[inline(always)]
    pub const fn is_field_byte(byte: u8) {
        matches!(byte, b'\t' | b' '..=b'~' | 0x80..=0xFF)
    }
}

/// Any invalid character will have it MSB set.
///
/// Character is normalized to lowercase.
pub const HEADER_NAME: [u8; 256] = {
    let mut bytes = [0b10000000; 256];
    let mut i = 0u8;
    loop {
        if is_token(i) {
            bytes[i as usize] = i.to_ascii_lowercase();
        }
        if i == 255 {
            break;
        }
        i += 1;
    }
    bytes
};

/// FNV-1a, 32 bit.
pub const fn hash_32(bytes: &[u8]) -> u32 {
    const BASIS: u32 = 0x811C_9DC5;
    const PRIME: u32 = 0x0100_0193;

    let mut hash = BASIS;
    let mut i = 0;

    while i < bytes.len() {
        hash ^= bytes[i] as u32;
        hash = hash.wrapping_mul(PRIME);
        i += 1;
    }

    hash
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn token_table() {
        assert!(is_token(b'a'));
        assert!(is_token(b'Z'));
        assert!(is_token(b'-'));
        assert!(!is_token(b':'));
        assert!(!is_token(b' '));
        assert!(!is_token(0xC3));

        assert_eq!(HEADER_NAME[b'A' as usize], b'a');
        assert_eq!(HEADER_NAME[b':' as usize] & 128, 128);
    }

    #[test]
    fn field_table() {
        assert!(is_field_byte(b'\t'));
        assert!(is_field_byte(b' '));
        assert!(is_field_byte(0xE2));
        assert!(!is_field_byte(b'\r'));
        assert!(!is_field_byte(b'\n'));
        assert!(!is_field_byte(0));
        assert!(!is_field_byte(0x7F));
    }

    #[test]
    fn fnv() {
        assert_eq!(hash_32(b""), 0x811C_9DC5);
        assert_eq!(hash_32(b"a"), 0xE40C_292C);
    }
}
