use time::OffsetDateTime;

pub const DEFAULT_SUFFIX_LEN: usize = 20;

const ALPHABET: [char; 62] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l',
    'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '0', '1', '2', '3', '4',
    '5', '6', '7', '8', '9',
];

pub fn generate() -> String {
    generate_with_suffix_len(DEFAULT_SUFFIX_LEN)
}

pub fn generate_with_suffix_len(suffix_len: usize) -> String {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    format!(
        "{}_{}",
        base36(millis.max(0) as u128),
        nanoid::nanoid!(suffix_len, &ALPHABET)
    )
}

fn base36(mut value: u128) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(DIGITS[(value % 36) as usize] as char);
        value /= 36;
    }
    digits.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_has_timestamp_prefix_and_random_suffix() {
        let id = generate();
        let (prefix, suffix) = id.split_once('_').expect("separator");
        assert!(!prefix.is_empty());
        assert!(prefix.chars().all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit()));
        assert_eq!(suffix.len(), DEFAULT_SUFFIX_LEN);
        assert!(suffix.chars().all(|ch| ch.is_ascii_alphanumeric()));
    }

    #[test]
    fn prefix_decodes_back_to_a_recent_timestamp() {
        let id = generate();
        let (prefix, _) = id.split_once('_').expect("separator");
        let decoded = u64::from_str_radix(prefix, 36).expect("base36 prefix");
        let now = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as u64;
        assert!(decoded <= now);
        assert!(now - decoded < 60_000);
    }

    #[test]
    fn suffix_length_is_configurable() {
        let id = generate_with_suffix_len(8);
        let (_, suffix) = id.split_once('_').expect("separator");
        assert_eq!(suffix.len(), 8);
    }

    #[test]
    fn consecutive_identifiers_differ() {
        assert_ne!(generate(), generate());
    }

    #[test]
    fn base36_renders_lowercase_digits() {
        assert_eq!(base36(0), "0");
        assert_eq!(base36(35), "z");
        assert_eq!(base36(36), "10");
        assert_eq!(base36(46_655), "zzz");
        assert_eq!(base36(1_700_000_000_000), "loyw3v28");
    }
}
