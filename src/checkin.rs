//! Check-in code entry
//!
//! Barcode/QR scanners act as keyboards. If the browser's IME is in Korean
//! mode, the scanned code arrives as Hangul; [`normalize_code`] maps it back
//! to the Latin keys of a 2-set layout that were pressed.

use studyroom_types::{CheckInResponse, RoomId};
use tracing::warn;

/// Initial consonants in Unicode syllable order
const INITIALS: [&str; 19] = [
    "r", "R", "s", "e", "E", "f", "a", "q", "Q", "t", "T", "d", "w", "W", "c", "z", "x", "v", "g",
];

/// Medial vowels in Unicode syllable order
const MEDIALS: [&str; 21] = [
    "k", "o", "i", "O", "j", "p", "u", "P", "h", "hk", "ho", "hl", "y", "n", "nj", "np", "nl", "b", "m", "ml", "l",
];

/// Final consonants in Unicode syllable order; index 0 is "no final"
const FINALS: [&str; 28] = [
    "", "r", "R", "rt", "s", "sw", "sg", "e", "f", "fr", "fa", "fq", "ft", "fx", "fv", "fg", "a", "q", "qt", "t",
    "T", "d", "w", "c", "z", "x", "v", "g",
];

/// Compatibility jamo U+3131..=U+314E
const CONSONANT_JAMO: [&str; 30] = [
    "r", "R", "rt", "s", "sw", "sg", "e", "E", "f", "fr", "fa", "fq", "ft", "fx", "fv", "fg", "a", "q", "Q", "qt",
    "t", "T", "d", "w", "W", "c", "z", "x", "v", "g",
];

const SYLLABLE_BASE: u32 = 0xAC00;
const SYLLABLE_LAST: u32 = 0xD7A3;
const JAMO_CONSONANT_BASE: u32 = 0x3131;
const JAMO_VOWEL_BASE: u32 = 0x314F;
const JAMO_LAST: u32 = 0x3163;

fn push_keys(out: &mut String, c: char) {
    let code = u32::from(c);
    match code {
        SYLLABLE_BASE..=SYLLABLE_LAST => {
            let offset = (code - SYLLABLE_BASE) as usize;
            out.push_str(INITIALS[offset / (21 * 28)]);
            out.push_str(MEDIALS[(offset / 28) % 21]);
            out.push_str(FINALS[offset % 28]);
        }
        JAMO_CONSONANT_BASE..=0x314E => out.push_str(CONSONANT_JAMO[(code - JAMO_CONSONANT_BASE) as usize]),
        JAMO_VOWEL_BASE..=JAMO_LAST => out.push_str(MEDIALS[(code - JAMO_VOWEL_BASE) as usize]),
        _ => out.push(c),
    }
}

/// Map Hangul back to the keys that typed it, then lowercase
pub fn normalize_code(raw: &str) -> String {
    let mut keys = String::with_capacity(raw.len() * 2);
    for c in raw.trim().chars() {
        push_keys(&mut keys, c);
    }
    keys.to_lowercase()
}

/// Keystrokes collected from a scanner until it sends Enter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanBuffer {
    text: String,
}

impl ScanBuffer {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Take the scanned code (normalized) and clear; `None` if nothing was scanned
    pub fn submit(&mut self) -> Option<String> {
        let raw = std::mem::take(&mut self.text);
        let code = normalize_code(&raw);
        (!code.is_empty()).then_some(code)
    }
}

/// Parse a comma separated room id list; bad entries are skipped
pub fn parse_room_ids(raw: &str) -> Vec<RoomId> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse() {
            Ok(id) => Some(id),
            Err(_) => {
                warn!(value = s, "Ignoring invalid room id");
                None
            }
        })
        .collect()
}

pub fn format_room_ids(ids: &[RoomId]) -> String {
    ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
}

/// Greeting for a successful check-in
pub fn success_message(response: &CheckInResponse) -> String {
    match response.check_in_reservations.first() {
        Some(r) if !r.name.is_empty() => format!("{}, you are checked in.", r.name),
        _ => "Checked in.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studyroom_types::CheckedInReservation;

    #[test]
    fn test_normalize_syllables() {
        // 안녕 typed on a 2-set layout is "dkssud"
        assert_eq!(normalize_code("안녕"), "dkssud");
        // compound vowel and compound final
        assert_eq!(normalize_code("뷁"), "qnpfr");
    }

    #[test]
    fn test_normalize_loose_jamo_and_ascii() {
        assert_eq!(normalize_code("ㅁㅠㅊ123"), "abc123");
        assert_eq!(normalize_code("ㅃㅒ"), "qo");
        assert_eq!(normalize_code("  AbC9 "), "abc9");
    }

    #[test]
    fn test_mixed_scan_matches_plain_scan() {
        assert_eq!(normalize_code("ㅁ1ㅠ2"), normalize_code("a1b2"));
    }

    #[test]
    fn test_scan_buffer_submit_clears() {
        let mut buf = ScanBuffer::default();
        assert_eq!(buf.submit(), None);

        buf.set("ㅁㅠㅊ");
        assert_eq!(buf.submit().as_deref(), Some("abc"));
        assert_eq!(buf.text(), "");
    }

    #[test]
    fn test_room_ids() {
        assert_eq!(parse_room_ids("1,2, 3"), vec![1, 2, 3]);
        assert_eq!(parse_room_ids("1,x,"), vec![1]);
        assert!(parse_room_ids("").is_empty());
        assert_eq!(format_room_ids(&[4, 5]), "4,5");
    }

    #[test]
    fn test_success_message_uses_first_name() {
        let resp = CheckInResponse {
            check_in_reservations: vec![
                CheckedInReservation {
                    reservation_id: 1,
                    name: "Kim".into(),
                },
                CheckedInReservation {
                    reservation_id: 2,
                    name: "Lee".into(),
                },
            ],
        };
        assert_eq!(success_message(&resp), "Kim, you are checked in.");
        assert_eq!(success_message(&CheckInResponse::default()), "Checked in.");
    }
}
