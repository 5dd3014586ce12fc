use super::time_slot::ALL_TIME_SLOTS;
use crate::http_handler::http_handler_common::RawRoomAvailability;
use rand::Rng;

/// Known studios with fixed substitute availability: name and per sub-room `(times, url)`.
const FALLBACK_TABLE: &[(&str, &[(&[&str], &str)])] = &[
    (
        "라온합주실",
        &[(&["10:00", "11:00", "14:00", "15:00", "20:00", "21:00"], "https://booking.naver.com/laon")],
    ),
    ("사운드홀릭", &[(&["12:00", "13:00", "18:00", "19:00", "22:00"], "https://booking.naver.com/soundholic")]),
    ("오렌지플레이", &[(&["10:00", "16:00", "17:00", "23:00"], "https://booking.naver.com/orangeplay")]),
    ("홍대노리터", &[(&["11:00", "12:00", "13:00", "14:00"], "https://booking.naver.com/noritor")]),
    ("플레이스튜디오", &[(&["15:00", "16:00", "17:00", "18:00", "19:00"], "https://booking.naver.com/playstudio")]),
];

/// Probability that an hour is offered for a studio missing from the table.
const RANDOM_SLOT_PROBABILITY: f64 = 0.4;

/// Sub-room label for the `idx`-th sub-room: `A룸`, `B룸`, ...
fn sub_room_label(idx: usize) -> String {
    let letter = u8::try_from(idx % 26).map_or('A', |i| char::from(b'A' + i));
    format!("{letter}룸")
}

/// Substitute availability for `rooms`, used when the live source is unreachable.
pub fn generate_fallback(rooms: &[String]) -> Vec<RawRoomAvailability> {
    generate_fallback_with(rooms, &mut rand::rng())
}

/// Like [`generate_fallback`] with an explicit random source for unknown studios.
pub fn generate_fallback_with<R: Rng + ?Sized>(rooms: &[String], rng: &mut R) -> Vec<RawRoomAvailability> {
    let mut result = Vec::new();
    for room in rooms {
        if let Some((_, sub_rooms)) = FALLBACK_TABLE.iter().find(|(name, _)| *name == room.as_str()) {
            for (idx, (times, url)) in sub_rooms.iter().enumerate() {
                let times = times.iter().map(|t| (*t).to_string());
                result.push(RawRoomAvailability::new(room, &sub_room_label(idx), times, url));
            }
        } else {
            let times: Vec<String> =
                ALL_TIME_SLOTS.iter().filter(|_| rng.random_bool(RANDOM_SLOT_PROBABILITY)).cloned().collect();
            result.push(RawRoomAvailability::new(room, &sub_room_label(0), times, ""));
        }
    }
    result
}

/// Names of the studios with fixed substitute data.
pub fn known_studios() -> impl Iterator<Item = &'static str> { FALLBACK_TABLE.iter().map(|(name, _)| *name) }
