use super::{
    AggregateResult, AvailabilityMap, DragPainter, HeatLevel, ParticipantDraft, ScheduleSession,
    SessionConfig, SessionError, SlotKey,
};
use chrono::NaiveDate;
use strum::IntoEnumIterator;

fn day(d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(2025, 3, d).unwrap() }

fn key(d: u32, h: u8) -> SlotKey { SlotKey::new(day(d), h).unwrap() }

fn week_session() -> ScheduleSession {
    ScheduleSession::new(SessionConfig {
        title: "  March rehearsal ".to_string(),
        start_date: day(3),
        day_count: 7,
        start_hour: 10,
        end_hour: 24,
    })
    .unwrap()
}

fn session_config() -> SessionConfig {
    SessionConfig { title: "t".to_string(), start_date: day(1), day_count: 1, start_hour: 10, end_hour: 12 }
}

fn map_of(keys: &[SlotKey]) -> AvailabilityMap { keys.iter().map(|k| (*k, true)).collect() }

#[test]
fn test_slot_key_string_form() {
    let k = key(3, 9);
    assert_eq!(k.to_string(), "2025-03-03-9");
    assert_eq!("2025-03-03-9".parse::<SlotKey>().unwrap(), k);
    assert_eq!("2025-03-03-23".parse::<SlotKey>().unwrap().hour(), 23);
    assert!("2025-03-03-24".parse::<SlotKey>().is_err());
    assert!("2025-03-03".parse::<SlotKey>().is_err());
    assert!("garbage".parse::<SlotKey>().is_err());
}

#[test]
fn test_availability_map_serializes_with_string_keys() {
    let mut map = AvailabilityMap::new();
    map.set(key(4, 10), true);
    map.set(key(4, 11), false);
    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(json, r#"{"2025-03-04-10":true,"2025-03-04-11":false}"#);
    let back: AvailabilityMap = serde_json::from_str(&json).unwrap();
    assert_eq!(back, map);
    assert_eq!(back.available_count(), 1);
}

#[test]
fn test_aggregate_counts_match_participant_totals() {
    let mut session = week_session();
    session.join("Mina", &map_of(&[key(3, 10), key(3, 11), key(4, 20)])).unwrap();
    session.join("Joon", &map_of(&[key(3, 11), key(4, 20)])).unwrap();
    let mut partial = map_of(&[key(4, 20)]);
    partial.set(key(5, 12), false);
    session.join("Hana", &partial).unwrap();

    let agg = session.aggregate();
    let total: usize = agg.counts().values().sum();
    let expected: usize = session.participants().iter().map(|p| p.availability().available_count()).sum();
    assert_eq!(total, expected);
    assert_eq!(total, 6);

    for (k, count) in agg.counts() {
        let names = agg.names(k);
        assert_eq!(*count, names.len());
        for name in names {
            let p = session.participant(name).unwrap();
            assert!(p.availability().is_available(k));
        }
    }
    assert_eq!(agg.names(&key(4, 20)), ["Mina", "Joon", "Hana"]);
    assert_eq!(agg.names(&key(3, 11)), ["Mina", "Joon"]);
    assert_eq!(agg.count(&key(5, 12)), 0);
    assert!(!agg.counts().contains_key(&key(5, 12)));
    assert_eq!(agg.common_slots(), vec![key(4, 20)]);
}

#[test]
fn test_aggregate_without_participants_is_empty() {
    let agg = AggregateResult::from_participants(&[]);
    assert!(agg.counts().is_empty());
    assert_eq!(agg.heat_level(&key(3, 10)), HeatLevel::None);
    assert!(agg.common_slots().is_empty());
}

#[test]
fn test_heat_level_boundaries() {
    assert_eq!(HeatLevel::classify(0, 4), HeatLevel::None);
    assert_eq!(HeatLevel::classify(1, 4), HeatLevel::Low);
    assert_eq!(HeatLevel::classify(2, 4), HeatLevel::Medium);
    assert_eq!(HeatLevel::classify(3, 4), HeatLevel::High);
    assert_eq!(HeatLevel::classify(4, 4), HeatLevel::Full);
    assert_eq!(HeatLevel::classify(1, 3), HeatLevel::Medium);
    assert_eq!(HeatLevel::classify(2, 3), HeatLevel::High);
    assert_eq!(HeatLevel::classify(3, 0), HeatLevel::None);
    assert_eq!(HeatLevel::classify(7, 5), HeatLevel::Full);
    assert_eq!(HeatLevel::iter().count(), 5);
}

#[test]
fn test_heat_level_is_monotonic_in_count() {
    for max in 1..=12 {
        let mut last = HeatLevel::None;
        for count in 0..=max {
            let level = HeatLevel::classify(count, max);
            assert!(level >= last, "count {count} of {max} dropped from {last} to {level}");
            last = level;
        }
        assert_eq!(last, HeatLevel::Full);
    }
}

#[test]
fn test_drag_paints_single_value() {
    let mut map = AvailabilityMap::new();
    map.set(key(3, 11), true);
    map.set(key(3, 13), true);
    let mut painter = DragPainter::new();

    painter.pointer_down(&mut map, key(3, 10));
    assert!(painter.is_dragging());
    for h in [11, 12, 13] {
        painter.pointer_enter(&mut map, key(3, h));
    }
    painter.pointer_up();
    for h in 10..=13 {
        assert!(map.is_available(&key(3, h)), "hour {h} not painted");
    }

    // Starting on an available cell erases along the stroke.
    painter.pointer_down(&mut map, key(3, 12));
    painter.pointer_enter(&mut map, key(3, 10));
    painter.pointer_enter(&mut map, key(3, 14));
    painter.pointer_up();
    assert!(!map.is_available(&key(3, 12)));
    assert!(!map.is_available(&key(3, 10)));
    assert!(!map.is_available(&key(3, 14)));
    assert!(map.is_available(&key(3, 11)));
}

#[test]
fn test_drag_enter_without_gesture_is_ignored() {
    let mut map = AvailabilityMap::new();
    let mut painter = DragPainter::new();
    painter.pointer_enter(&mut map, key(3, 10));
    assert!(map.is_empty());

    painter.pointer_down(&mut map, key(3, 10));
    painter.pointer_up();
    painter.pointer_enter(&mut map, key(3, 11));
    assert!(!map.is_available(&key(3, 11)));

    let mut view_only = DragPainter::read_only();
    view_only.pointer_down(&mut map, key(3, 12));
    assert!(!view_only.is_dragging());
    assert!(!map.is_available(&key(3, 12)));
}

#[test]
fn test_session_validation() {
    let base = SessionConfig { title: "t".to_string(), start_date: day(1), day_count: 5, start_hour: 10, end_hour: 12 };
    let with = |f: fn(&mut SessionConfig)| {
        let mut c = base.clone();
        f(&mut c);
        ScheduleSession::new(c).map(|_| ()).unwrap_err()
    };
    assert_eq!(with(|c| c.title = "   ".to_string()), SessionError::EmptyTitle);
    assert_eq!(with(|c| c.day_count = 0), SessionError::NoDays);
    assert_eq!(with(|c| c.end_hour = 10), SessionError::InvalidHourRange);
    assert_eq!(with(|c| c.end_hour = 25), SessionError::InvalidHourRange);
    assert_eq!(with(|c| c.day_count = ScheduleSession::MAX_DAYS + 1), SessionError::TooManyDays);
    assert_eq!(with(|c| c.day_count = u32::MAX), SessionError::TooManyDays);
    assert_eq!(with(|c| c.start_date = NaiveDate::MAX), SessionError::DateOutOfRange);

    let session = ScheduleSession::new(base).unwrap();
    assert_eq!(session.id().len(), 5);
    assert_eq!(session.end_date(), day(5));
    assert_eq!(session.slot_universe().len(), 10);
}

#[test]
fn test_join_freezes_copy_and_drops_foreign_keys() {
    let mut session = week_session();
    assert_eq!(session.title(), "March rehearsal");
    let mut draft = map_of(&[key(3, 10), key(3, 9), key(10, 12), key(9, 23)]);
    assert_eq!(session.join("  ", &draft), Err(SessionError::EmptyName));
    session.join(" Mina ", &draft).unwrap();
    draft.set(key(4, 15), true);

    let mina = session.participant("Mina").unwrap();
    assert!(mina.availability().is_available(&key(3, 10)));
    assert!(mina.availability().is_available(&key(9, 23)));
    assert!(!mina.availability().is_available(&key(3, 9)));
    assert!(!mina.availability().is_available(&key(10, 12)));
    assert!(!mina.availability().is_available(&key(4, 15)));
}

#[test]
fn test_heatmap_grid_shape_and_levels() {
    let mut session = week_session();
    session.join("A", &map_of(&[key(3, 10)])).unwrap();
    session.join("B", &map_of(&[key(3, 10), key(4, 10)])).unwrap();
    let grid = session.heatmap();
    assert_eq!(grid.len(), 14);
    assert!(grid.iter().all(|row| row.len() == 7));

    let first = &grid[0][0];
    assert_eq!(first.key, key(3, 10));
    assert_eq!(first.count, 2);
    assert_eq!(first.names, vec!["A".to_string(), "B".to_string()]);
    assert_eq!(first.level, HeatLevel::Full);
    assert_eq!(grid[0][1].level, HeatLevel::Medium);
    assert_eq!(grid[1][0].level, HeatLevel::None);
}

#[test]
fn test_draft_submit_resets_for_next_member() {
    let mut session = week_session();
    let mut draft = ParticipantDraft::new();
    draft.pointer_down(key(3, 18));
    draft.pointer_enter(key(3, 19));
    draft.pointer_up();
    assert_eq!(draft.availability().available_count(), 2);

    assert_eq!(draft.submit(&mut session, ""), Err(SessionError::EmptyName));
    assert_eq!(draft.availability().available_count(), 2);
    draft.submit(&mut session, "Mina").unwrap();
    assert!(draft.availability().is_empty());
    assert_eq!(session.participants().len(), 1);
    assert_eq!(session.aggregate().count(&key(3, 19)), 1);
}

#[test]
fn test_longest_session_stays_usable() {
    let mut session = ScheduleSession::new(SessionConfig {
        title: "Tour prep".to_string(),
        start_date: day(20),
        day_count: ScheduleSession::MAX_DAYS,
        start_hour: 18,
        end_hour: 20,
    })
    .unwrap();
    assert_eq!(session.end_date(), NaiveDate::from_ymd_opt(2025, 4, 19).unwrap());
    assert_eq!(session.dates().count(), 31);

    let last = SlotKey::new(session.end_date(), 19).unwrap();
    session.join("Mina", &map_of(&[last, key(19, 18)])).unwrap();
    let mina = session.participant("Mina").unwrap();
    assert!(mina.availability().is_available(&last));
    assert!(!mina.availability().is_available(&key(19, 18)));
    assert_eq!(session.heatmap().len(), 2);
    assert!(session.heatmap().iter().all(|row| row.len() == 31));

    let at_calendar_end = SessionConfig { start_date: NaiveDate::MAX, day_count: 1, ..session_config() };
    assert_eq!(ScheduleSession::new(at_calendar_end).unwrap().dates().count(), 1);
}
