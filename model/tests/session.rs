use abstutil::Timer;

use model::store::{CsvStore, EntityName, MemoryStore, SampleRecord, SampleStore};
use model::{LatLng, LoadError, Session, TickOutcome};

fn two_entities() -> MemoryStore {
    MemoryStore::new()
        .with(
            "bus-7",
            vec![
                SampleRecord::new(1_000.0, 0.0, 0.0),
                SampleRecord::new(1_010.0, 10.0, 10.0),
            ],
        )
        .with(
            "bike-2",
            vec![
                SampleRecord::new(1_005.0, 50.0, 50.0),
                SampleRecord::new(1_020.0, 60.0, 60.0),
            ],
        )
}

fn load(store: &mut dyn SampleStore) -> Session {
    Session::load(Some(store), &mut Timer::throwaway())
}

fn position(session: &Session, id: &str) -> Option<LatLng> {
    session
        .playback
        .as_ref()
        .and_then(|p| p.registry().get(&EntityName::new(id)))
        .and_then(|path| path.current_position)
}

fn approx(a: Option<LatLng>, lat: f64, lng: f64) -> bool {
    match a {
        Some(pos) => (pos.lat - lat).abs() < 1e-9 && (pos.lng - lng).abs() < 1e-9,
        None => false,
    }
}

#[test]
fn load_then_play() {
    let session = load(&mut two_entities());
    assert!(session.notice.is_none());
    assert_eq!(session.tracks.len(), 2);
    assert_eq!(session.selection.selected().len(), 2);

    let mut session = session;
    let playback = session.playback.as_mut().unwrap();
    assert_eq!(playback.clock().start_time(), 1_000.0);
    assert_eq!(playback.clock().end_time(), 1_020.0);
    assert_eq!(playback.clock().current_time(), 1_000.0);
    assert!(!playback.clock().is_playing());
    assert_eq!(playback.clock().speed(), 1.0);

    playback.toggle_play();
    assert!(session.frame().playback_active);

    // An eighth of a real second is 7.5 data seconds
    let playback = session.playback.as_mut().unwrap();
    assert_eq!(playback.tick(0.125), TickOutcome::Advanced(1_007.5));
    assert!(approx(position(&session, "bus-7"), 7.5, 7.5));
    assert!(approx(position(&session, "bike-2"), 51.666666666666664, 51.666666666666664));

    let playback = session.playback.as_mut().unwrap();
    assert_eq!(playback.tick(1.0), TickOutcome::ReachedEnd);
    assert!(approx(position(&session, "bus-7"), 10.0, 10.0));
    assert!(approx(position(&session, "bike-2"), 60.0, 60.0));
    assert!(!session.frame().playback_active);
}

#[test]
fn seek_updates_positions_immediately() {
    let mut session = load(&mut two_entities());
    let playback = session.playback.as_mut().unwrap();
    playback.toggle_play();
    playback.seek(1_005.0);
    assert!(!playback.clock().is_playing());
    assert!(!playback.wants_frames());
    assert!(approx(position(&session, "bus-7"), 5.0, 5.0));
    assert!(approx(position(&session, "bike-2"), 50.0, 50.0));
}

#[test]
fn selection_filters_the_frame() {
    let mut session = load(&mut two_entities());
    session.selection.set(&EntityName::new("bus-7"), false);
    let frame = session.frame();
    assert_eq!(frame.paths.len(), 1);
    assert_eq!(frame.paths[0].name, EntityName::new("bike-2"));
    // Colors follow load order, not selection
    assert_eq!(frame.paths[0].color, "#4682B4");
    assert_eq!(session.data_log().len(), 2);

    session.selection.deselect_all();
    assert!(session.frame().paths.is_empty());
    session.selection.select_all();
    assert_eq!(session.visible_paths().len(), 2);
    assert_eq!(session.data_log().len(), 4);
}

#[test]
fn missing_store_is_fatal() {
    let session = Session::load(None, &mut Timer::throwaway());
    assert!(!session.is_playable());
    assert!(matches!(session.notice, Some(LoadError::Configuration(_))));
    assert!(session.notice.as_ref().unwrap().is_fatal());
    assert!(session.visible_paths().is_empty());
    assert!(!session.frame().playback_active);
}

#[test]
fn nothing_loaded_yet() {
    let session = Session::empty();
    assert!(session.notice.is_none());
    assert_eq!(session.summary(), "No data loaded; use Open data");
    assert!(!session.playback.as_ref().unwrap().wants_frames());

    let session = load(&mut two_entities());
    assert_eq!(session.summary(), "2 entities from memory");
}

#[test]
fn no_entities_falls_back_to_now() {
    let before = chrono::Utc::now().timestamp() as f64;
    let session = load(&mut MemoryStore::new());
    let after = chrono::Utc::now().timestamp() as f64;

    assert!(matches!(session.notice, Some(LoadError::NoEntities(_))));
    let clock = session.playback.as_ref().unwrap().clock();
    assert_eq!(clock.start_time(), clock.end_time());
    assert!(clock.start_time() >= before && clock.start_time() <= after);
}

#[test]
fn no_usable_samples() {
    let mut store = MemoryStore::new()
        .with("ghost", Vec::new())
        .with(
            "broken",
            vec![SampleRecord {
                timestamp: None,
                latitude: Some(1.0),
                longitude: Some(1.0),
            }],
        );
    let session = load(&mut store);
    match session.notice {
        Some(LoadError::NoSamples { entities, .. }) => assert_eq!(entities, 2),
        ref x => panic!("wrong notice {:?}", x),
    }
    // Still selectable, just with nowhere to be
    assert_eq!(session.visible_paths().len(), 2);
    assert!(position(&session, "ghost").is_none());
    let clock = session.playback.as_ref().unwrap().clock();
    assert_eq!(clock.start_time(), clock.end_time());
}

#[test]
fn malformed_samples_are_dropped() {
    let csv = "id,timestamp,latitude,longitude
truck,2023-11-14T22:13:40Z,1.0,1.0
truck,1700000000,0.0,0.0
truck,not a time,5.0,5.0
van,1700000010,95.0,3.0
van,1700000030,3.0,3.0
";
    let mut store = CsvStore::load("fleet.csv".to_string(), csv.as_bytes()).unwrap();
    let session = load(&mut store);
    match session.notice {
        Some(LoadError::MalformedSamples { dropped, .. }) => assert_eq!(dropped, 2),
        ref x => panic!("wrong notice {:?}", x),
    }
    assert!(!session.notice.as_ref().unwrap().is_fatal());

    let clock = session.playback.as_ref().unwrap().clock();
    assert_eq!(clock.start_time(), 1_700_000_000.0);
    assert_eq!(clock.end_time(), 1_700_000_030.0);
    assert_eq!(session.tracks[0].trajectory.len(), 2);
    assert_eq!(session.tracks[1].trajectory.len(), 1);
}

#[test]
fn ragged_rows_are_dropped_not_fatal() {
    let csv = "id,timestamp,latitude,longitude
truck,5,1.0
truck,10,2.0,2.0,extra
truck,20,3.0,3.0
";
    let mut store = CsvStore::load("ragged.csv".to_string(), csv.as_bytes()).unwrap();
    let session = load(&mut store);
    match session.notice {
        Some(LoadError::MalformedSamples { dropped, .. }) => assert_eq!(dropped, 1),
        ref x => panic!("wrong notice {:?}", x),
    }
    let clock = session.playback.as_ref().unwrap().clock();
    assert_eq!(clock.start_time(), 10.0);
    assert_eq!(clock.end_time(), 20.0);
}

#[test]
fn reload_replaces_everything() {
    let mut session = load(&mut two_entities());
    session.playback.as_mut().unwrap().toggle_play();
    session.selection.set(&EntityName::new("bus-7"), false);

    let mut other = MemoryStore::new().with("solo", vec![SampleRecord::new(5.0, 1.0, 2.0)]);
    session.reload(Some(&mut other), &mut Timer::throwaway());

    let playback = session.playback.as_ref().unwrap();
    assert!(!playback.wants_frames());
    assert_eq!(playback.registry().len(), 1);
    assert_eq!(playback.clock().start_time(), 5.0);
    assert_eq!(session.selection.all_ids(), &[EntityName::new("solo")]);
    assert!(approx(position(&session, "solo"), 1.0, 2.0));
    assert_eq!(session.source.as_deref(), Some("memory"));
}
