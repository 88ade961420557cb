//! Position management properties of the setlist store

use setlistify_common::db::NewSong;
use setlistify_web::Store;

async fn setup() -> Store {
    Store::in_memory().await.expect("Should create in-memory store")
}

async fn song(store: &Store, title: &str) -> i64 {
    store
        .create_song(&NewSong {
            title: title.to_string(),
            ..Default::default()
        })
        .await
        .unwrap()
        .id
}

/// Setlist containing new songs with `titles`, added in order
async fn populated_setlist(store: &Store, titles: &[&str]) -> (i64, Vec<i64>) {
    let setlist = store.create_setlist("Set").await.unwrap().id;
    let mut ids = Vec::new();
    for title in titles {
        let id = song(store, title).await;
        assert!(store.add_song_to_setlist(setlist, id).await.unwrap());
        ids.push(id);
    }
    (setlist, ids)
}

/// (song id, position) pairs in display order
async fn layout(store: &Store, setlist: i64) -> Vec<(i64, i64)> {
    store
        .list_setlist_songs(setlist)
        .await
        .unwrap()
        .into_iter()
        .map(|s| (s.song.id, s.position))
        .collect()
}

#[tokio::test]
async fn test_reorder_is_idempotent() {
    let store = setup().await;
    let (setlist, ids) = populated_setlist(&store, &["A", "B", "C"]).await;
    let order = [ids[1], ids[2], ids[0]];

    store.reorder_setlist(setlist, &order).await.unwrap();
    let once = layout(&store, setlist).await;
    store.reorder_setlist(setlist, &order).await.unwrap();
    let twice = layout(&store, setlist).await;

    assert_eq!(once, twice);
    assert_eq!(once, vec![(ids[1], 1), (ids[2], 2), (ids[0], 3)]);
}

#[tokio::test]
async fn test_reorder_round_trip() {
    let store = setup().await;
    let (setlist, ids) = populated_setlist(&store, &["A", "B", "C"]).await;
    let original = layout(&store, setlist).await;

    store
        .reorder_setlist(setlist, &[ids[2], ids[0], ids[1]])
        .await
        .unwrap();
    assert_eq!(
        layout(&store, setlist).await,
        vec![(ids[2], 1), (ids[0], 2), (ids[1], 3)]
    );

    store.reorder_setlist(setlist, &ids).await.unwrap();
    assert_eq!(layout(&store, setlist).await, original);
}

#[tokio::test]
async fn test_positions_stay_unique_and_dense() {
    let store = setup().await;
    let (setlist, ids) = populated_setlist(&store, &["A", "B", "C", "D", "E"]).await;

    let reversed: Vec<i64> = ids.iter().rev().copied().collect();
    store.reorder_setlist(setlist, &reversed).await.unwrap();

    let positions: Vec<i64> = layout(&store, setlist)
        .await
        .into_iter()
        .map(|(_, p)| p)
        .collect();
    assert_eq!(positions, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_failed_reorder_leaves_positions_untouched() {
    let store = setup().await;
    let (setlist, ids) = populated_setlist(&store, &["A", "B", "C"]).await;
    let before = layout(&store, setlist).await;

    // C alone wants slot 1, which A still holds
    let err = store.reorder_setlist(setlist, &[ids[2]]).await.unwrap_err();

    assert!(err.is_constraint_violation());
    assert_eq!(layout(&store, setlist).await, before);
}

#[tokio::test]
async fn test_reorder_does_not_touch_other_setlists() {
    let store = setup().await;
    let (first, ids) = populated_setlist(&store, &["A", "B"]).await;
    let second = store.create_setlist("Other").await.unwrap().id;
    store.add_song_to_setlist(second, ids[0]).await.unwrap();
    store.add_song_to_setlist(second, ids[1]).await.unwrap();

    store.reorder_setlist(first, &[ids[1], ids[0]]).await.unwrap();

    assert_eq!(layout(&store, first).await, vec![(ids[1], 1), (ids[0], 2)]);
    assert_eq!(layout(&store, second).await, vec![(ids[0], 1), (ids[1], 2)]);
}

#[tokio::test]
async fn test_re_adding_after_remove_starts_at_one() {
    let store = setup().await;
    let (setlist, ids) = populated_setlist(&store, &["A"]).await;

    assert!(store.remove_song_from_setlist(setlist, ids[0]).await.unwrap());
    assert_eq!(store.max_position(setlist).await.unwrap(), 0);

    store.add_song_to_setlist(setlist, ids[0]).await.unwrap();
    assert_eq!(layout(&store, setlist).await, vec![(ids[0], 1)]);
}

#[tokio::test]
async fn test_gaps_are_kept_after_remove() {
    let store = setup().await;
    let (setlist, ids) = populated_setlist(&store, &["A", "B", "C"]).await;

    store.remove_song_from_setlist(setlist, ids[1]).await.unwrap();
    let d = song(&store, "D").await;
    store.add_song_to_setlist(setlist, d).await.unwrap();

    assert_eq!(
        layout(&store, setlist).await,
        vec![(ids[0], 1), (ids[2], 3), (d, 4)]
    );
}

#[tokio::test]
async fn test_remove_non_member_reports_false() {
    let store = setup().await;
    let (setlist, _) = populated_setlist(&store, &["A"]).await;
    let outsider = song(&store, "B").await;

    assert!(!store.remove_song_from_setlist(setlist, outsider).await.unwrap());
}

#[tokio::test]
async fn test_song_delete_cascades_to_memberships() {
    let store = setup().await;
    let (setlist, ids) = populated_setlist(&store, &["A", "B"]).await;

    assert!(store.delete_song(ids[0]).await.unwrap());

    assert_eq!(layout(&store, setlist).await, vec![(ids[1], 2)]);
}

#[tokio::test]
async fn test_setlist_delete_cascades_to_memberships() {
    let store = setup().await;
    let (setlist, ids) = populated_setlist(&store, &["A", "B"]).await;

    assert!(store.delete_setlist(setlist).await.unwrap());

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM setlist_songs")
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(remaining, 0);
    assert!(store.get_song(ids[0]).await.unwrap().is_some());
}

#[tokio::test]
async fn test_add_to_missing_setlist_is_rejected_by_foreign_key() {
    let store = setup().await;
    let id = song(&store, "A").await;

    let err = store.add_song_to_setlist(12345, id).await.unwrap_err();

    assert!(err.is_constraint_violation());
}
