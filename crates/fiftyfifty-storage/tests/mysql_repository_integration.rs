//! Runs against a disposable MySQL container; needs a Docker daemon.
//! Run with `cargo test -p fiftyfifty-storage -- --ignored`.

use fiftyfifty_core::{SetId, VideoId, VideoRef, VideoSet};
use fiftyfifty_storage::{ReadRepository, Repository, StorageError};
use fiftyfifty_test_infra::VideoSetStore;
use jiff::Timestamp;

async fn store(table: &str) -> VideoSetStore {
    VideoSetStore::start(table).await.expect("start video set store")
}

fn video_set(id: &str, title: &str, time_a: Option<u32>, time_b: Option<u32>) -> VideoSet {
    VideoSet {
        id: SetId::parse(id).unwrap(),
        title: title.to_string(),
        a: VideoRef::new(VideoId::parse("dQw4w9WgXcQ").unwrap(), time_a),
        b: VideoRef::new(VideoId::parse("9bZkp7q19f0").unwrap(), time_b),
        creator_address: "203.0.113.7".to_string(),
        created_at: Timestamp::now(),
    }
}

#[tokio::test]
#[ignore = "requires a docker daemon"]
async fn insert_and_get_snapshot() {
    let fixture = store("video_sets").await;
    let stored = video_set("abc123", "Rick or Psy", Some(90), None);

    fixture.repository().insert(&stored).await.unwrap();

    let got = fixture.repository().get(&stored.id).await.unwrap().unwrap();
    assert_eq!(got, stored.snapshot());
    assert_eq!(got.a.start_time, Some(90));
    assert_eq!(got.b.start_time, None);
}

#[tokio::test]
#[ignore = "requires a docker daemon"]
async fn get_missing_set_returns_none() {
    let fixture = store("video_sets").await;

    let got = fixture
        .repository()
        .get(&SetId::parse("zzzzzz").unwrap())
        .await
        .unwrap();
    assert!(got.is_none());
}

#[tokio::test]
#[ignore = "requires a docker daemon"]
async fn duplicate_insert_conflicts_and_keeps_first_record() {
    let fixture = store("video_sets").await;

    fixture
        .repository()
        .insert(&video_set("dup123", "first", None, None))
        .await
        .unwrap();

    let err = fixture
        .repository()
        .insert(&video_set("dup123", "second", Some(5), Some(5)))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Conflict(_)));

    let got = fixture
        .repository()
        .get(&SetId::parse("dup123").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(got.title, "first");
    assert_eq!(got.a.start_time, None);
}

#[tokio::test]
#[ignore = "requires a docker daemon"]
async fn ids_differing_only_in_case_are_distinct() {
    let fixture = store("video_sets").await;

    fixture
        .repository()
        .insert(&video_set("abcDEF", "mixed", None, None))
        .await
        .unwrap();
    fixture
        .repository()
        .insert(&video_set("ABCdef", "flipped", None, None))
        .await
        .unwrap();

    let got = fixture
        .repository()
        .get(&SetId::parse("ABCdef").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(got.title, "flipped");
}

#[tokio::test]
#[ignore = "requires a docker daemon"]
async fn custom_table_is_used() {
    let fixture = store("dev_video_sets").await;
    let stored = video_set("dev123", "dev only", None, Some(12));

    fixture.repository().insert(&stored).await.unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dev_video_sets")
        .fetch_one(fixture.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
#[ignore = "requires a docker daemon"]
async fn stores_creation_metadata() {
    let fixture = store("video_sets").await;
    let stored = video_set("meta12", "with metadata", None, None);

    fixture.repository().insert(&stored).await.unwrap();

    let (ip, added): (String, i64) =
        sqlx::query_as("SELECT ip_address, date_added FROM video_sets WHERE video_set_id = ?")
            .bind("meta12")
            .fetch_one(fixture.pool())
            .await
            .unwrap();
    assert_eq!(ip, "203.0.113.7");
    assert_eq!(added, stored.created_at.as_millisecond());
}
