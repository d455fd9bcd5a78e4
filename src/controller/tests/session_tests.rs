//! Tests for the async session runtime

use super::*;
use crate::controller::{FilterEvent, SessionHandle};
use crate::error::WildlifeError;
use crate::models::{FilterField, Selection};

#[tokio::test]
async fn test_initial_snapshot_is_available_immediately() {
    let session = SessionHandle::spawn(controller());
    let snapshot = session.latest();

    assert_eq!(snapshot.revision, 1);
    assert_eq!(snapshot.subset.len(), 5);
    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_update_returns_matching_snapshot() {
    let mut session = SessionHandle::spawn(controller());

    let snapshot = session
        .update(FilterEvent::Select(FilterField::CountryCode, Selection::only("US")))
        .await
        .unwrap();

    assert_eq!(snapshot.subset.len(), 2);
    assert_eq!(
        snapshot.state.selection(FilterField::CountryCode),
        &Selection::only("US")
    );
    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_no_op_update_keeps_revision() {
    let mut session = SessionHandle::spawn(controller());

    let snapshot = session.update(FilterEvent::Reset).await.unwrap();

    assert_eq!(snapshot.revision, 1);
    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_rapid_events_settle_on_final_state() {
    let mut session = SessionHandle::spawn(controller());

    session
        .send(FilterEvent::SetQuery("p".to_string()))
        .await
        .unwrap();
    session
        .send(FilterEvent::SetQuery("pa".to_string()))
        .await
        .unwrap();
    let last = session
        .update(FilterEvent::SetQuery("panthera".to_string()))
        .await
        .unwrap();

    assert_eq!(last.state.query(), "panthera");
    assert_eq!(last.subset.len(), 2);
    assert!(last.revision <= 4);
    assert_eq!(session.latest().revision, last.revision);
    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_subscriber_sees_latest_snapshot() {
    let mut session = SessionHandle::spawn(controller());
    let mut watcher = session.subscribe();

    session
        .update(FilterEvent::SetQuery("tigris".to_string()))
        .await
        .unwrap();

    watcher.changed().await.unwrap();
    assert_eq!(watcher.borrow().subset.len(), 1);
    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_changed_waits_for_next_snapshot() {
    let mut session = SessionHandle::spawn(controller());

    session
        .send(FilterEvent::SetQuery("leo".to_string()))
        .await
        .unwrap();
    let snapshot = session.changed().await.unwrap();

    assert_eq!(snapshot.revision, 2);
    assert_eq!(snapshot.subset.len(), 1);
    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_aborted_session_reports_task_failure() {
    let session = SessionHandle::spawn(controller());
    session.abort();

    let error = session.shutdown().await.unwrap_err();
    assert!(matches!(error, WildlifeError::SessionFailed { .. }));
    assert!(!error.is_data_source());
}
