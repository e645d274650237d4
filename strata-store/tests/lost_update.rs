//! Reproduces the documented lost-update race between overlapping commits.
//!
//! Under the default `Unserialized` policy the pipeline never serializes
//! commits: each one opens its draft from whatever snapshot is current at
//! commit start. Two actions dispatched back-to-back both observe the
//! pre-edit snapshot, both suspend on their external wait, and whichever
//! finishes last publishes last - the earlier edit is overwritten, not
//! merged. This test pins that behavior down so nobody "fixes" it by
//! accident; the `SingleWriter` counterpart shows the race-free variant of
//! the same scenario.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use strata_store::{CommitPolicy, Provider, ReducerEntry, Store};

#[derive(Clone, Debug, Default, PartialEq)]
struct Roster {
    users: Vec<Member>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Member {
    user_id: u64,
    user_name: String,
}

/// The racing shape: (1) the draft is opened from the current snapshot at
/// commit start, (2) the reducer waits on an external delay, (3) the edit
/// lands on the snapshot read in step 1.
fn racing_provider(delay: Duration) -> Provider<Roster> {
    Provider::new("racing").register(ReducerEntry::with_payload(
        "add_user",
        move |mut draft: Roster, new_member: Member| async move {
            tokio::time::sleep(delay).await;
            draft.users.push(new_member);
            Ok(draft)
        },
    ))
}

fn jack_and_jill() -> (Member, Member) {
    (
        Member {
            user_id: 1,
            user_name: "Jack".into(),
        },
        Member {
            user_id: 2,
            user_name: "Jill".into(),
        },
    )
}

#[tokio::test]
async fn test_overlapping_commits_lose_the_earlier_update() {
    let delay = Duration::from_millis(30);
    let store = Store::new(Roster::default(), [racing_provider(delay)]).unwrap();
    let add_user = store.actions()["add_user"].clone();
    let (jack, jill) = jack_and_jill();

    // Both dispatched before either reducer resolves: both commits open
    // their draft from the same empty roster.
    store.dispatch(add_user.create_with(jack).unwrap()).unwrap();
    store.dispatch(add_user.create_with(jill).unwrap()).unwrap();

    tokio::time::sleep(delay * 10).await;

    // Only the later-finishing commit's edit survived.
    assert_eq!(store.select(|s| s.users.len()), 1);
}

#[tokio::test]
async fn test_sequential_commits_do_not_race() {
    let delay = Duration::from_millis(10);
    let store = Store::new(Roster::default(), [racing_provider(delay)]).unwrap();
    let add_user = store.actions()["add_user"].clone();
    let (jack, jill) = jack_and_jill();

    // Let the first commit publish before dispatching the second; the
    // second draft then opens from the one-user roster.
    store.dispatch(add_user.create_with(jack.clone()).unwrap()).unwrap();
    tokio::time::sleep(delay * 10).await;
    store.dispatch(add_user.create_with(jill.clone()).unwrap()).unwrap();
    tokio::time::sleep(delay * 10).await;

    assert_eq!(store.select(|s| s.users.clone()), vec![jack, jill]);
}

#[tokio::test]
async fn test_single_writer_policy_keeps_both_updates() {
    let delay = Duration::from_millis(30);
    let store = Store::<Roster>::builder()
        .commit_policy(CommitPolicy::SingleWriter)
        .build(Roster::default(), [racing_provider(delay)])
        .unwrap();
    let add_user = store.actions()["add_user"].clone();
    let (jack, jill) = jack_and_jill();

    // Same back-to-back dispatch as the racing case.
    store.dispatch(add_user.create_with(jack).unwrap()).unwrap();
    store.dispatch(add_user.create_with(jill).unwrap()).unwrap();

    tokio::time::sleep(delay * 10).await;

    // The pipeline finished the first commit before starting the second.
    assert_eq!(store.select(|s| s.users.len()), 2);
}
