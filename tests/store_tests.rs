// Tests for the in-memory transcript store
//
// These mirror the store's contract: lazy call creation, append-only
// history in arrival order, and wholesale replacement of live slots.

use callscribe::{Party, Transcription, TranscriptStore};

fn utterance(who: Party, timestamp: i64, transcript: &str) -> Transcription {
    Transcription {
        who,
        timestamp,
        transcript: transcript.to_string(),
    }
}

#[tokio::test]
async fn lists_calls_in_first_seen_order() {
    let store = TranscriptStore::new();

    store
        .append_final(20, utterance(Party::Caller, 100, "hello"))
        .await;
    store
        .append_final(30, utterance(Party::Caller, 200, "world"))
        .await;
    store
        .append_final(40, utterance(Party::Caller, 300, "tests"))
        .await;

    assert_eq!(store.call_ids().await, vec![20, 30, 40]);
}

#[tokio::test]
async fn lists_no_calls_before_any_have_happened() {
    let store = TranscriptStore::new();
    assert!(store.call_ids().await.is_empty());
}

#[tokio::test]
async fn call_order_is_stable_across_later_mutation() {
    let store = TranscriptStore::new();

    store
        .append_final(20, utterance(Party::Caller, 100, "first call"))
        .await;
    store
        .append_final(30, utterance(Party::Caller, 200, "second call"))
        .await;
    // mutating the older call must not reorder the listing
    store
        .append_final(20, utterance(Party::Receiver, 300, "still first"))
        .await;

    assert_eq!(store.call_ids().await, vec![20, 30]);
}

#[tokio::test]
async fn keeps_history_in_arrival_order_across_parties() {
    let store = TranscriptStore::new();
    let call = 1643716800000;

    let finals = [
        utterance(Party::Caller, 1643716800000, "first"),
        utterance(Party::Caller, 1643716810000, "second"),
        utterance(Party::Receiver, 1643716815000, "alpha"),
        utterance(Party::Caller, 1643716820000, "third"),
        utterance(Party::Receiver, 1643716830000, "beta"),
    ];
    for t in &finals {
        store.append_final(call, t.clone()).await;
    }

    let record = store.get_transcript(call).await;
    assert_eq!(record.history, finals.to_vec());
}

#[tokio::test]
async fn replaces_live_transcript_when_a_final_one_is_stored() {
    let store = TranscriptStore::new();
    let call = 1643720000000;

    store
        .update_live(call, utterance(Party::Caller, 1643720400000, "the cat"))
        .await;
    store
        .update_live(call, utterance(Party::Receiver, 1643720405000, "the dog"))
        .await;
    store
        .update_live(call, utterance(Party::Caller, 1643720410000, "the cat sat"))
        .await;
    store
        .update_live(
            call,
            utterance(Party::Receiver, 1643720415000, "the dog likes"),
        )
        .await;
    store
        .update_live(
            call,
            utterance(Party::Caller, 1643720420000, "the cat sat on"),
        )
        .await;
    store
        .append_final(
            call,
            utterance(Party::Caller, 1643720430000, "the cat sat on the mat"),
        )
        .await;

    let record = store.get_transcript(call).await;

    assert_eq!(
        record.history,
        vec![utterance(
            Party::Caller,
            1643720430000,
            "the cat sat on the mat"
        )]
    );
    // the finalized party's slot resets to an empty placeholder stamped
    // with the final utterance's timestamp
    assert_eq!(
        record.live.caller,
        utterance(Party::Caller, 1643720430000, "")
    );
    // the other party's in-progress utterance is untouched
    assert_eq!(
        record.live.receiver,
        utterance(Party::Receiver, 1643720415000, "the dog likes")
    );
}

#[tokio::test]
async fn update_live_never_touches_history() {
    let store = TranscriptStore::new();
    let call = 500;

    store
        .append_final(call, utterance(Party::Caller, 100, "done"))
        .await;
    store
        .update_live(call, utterance(Party::Caller, 200, "in progress"))
        .await;
    store
        .update_live(call, utterance(Party::Receiver, 300, "also going"))
        .await;

    let record = store.get_transcript(call).await;
    assert_eq!(record.history, vec![utterance(Party::Caller, 100, "done")]);
    assert_eq!(
        record.live.caller,
        utterance(Party::Caller, 200, "in progress")
    );
}

#[tokio::test]
async fn append_final_grows_history_by_one() {
    let store = TranscriptStore::new();
    let call = 7;

    for i in 0..5 {
        store
            .append_final(call, utterance(Party::Receiver, i, "again"))
            .await;
        let record = store.get_transcript(call).await;
        assert_eq!(record.history.len(), (i + 1) as usize);
        assert_eq!(record.live.receiver.transcript, "");
    }
}

#[tokio::test]
async fn materializes_an_empty_record_for_an_unknown_call() {
    let store = TranscriptStore::new();
    let call = 1653170890054;

    let record = store.get_transcript(call).await;

    assert!(record.history.is_empty());
    assert_eq!(record.live.caller, utterance(Party::Caller, call, ""));
    assert_eq!(record.live.receiver, utterance(Party::Receiver, call, ""));
    // the lazily-created call now shows up in the listing
    assert_eq!(store.call_ids().await, vec![call]);
}

#[tokio::test]
async fn both_live_slots_are_always_present() {
    let store = TranscriptStore::new();
    let call = 9000;

    // first write is from the receiver only
    store
        .update_live(call, utterance(Party::Receiver, 9100, "hi there"))
        .await;

    let record = store.get_transcript(call).await;
    assert_eq!(record.live.caller, utterance(Party::Caller, call, ""));
    assert_eq!(
        record.live.receiver,
        utterance(Party::Receiver, 9100, "hi there")
    );
}
