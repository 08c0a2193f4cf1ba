// Tests for the notification hub
//
// Fan-out semantics: every subscribed observer gets every event, in the
// order the notify_* calls were made, and one broken observer never stops
// delivery to the others.

use callscribe::{CallEvent, NotificationHub, Party, Transcription};

fn utterance(who: Party, timestamp: i64, transcript: &str) -> Transcription {
    Transcription {
        who,
        timestamp,
        transcript: transcript.to_string(),
    }
}

#[tokio::test]
async fn delivers_identical_events_to_every_observer() {
    let hub = NotificationHub::new();

    let (_h1, mut rx1) = hub.subscribe().await;
    let (_h2, mut rx2) = hub.subscribe().await;
    let (_h3, mut rx3) = hub.subscribe().await;

    let t = utterance(Party::Caller, 2000, "hello");
    hub.notify_final(1000, t.clone()).await;

    let expected = CallEvent::FinalTranscription {
        call_timestamp: 1000,
        transcription: t,
    };
    assert_eq!(rx1.recv().await.unwrap(), expected);
    assert_eq!(rx2.recv().await.unwrap(), expected);
    assert_eq!(rx3.recv().await.unwrap(), expected);
}

#[tokio::test]
async fn delivers_events_in_invocation_order() {
    let hub = NotificationHub::new();
    let (_handle, mut rx) = hub.subscribe().await;

    hub.notify_new_call(1000).await;
    hub.notify_interim(1000, utterance(Party::Caller, 1100, "he"))
        .await;
    hub.notify_interim(1000, utterance(Party::Caller, 1200, "hello"))
        .await;
    hub.notify_final(1000, utterance(Party::Caller, 1300, "hello."))
        .await;
    hub.notify_end_call(1000).await;

    assert_eq!(
        rx.recv().await.unwrap(),
        CallEvent::NewCall { timestamp: 1000 }
    );
    assert_eq!(
        rx.recv().await.unwrap(),
        CallEvent::InterimTranscription {
            call_timestamp: 1000,
            transcription: utterance(Party::Caller, 1100, "he"),
        }
    );
    assert_eq!(
        rx.recv().await.unwrap(),
        CallEvent::InterimTranscription {
            call_timestamp: 1000,
            transcription: utterance(Party::Caller, 1200, "hello"),
        }
    );
    assert_eq!(
        rx.recv().await.unwrap(),
        CallEvent::FinalTranscription {
            call_timestamp: 1000,
            transcription: utterance(Party::Caller, 1300, "hello."),
        }
    );
    assert_eq!(
        rx.recv().await.unwrap(),
        CallEvent::EndCall { timestamp: 1000 }
    );
}

#[tokio::test]
async fn a_broken_observer_does_not_stop_the_others() {
    let hub = NotificationHub::new();

    let (_h1, mut rx1) = hub.subscribe().await;
    let (_h2, rx2) = hub.subscribe().await;
    let (_h3, mut rx3) = hub.subscribe().await;

    // observer #2 has gone away without unsubscribing
    drop(rx2);

    hub.notify_new_call(42).await;

    assert_eq!(rx1.recv().await.unwrap(), CallEvent::NewCall { timestamp: 42 });
    assert_eq!(rx3.recv().await.unwrap(), CallEvent::NewCall { timestamp: 42 });
}

#[tokio::test]
async fn unsubscribed_observers_get_nothing_further() {
    let hub = NotificationHub::new();

    let (handle, mut rx) = hub.subscribe().await;
    hub.notify_new_call(1).await;
    hub.unsubscribe(handle).await;
    hub.notify_end_call(1).await;

    assert_eq!(rx.recv().await.unwrap(), CallEvent::NewCall { timestamp: 1 });
    // the channel closes rather than delivering the end-call event
    assert!(rx.recv().await.is_none());
}

#[tokio::test]
async fn unsubscribe_is_a_noop_for_unknown_handles() {
    let hub = NotificationHub::new();

    let (handle, mut rx) = hub.subscribe().await;
    hub.unsubscribe(handle).await;
    hub.unsubscribe(handle).await; // second removal of the same handle

    hub.notify_new_call(7).await;
    assert!(rx.recv().await.is_none());
}

#[test]
fn events_serialize_to_the_documented_shapes() {
    let new_call = serde_json::to_value(CallEvent::NewCall { timestamp: 1653170890054 }).unwrap();
    assert_eq!(
        new_call,
        serde_json::json!({ "event": "new-call", "timestamp": 1653170890054i64 })
    );

    let end_call = serde_json::to_value(CallEvent::EndCall { timestamp: 1653170890054 }).unwrap();
    assert_eq!(
        end_call,
        serde_json::json!({ "event": "end-call", "timestamp": 1653170890054i64 })
    );

    let final_event = serde_json::to_value(CallEvent::FinalTranscription {
        call_timestamp: 1653170890054,
        transcription: utterance(Party::Caller, 1653170899120, "you are such an amazing person."),
    })
    .unwrap();
    assert_eq!(
        final_event,
        serde_json::json!({
            "event": "final-transcription",
            "callTimestamp": 1653170890054i64,
            "transcription": {
                "who": "caller",
                "timestamp": 1653170899120i64,
                "transcript": "you are such an amazing person."
            }
        })
    );

    let interim_event = serde_json::to_value(CallEvent::InterimTranscription {
        call_timestamp: 1653170890054,
        transcription: utterance(Party::Receiver, 1653170899120, "you are "),
    })
    .unwrap();
    assert_eq!(
        interim_event,
        serde_json::json!({
            "event": "interim-transcription",
            "callTimestamp": 1653170890054i64,
            "transcription": {
                "who": "receiver",
                "timestamp": 1653170899120i64,
                "transcript": "you are "
            }
        })
    );
}
