use serde::{Deserialize, Serialize};

/// Milliseconds-since-epoch timestamp of the moment a call started.
///
/// Doubles as the call's unique key: the upstream provider does not supply a
/// call identifier, so the start time is the only stable handle we have.
pub type CallId = i64;

/// Which end of the phone call an utterance came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Party {
    /// The person who made the phone call
    Caller,
    /// The person who received the phone call
    Receiver,
}

impl Party {
    pub fn as_str(&self) -> &'static str {
        match self {
            Party::Caller => "caller",
            Party::Receiver => "receiver",
        }
    }
}

impl std::fmt::Display for Party {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Party {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "caller" => Ok(Party::Caller),
            "receiver" => Ok(Party::Receiver),
            other => Err(anyhow::anyhow!("unknown party: {}", other)),
        }
    }
}

/// A transcription of a single utterance from one end of the call.
///
/// Immutable once it reaches a call's history; while held in a live slot it
/// is replaced wholesale by each newer interim snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcription {
    /// Which end of the call was speaking
    pub who: Party,

    /// When the transcription was received (ms since epoch)
    pub timestamp: i64,

    /// The transcribed text
    pub transcript: String,
}

impl Transcription {
    /// An empty placeholder for a party that isn't mid-utterance.
    pub fn empty(who: Party, timestamp: i64) -> Self {
        Self {
            who,
            timestamp,
            transcript: String::new(),
        }
    }
}

/// The current in-progress utterance for each end of the call.
///
/// Both slots are always populated; a party that isn't speaking holds an
/// empty-transcript placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveTranscriptions {
    pub caller: Transcription,
    pub receiver: Transcription,
}

impl LiveTranscriptions {
    fn empty(timestamp: i64) -> Self {
        Self {
            caller: Transcription::empty(Party::Caller, timestamp),
            receiver: Transcription::empty(Party::Receiver, timestamp),
        }
    }

    pub fn get(&self, who: Party) -> &Transcription {
        match who {
            Party::Caller => &self.caller,
            Party::Receiver => &self.receiver,
        }
    }

    pub(crate) fn set(&mut self, transcription: Transcription) {
        match transcription.who {
            Party::Caller => self.caller = transcription,
            Party::Receiver => self.receiver = transcription,
        }
    }
}

/// Everything transcribed so far for one phone call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    /// Finalized utterances, in arrival order. Interleaving of the two
    /// parties follows arrival, not party-internal chronology.
    pub history: Vec<Transcription>,

    /// Current in-progress utterance per party
    pub live: LiveTranscriptions,
}

impl CallRecord {
    pub(crate) fn new(call_id: CallId) -> Self {
        Self {
            history: Vec::new(),
            live: LiveTranscriptions::empty(call_id),
        }
    }
}
