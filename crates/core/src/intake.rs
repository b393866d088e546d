//! Booking intake state machine.
//!
//! Tracks phase/question position and accumulated answers for the guided
//! booking questionnaire, persisting a versioned snapshot to a pluggable
//! store after every mutation so a session survives reloads. The machine
//! never validates answers; validation belongs to the submission pipeline.
//!
//! Phases: 0 is the intro screen, 1..=4 collect answers with question
//! counts [4, 4, 1, 1], and 5 means "past all phases" (the success page).
//! Completion is a flag, not a phase.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::booking::{Answer, BookingAnswers};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Fixed storage key for the persisted snapshot.
pub const STORAGE_KEY: &str = "cadenza.booking.intake";

/// Version of the snapshot format. A mismatch on load resets the session
/// to its initial state instead of attempting a migration.
pub const SNAPSHOT_VERSION: u32 = 1;

/// The intro screen.
pub const INTRO_PHASE: i32 = 0;

/// First collection phase.
pub const FIRST_PHASE: i32 = 1;

/// Last collection phase (review).
pub const LAST_PHASE: i32 = 4;

/// The phase value representing "past all phases", used by the success page.
pub const SUCCESS_PHASE: i32 = 5;

/// Questions per collection phase, indexed by phase - 1.
pub const PHASE_QUESTION_COUNTS: [i32; 4] = [4, 4, 1, 1];

/// Total questions across phases 1..=4.
pub const TOTAL_QUESTIONS: i32 = 10;

/// Question count for a collection phase; 0 for any other phase.
pub fn questions_in_phase(phase: i32) -> i32 {
    if (FIRST_PHASE..=LAST_PHASE).contains(&phase) {
        PHASE_QUESTION_COUNTS[(phase - 1) as usize]
    } else {
        0
    }
}

// ---------------------------------------------------------------------------
// Snapshot + store
// ---------------------------------------------------------------------------

/// The persisted form of an intake session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeSnapshot {
    pub version: u32,
    pub current_phase: i32,
    pub current_question: i32,
    pub answers: BookingAnswers,
    pub booking_ref: Option<String>,
    pub completed: bool,
}

/// Durable string storage keyed by name.
///
/// The session owns one store and writes a snapshot on every mutation.
/// Implementations decide where the bytes live (browser storage behind a
/// bridge, a file, memory for tests).
pub trait SnapshotStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A live intake session.
///
/// Single-threaded by construction: one session, one active mutator, all
/// operations synchronous. Every mutation persists before returning.
#[derive(Debug)]
pub struct IntakeSession<S: SnapshotStore> {
    phase: i32,
    question: i32,
    answers: BookingAnswers,
    booking_ref: Option<String>,
    completed: bool,
    store: S,
}

impl<S: SnapshotStore> IntakeSession<S> {
    /// Start a fresh session at the intro screen.
    pub fn new(store: S) -> Self {
        Self {
            phase: INTRO_PHASE,
            question: 0,
            answers: BookingAnswers::default(),
            booking_ref: None,
            completed: false,
            store,
        }
    }

    /// Resume from a persisted snapshot, or start fresh when the store
    /// holds nothing, an unreadable snapshot, or a version mismatch.
    pub fn restore(store: S) -> Self {
        let snapshot = store
            .read(STORAGE_KEY)
            .and_then(|raw| serde_json::from_str::<IntakeSnapshot>(&raw).ok())
            .filter(|snapshot| snapshot.version == SNAPSHOT_VERSION);

        match snapshot {
            Some(snapshot) => Self {
                phase: snapshot.current_phase,
                question: snapshot.current_question,
                answers: snapshot.answers,
                booking_ref: snapshot.booking_ref,
                completed: snapshot.completed,
                store,
            },
            None => Self::new(store),
        }
    }

    // -- accessors --

    pub fn phase(&self) -> i32 {
        self.phase
    }

    pub fn question(&self) -> i32 {
        self.question
    }

    pub fn answers(&self) -> &BookingAnswers {
        &self.answers
    }

    pub fn booking_ref(&self) -> Option<&str> {
        self.booking_ref.as_deref()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    // -- mutations --

    /// Set a single answer. Never validates, never moves the cursor.
    pub fn set_answer(&mut self, answer: Answer) {
        self.answers.apply(answer);
        self.persist();
    }

    /// Merge a partial answer patch. Never validates, never moves the cursor.
    pub fn set_answers(&mut self, patch: BookingAnswers) {
        self.answers.merge(patch);
        self.persist();
    }

    /// Record the reference returned by a successful submission.
    pub fn set_booking_ref(&mut self, reference: String) {
        self.booking_ref = Some(reference);
        self.persist();
    }

    /// Advance one question, or into the next phase when the current one
    /// is exhausted.
    ///
    /// This is the sole forward primitive: phases are traversed strictly
    /// in order, one advance at a time, even when their answers are
    /// already present. No-op once past the last phase.
    pub fn next_question(&mut self) {
        if self.phase > LAST_PHASE {
            return;
        }
        if self.question + 1 < questions_in_phase(self.phase) {
            self.question += 1;
        } else {
            self.phase += 1;
            self.question = 0;
        }
        self.persist();
    }

    /// Step one question back, crossing into the previous phase's last
    /// question when at a phase boundary. No-op at phase 1, question 0
    /// and anywhere before it.
    pub fn prev_question(&mut self) {
        if self.question > 0 {
            self.question -= 1;
        } else if self.phase > FIRST_PHASE {
            self.phase -= 1;
            self.question = (questions_in_phase(self.phase) - 1).max(0);
        } else {
            return;
        }
        self.persist();
    }

    /// Absolute jump, used for the initial "Get Started" transition and
    /// deep-link resume. Does not check that prior phases are complete.
    pub fn go_to_phase(&mut self, phase: i32, question: i32) {
        self.phase = phase.max(0);
        self.question = question.max(0);
        self.persist();
    }

    /// Mark the session completed. Answers are kept so the success page
    /// can still read contact details before clearing.
    pub fn complete(&mut self) {
        self.completed = true;
        self.persist();
    }

    /// Return to the exact initial state and clear persisted storage.
    pub fn reset(&mut self) {
        self.phase = INTRO_PHASE;
        self.question = 0;
        self.answers = BookingAnswers::default();
        self.booking_ref = None;
        self.completed = false;
        self.store.remove(STORAGE_KEY);
    }

    // -- queries --

    /// Overall progress as an integer percentage.
    ///
    /// Counts questions in fully passed phases plus the current question
    /// index, over the 10 questions of phases 1..=4. 0 at the intro,
    /// 100 once past all phases.
    pub fn progress(&self) -> i32 {
        if self.phase <= INTRO_PHASE {
            return 0;
        }
        if self.phase > LAST_PHASE {
            return 100;
        }
        let passed: i32 = PHASE_QUESTION_COUNTS[..(self.phase - 1) as usize]
            .iter()
            .sum();
        let done = passed + self.question;
        ((done as f64 / TOTAL_QUESTIONS as f64) * 100.0).round() as i32
    }

    /// Whether a collection phase has all its required answers.
    ///
    /// Defined for phases 1..=3. Phase 4 is a review step with no
    /// required fields of its own and always reports false.
    pub fn is_phase_complete(&self, phase: i32) -> bool {
        fn present(value: &Option<String>) -> bool {
            value.as_deref().is_some_and(|v| !v.trim().is_empty())
        }

        let a = &self.answers;
        match phase {
            1 => present(&a.event_type) && present(&a.event_date) && present(&a.time_preference),
            2 => {
                present(&a.duration)
                    && a.music_styles.iter().any(|style| !style.trim().is_empty())
            }
            3 => present(&a.name) && present(&a.email) && present(&a.phone),
            _ => false,
        }
    }

    // -- persistence --

    fn snapshot(&self) -> IntakeSnapshot {
        IntakeSnapshot {
            version: SNAPSHOT_VERSION,
            current_phase: self.phase,
            current_question: self.question,
            answers: self.answers.clone(),
            booking_ref: self.booking_ref.clone(),
            completed: self.completed,
        }
    }

    fn persist(&mut self) {
        let json =
            serde_json::to_string(&self.snapshot()).expect("snapshot serializes to JSON");
        self.store.write(STORAGE_KEY, &json);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
