//! `MEMORY_SAVE:` directive handling for model replies.
//!
//! The template asks the model to append `MEMORY_SAVE: <fact>` when the user
//! shares something durable. The directive is stripped from what the user
//! sees and the fact is merged into long-term memory.

use tracing::{debug, info, warn};

use crate::subsystems::memory::{Memory, MemoryStore};

pub const MEMORY_MARKER: &str = "MEMORY_SAVE:";

/// Shown instead of an empty line when the reply was nothing but the
/// directive.
pub const NOTED_MSG: &str = "Noted, Boss.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// What the user sees.
    pub visible_reply: String,
    /// Fact to remember, if the reply carried a non-empty directive.
    pub fact: Option<String>,
}

/// Split a raw reply on the first marker. Text after a second marker is
/// ignored.
pub fn split_directive(raw: &str) -> Extraction {
    match raw.split_once(MEMORY_MARKER) {
        Some((before, after)) => {
            let fact = after.split(MEMORY_MARKER).next().unwrap_or_default().trim();
            let visible = before.trim();
            Extraction {
                visible_reply: if visible.is_empty() { NOTED_MSG.to_string() } else { visible.to_string() },
                fact: (!fact.is_empty()).then(|| fact.to_string()),
            }
        }
        None => Extraction { visible_reply: raw.trim().to_string(), fact: None },
    }
}

/// Apply `raw` to `memory` and persist. Returns the visible reply.
///
/// Memory is only touched when a fact was extracted: the fact is merged,
/// the turn is recorded with the model's trimmed raw output (directive
/// included), and the record is saved. A failed save is logged; the reply
/// is still returned.
pub fn extract_and_commit(
    raw: &str,
    user_input: &str,
    memory: &mut Memory,
    store: &MemoryStore,
) -> String {
    let Extraction { visible_reply, fact } = split_directive(raw);

    let Some(fact) = fact else {
        if raw.contains(MEMORY_MARKER) {
            debug!("model emitted an empty memory directive, ignoring");
        }
        return visible_reply;
    };

    let added = memory.append_fact(fact.as_str());
    memory.append_turn(user_input, raw.trim());

    match store.save(memory) {
        Ok(()) => info!(%fact, new = added, "memory fact committed"),
        Err(e) => warn!(error = %e, "memory save failed, reply delivered without persisting"),
    }
    visible_reply
}
