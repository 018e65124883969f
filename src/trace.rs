//! Opt-in structured decision tracing. [`crate::policy::PolicyEngine::decide`]
//! never builds one of these; [`crate::policy::PolicyEngine::decide_with_trace`]
//! does, for callers who want to show their work.

use serde::{Deserialize, Serialize};
use std::time::Instant;

/// A single node in the decision tree that produced an action. `children`
/// lets a caller render the full chain of predicates that were checked
/// along the way, not just the final branch taken.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTrace {
    pub name: String,
    pub description: String,
    pub result: String,
    pub children: Vec<DecisionTrace>,
    pub elapsed_seconds: f64,
}

impl DecisionTrace {
    pub fn leaf(name: &str, description: &str, result: &str) -> Self {
        DecisionTrace {
            name: name.to_string(),
            description: description.to_string(),
            result: result.to_string(),
            children: Vec::new(),
            elapsed_seconds: 0.0,
        }
    }

    pub fn with_children(name: &str, description: &str, result: &str, children: Vec<DecisionTrace>) -> Self {
        DecisionTrace {
            name: name.to_string(),
            description: description.to_string(),
            result: result.to_string(),
            children,
            elapsed_seconds: 0.0,
        }
    }

    /// Render the trace as JSON, the shape a caller would log or ship over
    /// the wire to a downstream viewer (per the crate's serialization
    /// contract — this engine never writes the result anywhere itself).
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

/// Measures wall-clock time around building a trace tree and stamps it on
/// the root node.
pub struct TraceTimer {
    start: Instant,
}

impl TraceTimer {
    pub fn start() -> Self {
        TraceTimer { start: Instant::now() }
    }

    pub fn finish(self, mut trace: DecisionTrace) -> DecisionTrace {
        trace.elapsed_seconds = self.start.elapsed().as_secs_f64();
        trace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_stamps_a_nonnegative_duration() {
        let timer = TraceTimer::start();
        let trace = DecisionTrace::leaf("root", "test", "Fold");
        let trace = timer.finish(trace);
        assert!(trace.elapsed_seconds >= 0.0);
    }

    #[test]
    fn children_are_preserved() {
        let child = DecisionTrace::leaf("facing_raise", "is hero facing a raise", "true");
        let root = DecisionTrace::with_children("preflop", "preflop decision", "Raise", vec![child]);
        assert_eq!(root.children.len(), 1);
    }

    #[test]
    fn json_round_trips() {
        let trace = DecisionTrace::leaf("decide", "flop decision", "Raise 12.50");
        let json = trace.to_json().unwrap();
        let parsed = DecisionTrace::from_json(&json).unwrap();
        assert_eq!(parsed.result, trace.result);
    }
}
