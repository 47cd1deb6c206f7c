//! Completeness and contradiction checks of transition guards
//!
//! Checks run on the [merged](Automaton::merged) automaton, so every report
//! speaks about one state number and parallel transitions count as one edge.

use super::error::AutomatonError;
use super::Automaton;
use crate::espresso::MinimizerEngine;
use crate::minimize::Minimizable;
use crate::tree::{LogicNode, LogicRoot};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of [`Automaton::completeness`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletenessReport {
    /// State number checked
    pub state: usize,
    /// Some outgoing guard holds for every input combination
    pub is_complete: bool,
    /// Minimised condition under which no outgoing guard holds
    pub witness: LogicRoot,
}

/// Result of [`Automaton::contradiction`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContradictionReport {
    /// State number checked
    pub state: usize,
    /// No two outgoing guards hold at the same time
    pub is_contradiction_free: bool,
    /// Minimised condition under which at least two outgoing guards hold
    pub witness: LogicRoot,
}

/// Guards leaving `state` of an already merged automaton
fn guards_of(merged: &Automaton, state: usize) -> Result<Vec<LogicNode>, AutomatonError> {
    if merged.node(state).is_none() {
        return Err(AutomatonError::UnknownState {
            automaton_id: merged.id,
            state,
        });
    }
    Ok(merged
        .outgoing(state)
        .map(|t| t.guard.tree().clone())
        .collect())
}

fn completeness_of(
    merged: &Automaton,
    engine: &dyn MinimizerEngine,
    state: usize,
) -> Result<CompletenessReport, AutomatonError> {
    let guards = guards_of(merged, state)?;
    let count = guards.len();
    let any = LogicNode::or_all(guards).minimize(engine)?;

    let witness = LogicNode::not(any.clone()).minimize(engine)?;
    let report = CompletenessReport {
        state,
        is_complete: any == LogicNode::constant(true),
        witness: LogicRoot::new(witness),
    };
    debug!(
        automaton = merged.id,
        state,
        guards = count,
        complete = report.is_complete,
        "checked completeness"
    );
    Ok(report)
}

fn contradiction_of(
    merged: &Automaton,
    engine: &dyn MinimizerEngine,
    state: usize,
) -> Result<ContradictionReport, AutomatonError> {
    let guards = guards_of(merged, state)?;
    let overlaps = guards.iter().enumerate().flat_map(|(i, first)| {
        guards[i + 1..]
            .iter()
            .map(move |second| LogicNode::and(first.clone(), second.clone()))
    });

    let witness = LogicNode::or_all(overlaps).minimize(engine)?;
    let report = ContradictionReport {
        state,
        is_contradiction_free: witness == LogicNode::constant(false),
        witness: LogicRoot::new(witness),
    };
    debug!(
        automaton = merged.id,
        state,
        guards = guards.len(),
        contradiction_free = report.is_contradiction_free,
        "checked contradictions"
    );
    Ok(report)
}

impl Automaton {
    /// Check that the guards leaving state `state` cover every input combination
    ///
    /// Transitions of every node encoded as `state` are taken together.
    pub fn completeness(
        &self,
        engine: &dyn MinimizerEngine,
        state: usize,
    ) -> Result<CompletenessReport, AutomatonError> {
        completeness_of(&self.merged(), engine, state)
    }

    /// Check that no two guards leaving state `state` can hold together
    ///
    /// Parallel transitions between the same two states form a single edge and
    /// never contradict each other.
    pub fn contradiction(
        &self,
        engine: &dyn MinimizerEngine,
        state: usize,
    ) -> Result<ContradictionReport, AutomatonError> {
        contradiction_of(&self.merged(), engine, state)
    }

    /// Completeness report of every state, in order of first appearance
    pub fn completeness_reports(
        &self,
        engine: &dyn MinimizerEngine,
    ) -> Result<Vec<CompletenessReport>, AutomatonError> {
        let merged = self.merged();
        merged
            .nodes
            .iter()
            .map(|n| completeness_of(&merged, engine, n.id))
            .collect()
    }

    /// Contradiction report of every state, in order of first appearance
    pub fn contradiction_reports(
        &self,
        engine: &dyn MinimizerEngine,
    ) -> Result<Vec<ContradictionReport>, AutomatonError> {
        let merged = self.merged();
        merged
            .nodes
            .iter()
            .map(|n| contradiction_of(&merged, engine, n.id))
            .collect()
    }
}
