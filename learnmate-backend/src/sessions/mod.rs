//! Per-session workflow state.
//!
//! A session walks through three phases: `input` (nothing analyzed yet),
//! `analysis` (a breakdown is stored) and `resources` (resources found).
//! Failed calls never advance the phase; reset discards the session entirely.

use std::collections::{HashMap, HashSet};

use dashmap::DashMap;
use serde::Serialize;
use strum::Display;

use crate::models::{LearningResource, TaskBreakdown};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SessionPhase {
    #[default]
    Input,
    Analysis,
    Resources,
}

/// One in-progress learning workflow, keyed by a client-supplied session id.
#[derive(Debug, Clone, Default)]
pub struct LearningSession {
    pub phase: SessionPhase,
    pub breakdown: Option<TaskBreakdown>,
    pub known_indices: HashSet<usize>,
    pub resources: HashMap<String, Vec<LearningResource>>,
}

/// Concurrent map of session id to session state. Handlers receive this via
/// `AppState`; there is no global singleton. Two requests racing on the same
/// session id resolve last-writer-wins.
pub struct SessionStore {
    sessions: DashMap<String, LearningSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        SessionStore {
            sessions: DashMap::new(),
        }
    }

    /// Current phase; sessions that were never touched (or were reset) report
    /// `input`.
    pub fn phase(&self, session_id: &str) -> SessionPhase {
        self.sessions
            .get(session_id)
            .map(|s| s.phase)
            .unwrap_or_default()
    }

    /// Cloned copy of the session's breakdown, if one has been stored.
    ///
    /// Reads are cloned out so no map guard is held across handler await
    /// points.
    pub fn breakdown(&self, session_id: &str) -> Option<TaskBreakdown> {
        self.sessions
            .get(session_id)
            .and_then(|s| s.breakdown.clone())
    }

    /// Cloned copy of the session's resource map.
    pub fn resources(&self, session_id: &str) -> HashMap<String, Vec<LearningResource>> {
        self.sessions
            .get(session_id)
            .map(|s| s.resources.clone())
            .unwrap_or_default()
    }

    /// Store a freshly produced breakdown, creating the session on first use.
    ///
    /// Replaces any prior breakdown and clears the known-set and resources:
    /// known indices refer to positions in the breakdown they were chosen
    /// against and are invalid once it is superseded.
    pub fn store_breakdown(&self, session_id: &str, breakdown: TaskBreakdown) {
        let mut session = self.sessions.entry(session_id.to_string()).or_default();
        session.breakdown = Some(breakdown);
        session.known_indices.clear();
        session.resources.clear();
        session.phase = SessionPhase::Analysis;
    }

    /// Record a completed resource search and advance to the `resources`
    /// phase.
    pub fn store_resources(
        &self,
        session_id: &str,
        known_indices: HashSet<usize>,
        resources: HashMap<String, Vec<LearningResource>>,
    ) {
        let mut session = self.sessions.entry(session_id.to_string()).or_default();
        session.known_indices = known_indices;
        session.resources = resources;
        session.phase = SessionPhase::Resources;
    }

    /// Discard the session entirely. Returns whether one existed. A later
    /// lookup sees a fresh `input`-phase session.
    pub fn reset(&self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
