use std::fmt;

use super::{DecisionProvider, DecisionRequest, errors::DecisionResult};

type Script = Box<dyn FnMut(&DecisionRequest<'_>) -> DecisionResult<String> + Send>;

/// A provider backed by a closure, for hosts that bring their own policy.
pub struct ScriptedPolicy {
    script: Script,
}

impl ScriptedPolicy {
    pub fn new<F>(script: F) -> Self
    where
        F: FnMut(&DecisionRequest<'_>) -> DecisionResult<String> + Send + 'static,
    {
        Self {
            script: Box::new(script),
        }
    }

    /// Always answer with `label`.
    pub fn constant(label: impl Into<String>) -> Self {
        let label = label.into();
        Self::new(move |_| Ok(label.clone()))
    }

    /// One label per street, preflop first.
    pub fn by_street(labels: [&str; 4]) -> Self {
        let labels = labels.map(str::to_string);
        Self::new(move |request| Ok(labels[request.street.index()].clone()))
    }
}

impl DecisionProvider for ScriptedPolicy {
    fn decide(&mut self, request: &DecisionRequest<'_>) -> DecisionResult<String> {
        (self.script)(request)
    }
}

impl fmt::Debug for ScriptedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ScriptedPolicy").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::Street;

    fn request(street: Street) -> DecisionRequest<'static> {
        DecisionRequest {
            personality: "nine_percent",
            hole_cards: &[],
            board: &[],
            street,
        }
    }

    #[test]
    fn test_by_street() {
        let mut policy = ScriptedPolicy::by_street(["raise", "call", "check", "fold"]);
        let labels: Vec<String> = Street::ALL
            .into_iter()
            .map(|street| policy.decide(&request(street)).unwrap())
            .collect();
        assert_eq!(labels, ["raise", "call", "check", "fold"]);
    }

    #[test]
    fn test_script_keeps_state() {
        let mut calls = 0;
        let mut policy = ScriptedPolicy::new(move |_| {
            calls += 1;
            Ok(if calls > 1 { "call" } else { "raise" }.to_string())
        });
        assert_eq!(policy.decide(&request(Street::Flop)).unwrap(), "raise");
        assert_eq!(policy.decide(&request(Street::Flop)).unwrap(), "call");
    }
}
