//! Transitions and automata for `regular`-style constraints.
//!
//! These are flat value objects; they do not take part in expression
//! traversal.

use std::fmt;

use rustc_hash::FxHashSet;

/// A labeled edge `start --value--> end`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Transition {
    start: String,
    value: i64,
    end: String,
}

impl Transition {
    /// Creates a transition.
    #[must_use]
    pub fn new(start: impl Into<String>, value: i64, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            value,
            end: end.into(),
        }
    }

    /// Returns the source state.
    #[must_use]
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Returns the label.
    #[must_use]
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Returns the target state.
    #[must_use]
    pub fn end(&self) -> &str {
        &self.end
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.start, self.value, self.end)
    }
}

/// A finite automaton over integer labels.
///
/// The automaton may be nondeterministic: several transitions may leave the
/// same state with the same label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Automaton {
    start: String,
    transitions: Vec<Transition>,
    finals: Vec<String>,
}

impl Automaton {
    /// Creates an automaton from its start state, transitions and accepting
    /// states.
    #[must_use]
    pub fn new(
        start: impl Into<String>,
        transitions: Vec<Transition>,
        finals: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            start: start.into(),
            transitions,
            finals: finals.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the start state.
    #[must_use]
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Returns the transitions in insertion order.
    #[must_use]
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Returns the accepting states.
    #[must_use]
    pub fn finals(&self) -> &[String] {
        &self.finals
    }

    /// Returns every state mentioned by the automaton, in order of first
    /// appearance.
    #[must_use]
    pub fn states(&self) -> Vec<&str> {
        let mut seen = FxHashSet::default();
        std::iter::once(self.start.as_str())
            .chain(
                self.transitions
                    .iter()
                    .flat_map(|t| [t.start.as_str(), t.end.as_str()]),
            )
            .chain(self.finals.iter().map(String::as_str))
            .filter(|state| seen.insert(*state))
            .collect()
    }

    /// Returns the distinct labels, in order of first appearance.
    #[must_use]
    pub fn alphabet(&self) -> Vec<i64> {
        let mut seen = FxHashSet::default();
        self.transitions
            .iter()
            .map(Transition::value)
            .filter(|value| seen.insert(*value))
            .collect()
    }

    /// Returns true if no state has two transitions with the same label.
    #[must_use]
    pub fn is_deterministic(&self) -> bool {
        let mut seen = FxHashSet::default();
        self.transitions
            .iter()
            .all(|t| seen.insert((t.start.as_str(), t.value)))
    }

    /// Returns true if the automaton accepts `word`.
    #[must_use]
    pub fn accepts(&self, word: &[i64]) -> bool {
        let mut current: FxHashSet<&str> = std::iter::once(self.start.as_str()).collect();
        for &symbol in word {
            current = self
                .transitions
                .iter()
                .filter(|t| t.value == symbol && current.contains(t.start.as_str()))
                .map(|t| t.end.as_str())
                .collect();
            if current.is_empty() {
                return false;
            }
        }
        self.finals.iter().any(|state| current.contains(state.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Accepts words over {0, 1} containing exactly one 1.
    fn single_one() -> Automaton {
        Automaton::new(
            "a",
            vec![
                Transition::new("a", 0, "a"),
                Transition::new("a", 1, "b"),
                Transition::new("b", 0, "b"),
            ],
            ["b"],
        )
    }

    #[test]
    fn test_transition_accessors() {
        let t = Transition::new("q0", 3, "q1");
        assert_eq!(t.start(), "q0");
        assert_eq!(t.value(), 3);
        assert_eq!(t.end(), "q1");
        assert_eq!(t.to_string(), "(q0,3,q1)");
    }

    #[test]
    fn test_accepts() {
        let automaton = single_one();
        assert!(automaton.accepts(&[0, 1, 0, 0]));
        assert!(automaton.accepts(&[1]));
        assert!(!automaton.accepts(&[0, 0]));
        assert!(!automaton.accepts(&[1, 1]));
        assert!(!automaton.accepts(&[2]));
    }

    #[test]
    fn test_states_and_alphabet() {
        let automaton = single_one();
        assert_eq!(automaton.states(), ["a", "b"]);
        assert_eq!(automaton.alphabet(), [0, 1]);
        assert!(automaton.is_deterministic());
    }

    #[test]
    fn test_parts_are_kept_in_order() {
        let automaton = single_one();
        assert_eq!(automaton.start(), "a");
        assert_eq!(automaton.finals(), ["b".to_owned()]);
        let labels: Vec<String> = automaton
            .transitions()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(labels, ["(a,0,a)", "(a,1,b)", "(b,0,b)"]);
    }

    #[test]
    fn test_nondeterministic() {
        // Words ending with 1.
        let automaton = Automaton::new(
            "s",
            vec![
                Transition::new("s", 0, "s"),
                Transition::new("s", 1, "s"),
                Transition::new("s", 1, "f"),
            ],
            ["f"],
        );
        assert!(!automaton.is_deterministic());
        assert!(automaton.accepts(&[0, 0, 1]));
        assert!(!automaton.accepts(&[1, 0]));
        assert!(!automaton.accepts(&[]));
    }
}
