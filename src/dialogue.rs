//! Branching story dialogue: node table, validation and choice transitions.
//!
//! A story is an ordered table of [`StoryNode`]s. Each node carries a prompt,
//! up to two labeled choices and the indices of their successor nodes. Ending
//! nodes mark both transitions with [`END_OF_STORY`] and carry no labels.
//! [`Dialogue`] owns the table and a single mutable cursor, advanced only by
//! [`choose_option`](Dialogue::choose_option).
//!
//! The table is validated up front so the cursor can never leave the table:
//! a malformed script is rejected at construction instead of surfacing as an
//! out-of-bounds lookup mid-game.

use thiserror::Error;

/// Transition index marking "no successor". A node with this sentinel on
/// both branches ends the story.
pub const END_OF_STORY: i32 = -1;

/// One step of the story: a prompt, two choice labels and their successors.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryNode {
    pub text: String,
    pub choices: [String; 2],
    pub next: [i32; 2],
}

impl StoryNode {
    /// A node with two live choices.
    pub fn branch(
        text: impl Into<String>,
        choice1: impl Into<String>,
        choice2: impl Into<String>,
        next1: i32,
        next2: i32,
    ) -> Self {
        Self {
            text: text.into(),
            choices: [choice1.into(), choice2.into()],
            next: [next1, next2],
        }
    }

    /// A leaf node: no choices, both transitions sentinel.
    pub fn ending(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            choices: [String::new(), String::new()],
            next: [END_OF_STORY; 2],
        }
    }

    /// A node is terminal iff both transitions carry the sentinel.
    pub fn is_terminal(&self) -> bool {
        self.next == [END_OF_STORY; 2]
    }
}

#[derive(Debug, Error)]
pub enum DialogueError {
    #[error("the story script contains no nodes")]
    EmptyScript,
    #[error("node {node}: choice {choice} points to {target}, outside the script of {len} nodes")]
    DanglingTransition {
        node: usize,
        choice: u8,
        target: i32,
        len: usize,
    },
    #[error("node {node} mixes an ending sentinel with a live transition")]
    HalfEnding { node: usize },
    #[error("ending node {node} carries a non-empty choice label")]
    LabeledEnding { node: usize },
}

/// The dialogue state machine: an immutable node table plus the current index.
pub struct Dialogue {
    nodes: Vec<StoryNode>,
    current: usize,
}

impl Dialogue {
    /// Build a dialogue from a script table, starting at node 0.
    ///
    /// The whole graph is checked here: every node must either end the story
    /// on both branches (with empty labels) or point both branches at valid
    /// nodes.
    pub fn new(nodes: Vec<StoryNode>) -> Result<Self, DialogueError> {
        if nodes.is_empty() {
            return Err(DialogueError::EmptyScript);
        }
        let len = nodes.len();
        for (idx, node) in nodes.iter().enumerate() {
            if node.is_terminal() {
                if node.choices.iter().any(|label| !label.is_empty()) {
                    return Err(DialogueError::LabeledEnding { node: idx });
                }
                continue;
            }
            if node.next.contains(&END_OF_STORY) {
                return Err(DialogueError::HalfEnding { node: idx });
            }
            for (branch, &target) in node.next.iter().enumerate() {
                if target < 0 || target as usize >= len {
                    return Err(DialogueError::DanglingTransition {
                        node: idx,
                        choice: branch as u8 + 1,
                        target,
                        len,
                    });
                }
            }
        }
        Ok(Self { nodes, current: 0 })
    }

    /// The node the story currently sits on. Always valid: validation plus
    /// the guarded transition keep the cursor inside the table.
    pub fn current_node(&self) -> &StoryNode {
        &self.nodes[self.current]
    }

    /// Index of the current node.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Whether the story has reached an ending node.
    pub fn is_terminal(&self) -> bool {
        self.current_node().is_terminal()
    }

    /// Follow the transition for choice 1 or 2.
    ///
    /// Anything else is an invalid option: logged, state unchanged. A choice
    /// made after the story has ended is likewise ignored.
    pub fn choose_option(&mut self, choice: u8) {
        if self.is_terminal() {
            log::warn!("choice {choice} ignored: the story has ended");
            return;
        }
        let next = match choice {
            1 => self.current_node().next[0],
            2 => self.current_node().next[1],
            other => {
                log::warn!("invalid option {other}, staying on the current prompt");
                return;
            }
        };
        self.current = next as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit_intro() -> Vec<StoryNode> {
        vec![
            StoryNode::branch("Do you like red or yellow?", "Red", "Yellow", 1, 2),
            StoryNode::ending("You like red."),
            StoryNode::ending("You like yellow."),
        ]
    }

    #[test]
    fn valid_script_starts_at_root() {
        let dialogue = Dialogue::new(fruit_intro()).unwrap();
        assert_eq!(dialogue.current_index(), 0);
        assert_eq!(dialogue.current_node().text, "Do you like red or yellow?");
        assert!(!dialogue.is_terminal());
    }

    #[test]
    fn empty_script_is_rejected() {
        assert!(matches!(
            Dialogue::new(Vec::new()),
            Err(DialogueError::EmptyScript)
        ));
    }

    #[test]
    fn dangling_transition_is_rejected() {
        let nodes = vec![StoryNode::branch("?", "a", "b", 1, 7)];
        assert!(matches!(
            Dialogue::new(nodes),
            Err(DialogueError::DanglingTransition {
                node: 0,
                choice: 2,
                target: 7,
                ..
            })
        ));
    }

    #[test]
    fn half_ending_is_rejected() {
        let nodes = vec![
            StoryNode::branch("?", "a", "b", END_OF_STORY, 1),
            StoryNode::ending("done"),
        ];
        assert!(matches!(
            Dialogue::new(nodes),
            Err(DialogueError::HalfEnding { node: 0 })
        ));
    }

    #[test]
    fn labeled_ending_is_rejected() {
        let nodes = vec![StoryNode {
            text: "done".into(),
            choices: ["stray".into(), String::new()],
            next: [END_OF_STORY; 2],
        }];
        assert!(matches!(
            Dialogue::new(nodes),
            Err(DialogueError::LabeledEnding { node: 0 })
        ));
    }

    #[test]
    fn choosing_follows_the_labeled_branch() {
        let mut dialogue = Dialogue::new(fruit_intro()).unwrap();
        dialogue.choose_option(2);
        assert_eq!(dialogue.current_index(), 2);
        assert_eq!(dialogue.current_node().text, "You like yellow.");
        assert!(dialogue.is_terminal());
    }

    #[test]
    fn invalid_option_leaves_state_unchanged() {
        let mut dialogue = Dialogue::new(fruit_intro()).unwrap();
        for bad in [0, 3, 42, 255] {
            dialogue.choose_option(bad);
            assert_eq!(dialogue.current_index(), 0);
        }
    }

    #[test]
    fn choice_after_the_ending_is_ignored() {
        let mut dialogue = Dialogue::new(fruit_intro()).unwrap();
        dialogue.choose_option(1);
        assert!(dialogue.is_terminal());
        dialogue.choose_option(1);
        dialogue.choose_option(2);
        assert_eq!(dialogue.current_index(), 1);
    }

    #[test]
    fn terminal_nodes_carry_empty_labels() {
        let dialogue = Dialogue::new(fruit_intro()).unwrap();
        for node in [1, 2] {
            let node = &dialogue.nodes[node];
            assert!(node.is_terminal());
            assert!(node.choices.iter().all(String::is_empty));
        }
    }

    #[test]
    fn every_choice_walk_stays_in_bounds() {
        // Reconverging graph: both branches of node 1 lead back down to the
        // same ending, mirroring how real scripts funnel into shared leaves.
        let nodes = vec![
            StoryNode::branch("root", "l", "r", 1, 2),
            StoryNode::branch("left", "l", "r", 3, 3),
            StoryNode::branch("right", "l", "r", 3, 1),
            StoryNode::ending("leaf"),
        ];
        // Exhaust all {1,2} sequences up to depth 8.
        for walk in 0u32..(1 << 8) {
            let mut dialogue = Dialogue::new(nodes.clone()).unwrap();
            for step in 0..8 {
                let choice = if walk >> step & 1 == 0 { 1 } else { 2 };
                dialogue.choose_option(choice);
                assert!(dialogue.current_index() < nodes.len());
            }
        }
    }
}
