//! End-to-end walks over dialogue graphs through the public API.

use tale_ngin::dialogue::{Dialogue, DialogueError, StoryNode, END_OF_STORY};

fn colour_quiz() -> Vec<StoryNode> {
    vec![
        StoryNode::branch("Do you like red or yellow?", "Red", "Yellow", 1, 2),
        StoryNode::branch("Warm or cold red?", "Warm", "Cold", 3, 3),
        StoryNode::branch("Pale or deep yellow?", "Pale", "Deep", 3, 3),
        StoryNode::ending("A fine colour either way."),
    ]
}

#[test]
fn choice_two_follows_the_second_transition() {
    let mut dialogue = Dialogue::new(colour_quiz()).unwrap();
    dialogue.choose_option(2);
    assert_eq!(dialogue.current_index(), 2);
    assert_eq!(dialogue.current_node().text, "Pale or deep yellow?");
}

#[test]
fn walks_terminate_and_then_ignore_input() {
    let mut dialogue = Dialogue::new(colour_quiz()).unwrap();
    dialogue.choose_option(1);
    dialogue.choose_option(2);
    assert!(dialogue.is_terminal());
    assert!(dialogue.current_node().choices.iter().all(String::is_empty));

    // Further choices of any value leave the ending in place.
    for choice in [1, 2, 0, 9] {
        dialogue.choose_option(choice);
        assert_eq!(dialogue.current_index(), 3);
    }
}

#[test]
fn long_pseudo_random_walks_stay_in_bounds() {
    // Cycle back to the root from node 2 so walks can run indefinitely.
    let nodes = vec![
        StoryNode::branch("root", "a", "b", 1, 2),
        StoryNode::ending("leaf"),
        StoryNode::branch("loop", "a", "b", 0, 1),
    ];
    let mut dialogue = Dialogue::new(nodes.clone()).unwrap();
    let mut seed: u32 = 0x2545_f491;
    for _ in 0..10_000 {
        // xorshift; only the parity picks the branch
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        dialogue.choose_option(1 + (seed & 1) as u8);
        assert!(dialogue.current_index() < nodes.len());
        if dialogue.is_terminal() {
            dialogue = Dialogue::new(nodes.clone()).unwrap();
        }
    }
}

#[test]
fn malformed_graphs_never_construct() {
    let dangling = vec![StoryNode::branch("?", "a", "b", 1, 99)];
    assert!(matches!(
        Dialogue::new(dangling),
        Err(DialogueError::DanglingTransition { .. })
    ));

    let negative = vec![StoryNode::branch("?", "a", "b", -7, 0)];
    assert!(Dialogue::new(negative).is_err());

    let half = vec![StoryNode::branch("?", "a", "b", 0, END_OF_STORY)];
    assert!(matches!(
        Dialogue::new(half),
        Err(DialogueError::HalfEnding { node: 0 })
    ));
}
