//! The story demo: a parrot quizzes you about fruit.
//!
//! Keys 1 and 2 pick a choice; WASD and right-mouse-drag move the camera.

use anyhow::Context as _;
use tale_ngin::{
    context::{Context, InitContext},
    dialogue::{Dialogue, StoryNode},
    flow::{self, FlowConstructor, GraphicsFlow},
    render::Render,
    resources,
    text::{TextBlock, TextRenderer},
};
use winit::{
    event::{DeviceEvent, KeyEvent, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

const FONT_FILE: &str = "fonts/GentiumBookPlus-Bold.ttf";
const FONT_PX: f32 = 48.0;
const TEXT_MARGIN: f32 = 100.0;
const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

/// The fixed script table. Node 0 is the opening question; every branch
/// funnels into one of the four fruit verdicts.
fn script() -> Vec<StoryNode> {
    vec![
        StoryNode::branch(
            "Once upon a time, in a peaceful village nestled between a valley of fruit trees, \
             there lived a lively parrot named Romeo. Romeo had a special talent: he loved asking \
             anyone who passed by random questions. But little did they know, Romeo had a hidden \
             agenda -- he was secretly trying to find out their fruit personality. One day, you \
             were strolling through the village when Romeo swooped down and landed on your \
             shoulder with a mischievous grin. \"Ahoy there! Answer me this,\" Romeo said, \
             \"Do you like red or yellow?\"",
            "Red",
            "Yellow",
            1,
            2,
        ),
        StoryNode::branch(
            "You thought for a moment and responded with your favorite. Romeo's eyes glinted as \
             if he had cracked part of a great mystery. \"Interesting, interesting! Now, what \
             about fruits -- apple or strawberry?\" Romeo asked with an air of importance, \
             clearly taking his job as the village's most inquisitive parrot very seriously.",
            "Apple",
            "Strawberry",
            3,
            4,
        ),
        StoryNode::branch(
            "You thought for a moment and responded with your favorite. Romeo's eyes glinted as \
             if he had cracked part of a great mystery. \"Interesting, interesting! Now, what \
             about fruits -- banana or mango?\" Romeo asked with an air of importance, clearly \
             taking his job as the village's most inquisitive parrot very seriously.",
            "Banana",
            "Mango",
            5,
            6,
        ),
        StoryNode::ending(verdict("APPLE")),
        StoryNode::ending(verdict("STRAWBERRY")),
        StoryNode::ending(verdict("BANANA")),
        StoryNode::ending(verdict("MANGO")),
    ]
}

fn verdict(fruit: &str) -> String {
    format!(
        "\"Ah-ha! I've got it! I've cracked the fruity code!\" Romeo announced triumphantly, as \
         if he had just solved the greatest riddle known to parrots. He perched back on your \
         shoulder and declared, \"So, after my very scientific research, I have concluded: \
         You... yes, YOU, my friend, like {fruit}!\""
    )
}

/// The text blocks for the current story position: the prompt near the top
/// of the screen and, while the story is still running, the two numbered
/// choice labels near the bottom. Ending nodes show only the prompt.
fn story_blocks(dialogue: &Dialogue, viewport_height: f32) -> Vec<TextBlock> {
    let node = dialogue.current_node();
    let mut blocks = vec![TextBlock {
        text: node.text.clone(),
        position: [TEXT_MARGIN, viewport_height - 2.0 * TEXT_MARGIN],
        scale: 1.0,
        colour: WHITE,
    }];
    if !node.is_terminal() {
        for (i, label) in node.choices.iter().enumerate() {
            blocks.push(TextBlock {
                text: format!("{}: {}", i + 1, label),
                position: [TEXT_MARGIN, 150.0 - 50.0 * i as f32],
                scale: 1.0,
                colour: WHITE,
            });
        }
    }
    blocks
}

#[derive(Default)]
struct State;

struct StoryFlow {
    dialogue: Dialogue,
    text: TextRenderer,
}

impl StoryFlow {
    async fn new(init: &InitContext) -> anyhow::Result<StoryFlow> {
        let font = resources::load_binary(FONT_FILE)
            .await
            .with_context(|| format!("could not read the demo font at assets/{FONT_FILE}"))?;
        let text = TextRenderer::new(init, &font, FONT_PX).await?;
        let dialogue = Dialogue::new(script())?;
        Ok(Self { dialogue, text })
    }
}

impl GraphicsFlow<State> for StoryFlow {
    fn on_init(&mut self, ctx: &mut Context, _: &mut State) {
        ctx.clear_colour = wgpu::Color::BLACK;
    }

    fn on_update(&mut self, ctx: &Context, _: &mut State, _: std::time::Duration) {
        let blocks = story_blocks(&self.dialogue, ctx.config.height as f32);
        self.text.prepare(ctx, &blocks);
    }

    fn on_device_events(&mut self, _: &Context, _: &mut State, _: &DeviceEvent) {}

    fn on_window_events(&mut self, _: &Context, _: &mut State, event: &WindowEvent) {
        if let WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    physical_key: PhysicalKey::Code(key),
                    state,
                    repeat: false,
                    ..
                },
            ..
        } = event
        {
            if state.is_pressed() {
                match key {
                    KeyCode::Digit1 => self.dialogue.choose_option(1),
                    KeyCode::Digit2 => self.dialogue.choose_option(2),
                    _ => (),
                }
            }
        }
    }

    fn on_render(&self) -> Render<'_> {
        Render::Text(&self.text)
    }
}

fn main() -> anyhow::Result<()> {
    let story: FlowConstructor<State> = Box::new(|init| {
        Box::pin(async move {
            let flow = StoryFlow::new(&init).await?;
            Ok(Box::new(flow) as Box<dyn GraphicsFlow<_>>)
        })
    });

    flow::run(vec![story])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_is_well_formed() {
        let dialogue = Dialogue::new(script()).unwrap();
        assert_eq!(dialogue.current_index(), 0);
    }

    #[test]
    fn every_walk_ends_on_a_fruit_verdict() {
        for walk in [[1, 1], [1, 2], [2, 1], [2, 2]] {
            let mut dialogue = Dialogue::new(script()).unwrap();
            for choice in walk {
                dialogue.choose_option(choice);
            }
            assert!(dialogue.is_terminal());
            assert!(dialogue.current_node().text.contains("fruity code"));
        }
    }

    #[test]
    fn yellow_leads_to_the_banana_mango_question() {
        let mut dialogue = Dialogue::new(script()).unwrap();
        dialogue.choose_option(2);
        assert_eq!(dialogue.current_index(), 2);
        assert!(dialogue.current_node().text.contains("banana or mango"));
    }

    #[test]
    fn running_nodes_show_prompt_and_both_choice_labels() {
        let dialogue = Dialogue::new(script()).unwrap();
        let blocks = story_blocks(&dialogue, 1080.0);
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[1].text, "1: Red");
        assert_eq!(blocks[2].text, "2: Yellow");
    }

    #[test]
    fn ending_nodes_show_only_the_prompt() {
        let mut dialogue = Dialogue::new(script()).unwrap();
        dialogue.choose_option(1);
        dialogue.choose_option(1);
        assert!(dialogue.is_terminal());
        let blocks = story_blocks(&dialogue, 1080.0);
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].text.contains("APPLE"));
    }

    #[test]
    fn script_text_stays_within_the_supported_character_set() {
        for node in script() {
            assert!(
                node.text.chars().all(|ch| (ch as u32) < 128),
                "script text must only use renderable ASCII"
            );
        }
    }
}
