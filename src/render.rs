//! Render composition.
//!
//! Flows describe what to draw each frame by returning a [`Render`]. The
//! frame loop sorts the tree into per-pipeline batches and records them in
//! one pass; flows never touch the render pass directly.

use crate::text::TextRenderer;

/// Specifies what a flow wants drawn this frame.
///
/// - `None` renders nothing
/// - `Text(renderer)` draws the renderer's prepared text blocks
/// - `Composed(Vec<Render>)` recursively renders a composition
pub enum Render<'a> {
    None,
    Text(&'a TextRenderer),
    Composed(Vec<Render<'a>>),
}

impl<'a> Render<'a> {
    pub(crate) fn collect_text(self, texts: &mut Vec<&'a TextRenderer>) {
        match self {
            Render::Text(renderer) => texts.push(renderer),
            Render::Composed(renders) => renders
                .into_iter()
                .for_each(|render| render.collect_text(texts)),
            Render::None => (),
        }
    }
}
