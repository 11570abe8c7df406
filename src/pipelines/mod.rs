//! Render pipeline definitions.
//!
//! Each submodule provides `mk_*` constructors for one pipeline; the
//! [`Pipelines`] bundle is built once by the context and looked up by the
//! frame loop.

pub mod text;

/// The pipelines owned by the context.
#[derive(Debug)]
pub struct Pipelines {
    pub text: wgpu::RenderPipeline,
}

impl Pipelines {
    pub fn new(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) -> Self {
        Self {
            text: text::mk_text_pipeline(device, config),
        }
    }
}
