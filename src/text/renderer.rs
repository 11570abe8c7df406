//! The glyph quad renderer: shared vertex buffer, one draw call per glyph.
//!
//! The renderer keeps a single reusable vertex buffer holding one quad slot
//! per drawn glyph. A frame goes through two phases:
//!
//! 1. [`prepare`](TextRenderer::prepare) lays out the frame's text blocks,
//!    writes every quad into its slot of the shared buffer and refreshes the
//!    per-block uniforms (projection + colour);
//! 2. [`draw`](TextRenderer::draw) binds each glyph's texture and issues one
//!    draw call per glyph from its slot.
//!
//! Between the two phases nothing else writes the buffer; the slots written
//! by `prepare` are exactly the slots `draw` reads. The buffer only grows
//! (by doubling) when a frame needs more quads than ever before, so there is
//! no per-glyph allocation.

use cgmath::Matrix4;

use crate::{
    camera::OPENGL_TO_WGPU_MATRIX,
    context::{Context, InitContext},
    pipelines::text::{
        BLOCK_UNIFORM_STRIDE, TextUniform, TextVertex, mk_block_layout, mk_glyph_layout,
        mk_glyph_sampler,
    },
    text::glyph::{GlyphError, GlyphSet, GlyphTable},
    text::layout,
};

/// One string to draw: baseline position in screen pixels (origin bottom
/// left), uniform scale and colour.
#[derive(Debug, Clone)]
pub struct TextBlock {
    pub text: String,
    pub position: [f32; 2],
    pub scale: f32,
    pub colour: [f32; 3],
}

/// Presentation policy for long blocks: wrap at spaces once a line would
/// pass `width_fraction` of the viewport, dropping down by
/// `line_drop_fraction` of the viewport height per line.
#[derive(Debug, Clone, Copy)]
pub struct WrapPolicy {
    pub width_fraction: f32,
    pub line_drop_fraction: f32,
}

impl Default for WrapPolicy {
    fn default() -> Self {
        Self {
            width_fraction: 0.9,
            line_drop_fraction: 0.05,
        }
    }
}

const QUAD_BYTES: wgpu::BufferAddress = (6 * std::mem::size_of::<TextVertex>()) as wgpu::BufferAddress;
const INITIAL_QUAD_CAPACITY: usize = 512;
/// Uniform slots available per frame; more blocks than this are dropped.
const MAX_BLOCKS: usize = 16;

struct PreparedQuad {
    code: u8,
    vertex_offset: wgpu::BufferAddress,
}

struct PreparedBlock {
    uniform_offset: u32,
    quads: Vec<PreparedQuad>,
}

/// Renders strings as screen-space glyph quads.
pub struct TextRenderer {
    glyphs: GlyphSet,
    #[allow(unused)]
    sampler: wgpu::Sampler,
    vertex_buffer: wgpu::Buffer,
    quad_capacity: usize,
    uniform_buffer: wgpu::Buffer,
    block_group: wgpu::BindGroup,
    prepared: Vec<PreparedBlock>,
    pub wrap: WrapPolicy,
}

impl TextRenderer {
    /// Build the renderer: rasterize and upload the glyph set, allocate the
    /// shared quad buffer and the block uniform slots.
    ///
    /// A font that cannot be parsed fails construction; the caller should
    /// surface the error and refuse to start.
    pub async fn new(init: &InitContext, font_bytes: &[u8], px: f32) -> Result<Self, GlyphError> {
        let device = &init.device;
        let glyph_layout = mk_glyph_layout(device);
        let sampler = mk_glyph_sampler(device);
        let glyphs =
            GlyphSet::load(device, &init.queue, &glyph_layout, &sampler, font_bytes, px).await?;

        let vertex_buffer = mk_vertex_buffer(device, INITIAL_QUAD_CAPACITY);

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Text Uniform Buffer"),
            size: MAX_BLOCKS as wgpu::BufferAddress * BLOCK_UNIFORM_STRIDE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let block_layout = mk_block_layout(device);
        let block_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &block_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &uniform_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<TextUniform>() as u64),
                }),
            }],
            label: Some("text_block_bind_group"),
        });

        Ok(Self {
            glyphs,
            sampler,
            vertex_buffer,
            quad_capacity: INITIAL_QUAD_CAPACITY,
            uniform_buffer,
            block_group,
            prepared: Vec::new(),
            wrap: WrapPolicy::default(),
        })
    }

    pub fn table(&self) -> &GlyphTable {
        self.glyphs.table()
    }

    /// Lay out the frame's text blocks and write quads plus uniforms.
    ///
    /// Replaces whatever the previous frame prepared. Call once per frame
    /// before the render pass is recorded.
    pub fn prepare(&mut self, ctx: &Context, blocks: &[TextBlock]) {
        let width = ctx.config.width as f32;
        let height = ctx.config.height as f32;
        let clip_from_screen: [[f32; 4]; 4] =
            (OPENGL_TO_WGPU_MATRIX * ortho_matrix(width, height)).into();

        if blocks.len() > MAX_BLOCKS {
            log::warn!(
                "{} text blocks queued, only the first {MAX_BLOCKS} will be drawn",
                blocks.len()
            );
        }

        let mut vertices: Vec<TextVertex> = Vec::new();
        let mut prepared = Vec::new();
        for (index, block) in blocks.iter().take(MAX_BLOCKS).enumerate() {
            let max_line = width * self.wrap.width_fraction - block.position[0];
            let lines = layout::wrap_words(self.glyphs.table(), &block.text, block.scale, max_line);
            let line_drop = height * self.wrap.line_drop_fraction * block.scale;

            let mut quads = Vec::new();
            for (row, line) in lines.iter().enumerate() {
                let origin = [
                    block.position[0],
                    block.position[1] - row as f32 * line_drop,
                ];
                let (line_quads, _) =
                    layout::layout_line(self.glyphs.table(), line, origin, block.scale);
                for quad in line_quads {
                    let vertex_offset = (vertices.len() / 6) as wgpu::BufferAddress * QUAD_BYTES;
                    vertices.extend(quad.vertices.iter().map(|&[x, y, u, v]| TextVertex {
                        position: [x, y],
                        tex_coords: [u, v],
                    }));
                    quads.push(PreparedQuad {
                        code: quad.code,
                        vertex_offset,
                    });
                }
            }

            let uniform_offset = index as wgpu::BufferAddress * BLOCK_UNIFORM_STRIDE;
            let uniform = TextUniform {
                clip_from_screen,
                colour: [block.colour[0], block.colour[1], block.colour[2], 1.0],
            };
            ctx.queue.write_buffer(
                &self.uniform_buffer,
                uniform_offset,
                bytemuck::bytes_of(&uniform),
            );
            prepared.push(PreparedBlock {
                uniform_offset: uniform_offset as u32,
                quads,
            });
        }

        let quad_count = vertices.len() / 6;
        if quad_count > self.quad_capacity {
            let mut capacity = self.quad_capacity;
            while capacity < quad_count {
                capacity *= 2;
            }
            log::debug!("growing text quad buffer from {} to {capacity} quads", self.quad_capacity);
            self.vertex_buffer = mk_vertex_buffer(&ctx.device, capacity);
            self.quad_capacity = capacity;
        }
        if !vertices.is_empty() {
            ctx.queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
        }
        self.prepared = prepared;
    }

    /// Record the prepared blocks: one draw call per glyph quad.
    ///
    /// The caller has already set the text pipeline on the pass; this only
    /// binds per-block uniforms and per-glyph textures.
    pub fn draw<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        for block in &self.prepared {
            render_pass.set_bind_group(0, &self.block_group, &[block.uniform_offset]);
            for quad in &block.quads {
                let Some(group) = self.glyphs.group(quad.code) else {
                    continue;
                };
                render_pass.set_bind_group(1, group, &[]);
                render_pass.set_vertex_buffer(
                    0,
                    self.vertex_buffer
                        .slice(quad.vertex_offset..quad.vertex_offset + QUAD_BYTES),
                );
                render_pass.draw(0..6, 0..1);
            }
        }
    }
}

fn mk_vertex_buffer(device: &wgpu::Device, quads: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Text Quad Buffer"),
        size: quads as wgpu::BufferAddress * QUAD_BYTES,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn ortho_matrix(width: f32, height: f32) -> Matrix4<f32> {
    cgmath::ortho(0.0, width, 0.0, height, -1.0, 1.0)
}
