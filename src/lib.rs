//! tale-ngin
//!
//! A small interactive 3D story demo: a branching "choose your own
//! adventure" dialogue rendered through a glyph-based text pipeline. The
//! crate exposes the dialogue state machine, the glyph text renderer and the
//! thin host layer (context, camera, event loop) the demo binary runs on.
//!
//! High-level modules
//! - `camera`: camera types, controller and uniforms for view/projection
//! - `context`: central GPU and window context that owns device/queue/pipelines
//! - `data_structures`: GPU texture wrapper
//! - `dialogue`: branching story nodes and choice transitions
//! - `flow`: high level flow control (scenes / update loops)
//! - `pipelines`: render pipeline definitions (text)
//! - `render`: render composition consumed by the frame loop
//! - `resources`: helpers to load assets from disk
//! - `text`: glyph rasterization, layout and the quad renderer
//!

pub mod camera;
pub mod context;
pub mod data_structures;
pub mod dialogue;
pub mod flow;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod text;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use winit::event::DeviceEvent;
pub use winit::event::WindowEvent;
pub use winit::keyboard::KeyCode;
