//! Opaque renderer handles and per-draw render state.
//!
//! The geometry core never owns GPU objects. Shaders and textures are plain
//! ids minted by the renderer; the core only carries them into batches.

use crate::error::GeometryError;

/// Renderer-side shader program id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ShaderHandle(pub u32);

/// Renderer-side texture id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Textures a single geometry may bind.
pub const MAX_TEXTURES: usize = 4;

/// Up to [`MAX_TEXTURES`] texture attachments, in bind order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureSlots {
    slots: [Option<TextureHandle>; MAX_TEXTURES],
    len: usize,
}

impl TextureSlots {
    /// Binds `texture` to the next free slot. When all slots are taken the
    /// existing attachments are left as they are.
    pub fn attach(&mut self, texture: TextureHandle) -> Result<(), GeometryError> {
        if self.len == MAX_TEXTURES {
            return Err(GeometryError::TooManyTextures { max: MAX_TEXTURES });
        }
        self.slots[self.len] = Some(texture);
        self.len += 1;
        Ok(())
    }

    pub fn get(&self, slot: usize) -> Option<TextureHandle> {
        self.slots.get(slot).copied().flatten()
    }

    pub fn iter(&self) -> impl Iterator<Item = TextureHandle> + '_ {
        self.slots.iter().flatten().copied()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Colour blending applied when the batch is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    #[default]
    Opaque,
    Alpha,
    Additive,
}

impl BlendMode {
    /// `None` means blending disabled.
    pub fn to_wgpu(self) -> Option<wgpu::BlendState> {
        match self {
            BlendMode::Opaque => None,
            BlendMode::Alpha => Some(wgpu::BlendState::ALPHA_BLENDING),
            BlendMode::Additive => Some(wgpu::BlendState {
                color: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::SrcAlpha,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
                alpha: wgpu::BlendComponent::OVER,
            }),
        }
    }
}

/// Fixed-function state captured with each batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderState {
    pub blend: BlendMode,
    pub depth_test: bool,
    pub depth_write: bool,
    pub cull_back_faces: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            blend: BlendMode::Opaque,
            depth_test: true,
            depth_write: true,
            cull_back_faces: false,
        }
    }
}

impl RenderState {
    pub fn cull_mode(&self) -> Option<wgpu::Face> {
        self.cull_back_faces.then_some(wgpu::Face::Back)
    }

    pub fn depth_compare(&self) -> wgpu::CompareFunction {
        if self.depth_test {
            wgpu::CompareFunction::Less
        } else {
            wgpu::CompareFunction::Always
        }
    }
}

/// Shader plus render state; everything a batch needs besides geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Material {
    pub shader: ShaderHandle,
    pub state: RenderState,
}

impl Material {
    pub fn new(shader: ShaderHandle) -> Self {
        Self {
            shader,
            state: RenderState::default(),
        }
    }

    pub fn with_state(mut self, state: RenderState) -> Self {
        self.state = state;
        self
    }
}
