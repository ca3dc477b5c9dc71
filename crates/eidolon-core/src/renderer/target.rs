// Copyright 2026 the eidolon authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Drawing surfaces: the default on-screen target and off-screen
//! framebuffers.

use std::rc::Rc;

use glam::{Mat4, Vec4};

use crate::renderer::api::{
    FramebufferHandle, RenderbufferHandle, TextureOptions, UniqueHandle, Vertex,
    POSITION_ATTRIBUTE, TEXTURE_ATTRIBUTE,
};
use crate::renderer::error::{FramebufferError, ResourceError};
use crate::renderer::program::{
    ShaderProgram, COLOR_UNIFORM, PROJECTION_UNIFORM, TEXTURE_UNIFORM, VIEW_UNIFORM,
};
use crate::renderer::sprite::Sprite;
use crate::renderer::texture::Texture;
use crate::renderer::traits::GraphicsDevice;

/// Per-draw inputs consumed as already-constructed values: the view transform
/// applied to the sprite's object space and the color modulating its texels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawState {
    /// Transform from sprite object space into target pixel space.
    pub view: Mat4,
    /// Color multiplied with the sampled texel.
    pub color: Vec4,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            view: Mat4::IDENTITY,
            color: Vec4::ONE,
        }
    }
}

/// The capability of being the destination of a draw call.
///
/// A target exposes a pixel size and a projection appropriate to that size.
/// The two variants are the default on-screen surface ([`Screen`]) and an
/// off-screen [`Framebuffer`].
pub trait RenderTarget {
    /// The device draw calls are issued on.
    fn device(&self) -> &Rc<dyn GraphicsDevice>;

    /// The framebuffer bound before drawing; `None` is the default on-screen
    /// framebuffer.
    fn framebuffer_handle(&self) -> Option<FramebufferHandle>;

    /// Pixel size of the drawable area.
    fn size(&self) -> (u32, u32);

    /// An orthographic projection mapping the target's pixel space (origin
    /// top-left, y down) onto clip space.
    fn projection(&self) -> Mat4 {
        let (width, height) = self.size();
        Mat4::orthographic_rh_gl(0.0, width as f32, height as f32, 0.0, -1.0, 1.0)
    }

    /// Makes this target the destination of subsequent draw calls and sizes
    /// the viewport to it.
    fn bind(&self) {
        let device = self.device();
        device.bind_framebuffer(self.framebuffer_handle());
        let (width, height) = self.size();
        device.set_viewport(0, 0, width as i32, height as i32);
    }

    /// Clears the whole target to `color`.
    fn clear(&self, color: Vec4) {
        self.bind();
        self.device().clear(color.to_array());
    }

    /// Draws `sprite` into this target through `program`.
    ///
    /// Binds the target, the program, the sprite's texture (unit zero) and
    /// vertex buffer, configures the two sprite attributes, uploads the
    /// standard uniforms ([`PROJECTION_UNIFORM`], [`VIEW_UNIFORM`],
    /// [`COLOR_UNIFORM`], [`TEXTURE_UNIFORM`]), then issues the triangle
    /// draw. Programs using other names simply receive no-op uploads for the
    /// standard ones.
    fn draw(&self, program: &ShaderProgram, sprite: &Sprite<'_>, state: &DrawState) {
        self.bind();
        program.bind();
        sprite.texture().bind();

        let vertices = sprite.vertex_array();
        vertices.bind();
        program.set_attribute(POSITION_ATTRIBUTE, 2, Vertex::STRIDE, Vertex::POSITION_OFFSET);
        program.set_attribute(TEXTURE_ATTRIBUTE, 2, Vertex::STRIDE, Vertex::TEXTURE_OFFSET);

        program.set_uniform(PROJECTION_UNIFORM, self.projection());
        program.set_uniform(VIEW_UNIFORM, state.view);
        program.set_uniform(COLOR_UNIFORM, state.color);
        program.set_uniform(TEXTURE_UNIFORM, 0i32);

        self.device().draw_triangles(0, vertices.len() as i32);
    }
}

/// The default on-screen render target.
///
/// The surface itself belongs to the windowing collaborator; this type only
/// tracks its pixel size so projections and viewports can be derived.
#[derive(Debug)]
pub struct Screen {
    device: Rc<dyn GraphicsDevice>,
    width: u32,
    height: u32,
}

impl Screen {
    /// Wraps the default framebuffer of `device` at the given pixel size.
    pub fn new(device: &Rc<dyn GraphicsDevice>, width: u32, height: u32) -> Self {
        Self {
            device: Rc::clone(device),
            width,
            height,
        }
    }

    /// Tracks a resize of the underlying surface.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

impl RenderTarget for Screen {
    fn device(&self) -> &Rc<dyn GraphicsDevice> {
        &self.device
    }

    fn framebuffer_handle(&self) -> Option<FramebufferHandle> {
        None
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// An off-screen drawable area backed by a color texture and a depth/stencil
/// render buffer. The color output can be sampled again through
/// [`Sprite::from_framebuffer`].
///
/// Move-only: duplicating a framebuffer would require duplicating GPU-side
/// storage, so copying is a compile-time error. The color texture's lifetime
/// is tied to the framebuffer unless explicitly moved out with
/// [`Framebuffer::into_color_texture`].
#[derive(Debug)]
pub struct Framebuffer {
    framebuffer: UniqueHandle<FramebufferHandle>,
    renderbuffer: UniqueHandle<RenderbufferHandle>,
    color_texture: Texture,
    width: u32,
    height: u32,
}

fn release_framebuffer(device: &dyn GraphicsDevice, handle: FramebufferHandle) {
    device.delete_framebuffer(handle);
}

fn release_renderbuffer(device: &dyn GraphicsDevice, handle: RenderbufferHandle) {
    device.delete_renderbuffer(handle);
}

impl Framebuffer {
    /// Allocates a `width * height` off-screen target: a color texture plus
    /// a depth/stencil render buffer, attached and validated for
    /// completeness.
    ///
    /// An incomplete target is an error, not a crash; every resource
    /// allocated up to that point is released before returning.
    pub fn new(
        device: &Rc<dyn GraphicsDevice>,
        width: u32,
        height: u32,
    ) -> Result<Self, ResourceError> {
        let color_texture = Texture::empty(device, width, height, TextureOptions::default())?;

        let framebuffer = device.create_framebuffer()?;
        let framebuffer = UniqueHandle::new(Rc::clone(device), framebuffer, release_framebuffer);

        let renderbuffer = device.create_renderbuffer(width, height)?;
        let renderbuffer =
            UniqueHandle::new(Rc::clone(device), renderbuffer, release_renderbuffer);

        device.bind_framebuffer(Some(framebuffer.get()));
        device.attach_color_texture(color_texture.handle());
        device.attach_depth_stencil_renderbuffer(renderbuffer.get());
        let complete = device.framebuffer_complete();
        device.bind_framebuffer(None);

        if !complete {
            log::error!("framebuffer of size {width}x{height} is incomplete");
            return Err(FramebufferError::Incomplete { width, height }.into());
        }

        Ok(Self {
            framebuffer,
            renderbuffer,
            color_texture,
            width,
            height,
        })
    }

    /// The texture receiving this target's color output.
    #[inline]
    pub fn color_texture(&self) -> &Texture {
        &self.color_texture
    }

    /// Consumes the framebuffer, releasing its draw surface while keeping the
    /// color output alive as an ordinary texture.
    pub fn into_color_texture(self) -> Texture {
        let Self { color_texture, .. } = self;
        color_texture
    }
}

impl RenderTarget for Framebuffer {
    fn device(&self) -> &Rc<dyn GraphicsDevice> {
        self.framebuffer.device()
    }

    fn framebuffer_handle(&self) -> Option<FramebufferHandle> {
        Some(self.framebuffer.get())
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
