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

//! Sprites: textured two-triangle quads built from pixel-space rectangles.

use crate::math::Rectangle;
use crate::renderer::api::{Vertex, VertexArray};
use crate::renderer::error::ResourceError;
use crate::renderer::target::Framebuffer;
use crate::renderer::texture::Texture;

/// A textured quad ready to be drawn through a
/// [`RenderTarget`](crate::renderer::RenderTarget).
///
/// A sprite borrows its texture — it reads the dimensions and binds the
/// sampler for drawing but never releases the GPU resource — and owns the
/// six-vertex geometry derived from a pixel-space rectangle on that texture.
#[derive(Debug)]
pub struct Sprite<'t> {
    texture: &'t Texture,
    vertices: VertexArray,
}

impl<'t> Sprite<'t> {
    /// A sprite showing the whole of `texture`.
    pub fn new(texture: &'t Texture) -> Result<Self, ResourceError> {
        Self::with_rectangle(
            texture,
            Rectangle::from_size(texture.width() as f32, texture.height() as f32),
        )
    }

    /// A sprite showing only `rectangle` of `texture`.
    ///
    /// The rectangle may be degenerate (zero drawing area) or exceed the
    /// texture bounds (unspecified sampling, never an error).
    pub fn with_rectangle(texture: &'t Texture, rectangle: Rectangle) -> Result<Self, ResourceError> {
        let vertices = VertexArray::new(texture.device(), quad_vertices(texture, &rectangle))?;
        Ok(Self { texture, vertices })
    }

    /// A sprite sampling the entire color output of `framebuffer`.
    ///
    /// Render targets store their first rendered row at the opposite end of
    /// the image compared to directly uploaded textures, so the texture
    /// coordinates are flipped vertically relative to
    /// [`Sprite::with_rectangle`]; the framebuffer content then appears
    /// upright when drawn.
    pub fn from_framebuffer(framebuffer: &'t Framebuffer) -> Result<Self, ResourceError> {
        let texture = framebuffer.color_texture();
        let (l, r) = (0.0, 1.0);
        let (t, b) = (0.0, 1.0);
        let w = texture.width() as f32;
        let h = texture.height() as f32;
        let vertices = vec![
            Vertex::new(0.0, 0.0, l, b),
            Vertex::new(0.0, h, l, t),
            Vertex::new(w, h, r, t),
            Vertex::new(0.0, 0.0, l, b),
            Vertex::new(w, h, r, t),
            Vertex::new(w, 0.0, r, b),
        ];
        let vertices = VertexArray::new(texture.device(), vertices)?;
        Ok(Self { texture, vertices })
    }

    /// Recomputes the quad for a new pixel-space rectangle, replacing the
    /// geometry in place. The referenced texture is untouched.
    pub fn set_texture_rectangle(&mut self, rectangle: Rectangle) {
        self.vertices
            .replace(quad_vertices(self.texture, &rectangle));
    }

    /// The texture this sprite samples.
    #[inline]
    pub fn texture(&self) -> &Texture {
        self.texture
    }

    /// The quad geometry, in insertion (draw) order.
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        self.vertices.vertices()
    }

    /// The geometry and its GPU vertex buffer.
    #[inline]
    pub fn vertex_array(&self) -> &VertexArray {
        &self.vertices
    }
}

/// Maps a pixel-space rectangle to the six vertices of a sprite quad.
///
/// Texture coordinates are inset by half a texel on each edge: sample points
/// stay strictly inside the requested pixel rectangle, so bilinear filtering
/// never bleeds neighboring regions in when textures are packed in an atlas.
/// Winding is `(TL, BL, BR)` then `(TL, BR, TR)` and must stay consistent
/// with [`Sprite::from_framebuffer`].
fn quad_vertices(texture: &Texture, rectangle: &Rectangle) -> Vec<Vertex> {
    let l = (rectangle.left + 0.5) / texture.width() as f32;
    let r = (rectangle.right - 0.5) / texture.width() as f32;
    let t = (rectangle.top + 0.5) / texture.height() as f32;
    let b = (rectangle.bottom - 0.5) / texture.height() as f32;
    let w = rectangle.width();
    let h = rectangle.height();
    vec![
        Vertex::new(0.0, 0.0, l, t),
        Vertex::new(0.0, h, l, b),
        Vertex::new(w, h, r, b),
        Vertex::new(0.0, 0.0, l, t),
        Vertex::new(w, h, r, b),
        Vertex::new(w, 0.0, r, t),
    ]
}
