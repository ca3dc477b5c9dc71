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

//! The sprite vertex layout and the vertex sequence uploaded for drawing.

use std::rc::Rc;

use glam::Vec2;

use crate::renderer::api::handle::{BufferHandle, UniqueHandle};
use crate::renderer::error::ResourceError;
use crate::renderer::traits::GraphicsDevice;

/// Name of the object-space position attribute in every sprite shader.
pub const POSITION_ATTRIBUTE: &str = "space_position";

/// Name of the texture coordinate attribute in every sprite shader.
pub const TEXTURE_ATTRIBUTE: &str = "texture_position";

/// One vertex of drawable geometry: an object-space position and a normalized
/// texture coordinate in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Vertex {
    /// Position in local/object space.
    pub position: Vec2,
    /// Normalized texture coordinate.
    pub texture_coordinates: Vec2,
}

impl Vertex {
    /// Byte distance between two consecutive vertices in a buffer.
    pub const STRIDE: i32 = std::mem::size_of::<Vertex>() as i32;

    /// Byte offset of [`Vertex::position`] inside the vertex.
    pub const POSITION_OFFSET: i32 = 0;

    /// Byte offset of [`Vertex::texture_coordinates`] inside the vertex.
    pub const TEXTURE_OFFSET: i32 = std::mem::size_of::<Vec2>() as i32;

    /// Creates a vertex from position and texture coordinate components.
    #[inline]
    pub const fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            texture_coordinates: Vec2::new(u, v),
        }
    }
}

/// An ordered sequence of vertices describing drawable triangles, mirrored
/// into a GPU vertex buffer.
///
/// Insertion order defines the winding and draw order. The CPU-side copy is
/// kept so geometry can be inspected and rebuilt without a round trip to the
/// driver; the GPU buffer is uploaded at construction and re-uploaded in
/// place by [`VertexArray::replace`].
#[derive(Debug)]
pub struct VertexArray {
    vertices: Vec<Vertex>,
    buffer: UniqueHandle<BufferHandle>,
}

fn release_buffer(device: &dyn GraphicsDevice, handle: BufferHandle) {
    device.delete_buffer(handle);
}

impl VertexArray {
    /// Creates the GPU buffer and uploads `vertices` into it.
    pub fn new(
        device: &Rc<dyn GraphicsDevice>,
        vertices: Vec<Vertex>,
    ) -> Result<Self, ResourceError> {
        let buffer = device.create_buffer()?;
        let array = Self {
            vertices,
            buffer: UniqueHandle::new(Rc::clone(device), buffer, release_buffer),
        };
        array.upload();
        Ok(array)
    }

    /// Replaces the vertex sequence and re-uploads it into the same buffer.
    pub fn replace(&mut self, vertices: Vec<Vertex>) {
        self.vertices = vertices;
        self.upload();
    }

    /// Binds the vertex buffer as the active array buffer.
    pub fn bind(&self) {
        self.buffer
            .device()
            .bind_array_buffer(Some(self.buffer.get()));
    }

    /// The CPU-side copy of the uploaded vertices.
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Number of vertices in the sequence.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// `true` when the sequence holds no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    fn upload(&self) {
        let device = self.buffer.device();
        device.bind_array_buffer(Some(self.buffer.get()));
        device.upload_array_buffer(bytemuck::cast_slice(&self.vertices));
    }
}
