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

use std::fmt::Debug;

use crate::renderer::api::{
    AttributeKind, AttributeLocation, BufferHandle, FramebufferHandle, ProgramHandle,
    RenderbufferHandle, ShaderHandle, ShaderStage, TextureHandle, TextureOptions, UniformLocation,
};
use crate::renderer::error::{ResourceError, ShaderError};

/// The immediate-mode contract between the rendering core and one graphics
/// backend.
///
/// Every method issues its driver calls synchronously on the calling thread
/// and returns only once the driver call returns. The trait is deliberately
/// not `Send`/`Sync`: a graphics context is bound to one thread, and the
/// caller must uphold that no two threads touch the same context. Wrappers
/// share a device through `Rc<dyn GraphicsDevice>`.
///
/// Stateful operations (`attach_color_texture`, `upload_array_buffer`, ...)
/// act on the most recently bound object of the matching kind, following the
/// binding model of the underlying graphics API.
pub trait GraphicsDevice: Debug {
    // --- Shader Operations ---

    /// Compiles `source` as a shader of the given stage.
    /// ## Returns
    /// The handle of the compiled shader, or [`ShaderError::Compilation`]
    /// carrying the compiler's diagnostic log.
    fn compile_shader(&self, stage: ShaderStage, source: &str)
        -> Result<ShaderHandle, ShaderError>;

    /// Releases a compiled shader.
    fn delete_shader(&self, shader: ShaderHandle);

    // --- Program Operations ---

    /// Creates an empty program object.
    fn create_program(&self) -> Result<ProgramHandle, ShaderError>;

    /// Attaches a compiled shader to a program prior to linking.
    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle);

    /// Links the attached shaders into an executable pipeline.
    /// ## Returns
    /// `Ok(())` on success, or [`ShaderError::Link`] carrying the linker's
    /// diagnostic log.
    fn link_program(&self, program: ProgramHandle) -> Result<(), ShaderError>;

    /// Releases a program object.
    fn delete_program(&self, program: ProgramHandle);

    /// Binds `program` as the active pipeline; `None` binds program zero.
    fn use_program(&self, program: Option<ProgramHandle>);

    /// Resolves a uniform location by name. `None` means the name is not an
    /// active uniform of the program.
    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation>;

    /// Resolves a vertex attribute location by name.
    fn attribute_location(&self, program: ProgramHandle, name: &str) -> Option<AttributeLocation>;

    /// Enables an attribute and points it into the currently bound vertex
    /// buffer.
    /// ## Arguments
    /// * `components` - Number of components per vertex. One of {1,2,3,4}.
    /// * `kind` - The element type of each component.
    /// * `normalized` - Whether integer data is normalized into `[0, 1]`.
    /// * `stride` - Byte distance between consecutive vertices.
    /// * `offset` - Byte offset of the attribute inside the vertex.
    fn configure_attribute(
        &self,
        location: AttributeLocation,
        components: i32,
        kind: AttributeKind,
        normalized: bool,
        stride: i32,
        offset: i32,
    );

    // --- Uniform Uploads ---
    //
    // Each call maps to exactly one driver upload for that shape. A `None`
    // location is accepted and is a driver-level no-op, so lookup misses do
    // not need special casing in callers.

    /// Uploads a scalar float uniform.
    fn set_uniform_f32(&self, location: Option<UniformLocation>, value: f32);

    /// Uploads a scalar integer (or sampler unit) uniform.
    fn set_uniform_i32(&self, location: Option<UniformLocation>, value: i32);

    /// Uploads a 3-component vector uniform.
    fn set_uniform_vec3(&self, location: Option<UniformLocation>, value: &[f32; 3]);

    /// Uploads a 4-component vector uniform.
    fn set_uniform_vec4(&self, location: Option<UniformLocation>, value: &[f32; 4]);

    /// Uploads a 3x3 matrix uniform, column-major.
    fn set_uniform_mat3(&self, location: Option<UniformLocation>, value: &[f32; 9]);

    /// Uploads a 4x4 matrix uniform, column-major.
    fn set_uniform_mat4(&self, location: Option<UniformLocation>, value: &[f32; 16]);

    // --- Texture Operations ---

    /// Creates a 2D RGBA8 texture of `width * height` pixels.
    ///
    /// `pixels` is tightly packed row-major RGBA data, or `None` to allocate
    /// uninitialized storage (e.g. for a render target's color attachment).
    fn create_texture(
        &self,
        width: u32,
        height: u32,
        pixels: Option<&[u8]>,
        options: &TextureOptions,
    ) -> Result<TextureHandle, ResourceError>;

    /// Releases a texture.
    fn delete_texture(&self, texture: TextureHandle);

    /// Binds `texture` for sampling on texture unit zero.
    fn bind_texture(&self, texture: Option<TextureHandle>);

    // --- Buffer Operations ---

    /// Creates an empty GPU buffer.
    fn create_buffer(&self) -> Result<BufferHandle, ResourceError>;

    /// Releases a buffer.
    fn delete_buffer(&self, buffer: BufferHandle);

    /// Binds `buffer` as the active vertex array buffer.
    fn bind_array_buffer(&self, buffer: Option<BufferHandle>);

    /// Uploads `data` into the currently bound array buffer (dynamic-draw
    /// usage hint).
    fn upload_array_buffer(&self, data: &[u8]);

    // --- Framebuffer Operations ---

    /// Creates an off-screen framebuffer object.
    fn create_framebuffer(&self) -> Result<FramebufferHandle, ResourceError>;

    /// Releases a framebuffer object.
    fn delete_framebuffer(&self, framebuffer: FramebufferHandle);

    /// Binds a framebuffer as the draw target; `None` binds the default
    /// on-screen framebuffer.
    fn bind_framebuffer(&self, framebuffer: Option<FramebufferHandle>);

    /// Attaches `texture` as the color attachment of the currently bound
    /// framebuffer.
    fn attach_color_texture(&self, texture: TextureHandle);

    /// Creates a combined depth/stencil render buffer of the given pixel size.
    fn create_renderbuffer(&self, width: u32, height: u32)
        -> Result<RenderbufferHandle, ResourceError>;

    /// Releases a render buffer.
    fn delete_renderbuffer(&self, renderbuffer: RenderbufferHandle);

    /// Attaches `renderbuffer` as the depth/stencil attachment of the
    /// currently bound framebuffer.
    fn attach_depth_stencil_renderbuffer(&self, renderbuffer: RenderbufferHandle);

    /// Reports whether the currently bound framebuffer is complete and
    /// drawable.
    fn framebuffer_complete(&self) -> bool;

    // --- Draw Operations ---

    /// Sets the viewport rectangle of the current draw target, in pixels.
    fn set_viewport(&self, x: i32, y: i32, width: i32, height: i32);

    /// Clears the color, depth and stencil planes of the current draw target.
    fn clear(&self, color: [f32; 4]);

    /// Draws `count` vertices from the bound vertex buffer as triangles,
    /// starting at vertex `first`.
    fn draw_triangles(&self, first: i32, count: i32);
}
