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

use std::fmt;

use eidolon_core::renderer::{
    AttributeKind, AttributeLocation, BufferHandle, FramebufferHandle, GraphicsDevice,
    ProgramHandle, RenderbufferHandle, ResourceError, ShaderError, ShaderHandle, ShaderStage,
    TextureHandle, TextureOptions, UniformLocation,
};
use glow::HasContext;

use crate::conversions::{
    buffer_handle, framebuffer_handle, program_handle, renderbuffer_handle, shader_handle,
    texture_handle, IntoGlow,
};

/// The OpenGL graphics device.
///
/// Wraps a current [`glow::Context`] and issues every call synchronously on
/// the calling thread. One vertex array object is created up front and stays
/// bound for the lifetime of the device: core profiles refuse attribute
/// pointers without one, and attribute setup happens per draw call, so a
/// single shared VAO is all the binding state this renderer needs.
pub struct GlowDevice {
    gl: glow::Context,
    vertex_array: glow::NativeVertexArray,
}

impl GlowDevice {
    /// Wraps an already-current GL context.
    pub fn new(gl: glow::Context) -> Result<Self, ResourceError> {
        let vertex_array = unsafe { gl.create_vertex_array() }.map_err(ResourceError::Backend)?;
        unsafe { gl.bind_vertex_array(Some(vertex_array)) };
        log::debug!("GlowDevice: created the shared vertex array object");
        Ok(Self { gl, vertex_array })
    }

    /// The wrapped GL context, for interop with code outside this crate.
    pub fn context(&self) -> &glow::Context {
        &self.gl
    }
}

impl Drop for GlowDevice {
    fn drop(&mut self) {
        unsafe { self.gl.delete_vertex_array(self.vertex_array) };
    }
}

impl fmt::Debug for GlowDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlowDevice").finish_non_exhaustive()
    }
}

impl GraphicsDevice for GlowDevice {
    // --- Shader Operations ---

    fn compile_shader(
        &self,
        stage: ShaderStage,
        source: &str,
    ) -> Result<ShaderHandle, ShaderError> {
        unsafe {
            let shader = self
                .gl
                .create_shader(stage.into_glow())
                .map_err(|details| ShaderError::Creation { details })?;
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);

            if !self.gl.get_shader_compile_status(shader) {
                let details = self.gl.get_shader_info_log(shader);
                self.gl.delete_shader(shader);
                log::error!("{stage} shader compilation failed:\n{details}");
                return Err(ShaderError::Compilation { stage, details });
            }

            log::debug!("GlowDevice: compiled {stage} shader {:?}", shader.0);
            Ok(shader_handle(shader))
        }
    }

    fn delete_shader(&self, shader: ShaderHandle) {
        unsafe { self.gl.delete_shader(shader.into_glow()) };
    }

    // --- Program Operations ---

    fn create_program(&self) -> Result<ProgramHandle, ShaderError> {
        let program = unsafe { self.gl.create_program() }
            .map_err(|details| ShaderError::Creation { details })?;
        Ok(program_handle(program))
    }

    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        unsafe {
            self.gl
                .attach_shader(program.into_glow(), shader.into_glow())
        };
    }

    fn link_program(&self, program: ProgramHandle) -> Result<(), ShaderError> {
        unsafe {
            let native = program.into_glow();
            self.gl.link_program(native);
            if !self.gl.get_program_link_status(native) {
                let details = self.gl.get_program_info_log(native);
                log::error!("shader program linking failed:\n{details}");
                return Err(ShaderError::Link { details });
            }
        }
        Ok(())
    }

    fn delete_program(&self, program: ProgramHandle) {
        unsafe { self.gl.delete_program(program.into_glow()) };
    }

    fn use_program(&self, program: Option<ProgramHandle>) {
        unsafe { self.gl.use_program(program.map(IntoGlow::into_glow)) };
    }

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        unsafe {
            self.gl
                .get_uniform_location(program.into_glow(), name)
                .map(|location| UniformLocation(location.0))
        }
    }

    fn attribute_location(&self, program: ProgramHandle, name: &str) -> Option<AttributeLocation> {
        unsafe {
            self.gl
                .get_attrib_location(program.into_glow(), name)
                .map(AttributeLocation)
        }
    }

    fn configure_attribute(
        &self,
        location: AttributeLocation,
        components: i32,
        kind: AttributeKind,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        unsafe {
            self.gl.enable_vertex_attrib_array(location.0);
            self.gl.vertex_attrib_pointer_f32(
                location.0,
                components,
                kind.into_glow(),
                normalized,
                stride,
                offset,
            );
        }
    }

    // --- Uniform Uploads ---

    fn set_uniform_f32(&self, location: Option<UniformLocation>, value: f32) {
        let native = location.map(IntoGlow::into_glow);
        unsafe { self.gl.uniform_1_f32(native.as_ref(), value) };
    }

    fn set_uniform_i32(&self, location: Option<UniformLocation>, value: i32) {
        let native = location.map(IntoGlow::into_glow);
        unsafe { self.gl.uniform_1_i32(native.as_ref(), value) };
    }

    fn set_uniform_vec3(&self, location: Option<UniformLocation>, value: &[f32; 3]) {
        let native = location.map(IntoGlow::into_glow);
        unsafe { self.gl.uniform_3_f32_slice(native.as_ref(), value) };
    }

    fn set_uniform_vec4(&self, location: Option<UniformLocation>, value: &[f32; 4]) {
        let native = location.map(IntoGlow::into_glow);
        unsafe { self.gl.uniform_4_f32_slice(native.as_ref(), value) };
    }

    fn set_uniform_mat3(&self, location: Option<UniformLocation>, value: &[f32; 9]) {
        let native = location.map(IntoGlow::into_glow);
        unsafe {
            self.gl
                .uniform_matrix_3_f32_slice(native.as_ref(), false, value)
        };
    }

    fn set_uniform_mat4(&self, location: Option<UniformLocation>, value: &[f32; 16]) {
        let native = location.map(IntoGlow::into_glow);
        unsafe {
            self.gl
                .uniform_matrix_4_f32_slice(native.as_ref(), false, value)
        };
    }

    // --- Texture Operations ---

    fn create_texture(
        &self,
        width: u32,
        height: u32,
        pixels: Option<&[u8]>,
        options: &TextureOptions,
    ) -> Result<TextureHandle, ResourceError> {
        unsafe {
            let texture = self.gl.create_texture().map_err(ResourceError::Backend)?;
            self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(pixels),
            );
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                options.min_filter.into_glow(),
            );
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                options.mag_filter.into_glow(),
            );
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                options.wrap.into_glow(),
            );
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                options.wrap.into_glow(),
            );

            log::debug!("GlowDevice: created {width}x{height} texture {:?}", texture.0);
            Ok(texture_handle(texture))
        }
    }

    fn delete_texture(&self, texture: TextureHandle) {
        unsafe { self.gl.delete_texture(texture.into_glow()) };
    }

    fn bind_texture(&self, texture: Option<TextureHandle>) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0);
            self.gl
                .bind_texture(glow::TEXTURE_2D, texture.map(IntoGlow::into_glow));
        }
    }

    // --- Buffer Operations ---

    fn create_buffer(&self) -> Result<BufferHandle, ResourceError> {
        let buffer = unsafe { self.gl.create_buffer() }.map_err(ResourceError::Backend)?;
        Ok(buffer_handle(buffer))
    }

    fn delete_buffer(&self, buffer: BufferHandle) {
        unsafe { self.gl.delete_buffer(buffer.into_glow()) };
    }

    fn bind_array_buffer(&self, buffer: Option<BufferHandle>) {
        unsafe {
            self.gl
                .bind_buffer(glow::ARRAY_BUFFER, buffer.map(IntoGlow::into_glow))
        };
    }

    fn upload_array_buffer(&self, data: &[u8]) {
        unsafe {
            self.gl
                .buffer_data_u8_slice(glow::ARRAY_BUFFER, data, glow::DYNAMIC_DRAW)
        };
    }

    // --- Framebuffer Operations ---

    fn create_framebuffer(&self) -> Result<FramebufferHandle, ResourceError> {
        let framebuffer =
            unsafe { self.gl.create_framebuffer() }.map_err(ResourceError::Backend)?;
        log::debug!("GlowDevice: created framebuffer {:?}", framebuffer.0);
        Ok(framebuffer_handle(framebuffer))
    }

    fn delete_framebuffer(&self, framebuffer: FramebufferHandle) {
        unsafe { self.gl.delete_framebuffer(framebuffer.into_glow()) };
    }

    fn bind_framebuffer(&self, framebuffer: Option<FramebufferHandle>) {
        unsafe {
            self.gl
                .bind_framebuffer(glow::FRAMEBUFFER, framebuffer.map(IntoGlow::into_glow))
        };
    }

    fn attach_color_texture(&self, texture: TextureHandle) {
        unsafe {
            self.gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::TEXTURE_2D,
                Some(texture.into_glow()),
                0,
            )
        };
    }

    fn create_renderbuffer(
        &self,
        width: u32,
        height: u32,
    ) -> Result<RenderbufferHandle, ResourceError> {
        unsafe {
            let renderbuffer = self
                .gl
                .create_renderbuffer()
                .map_err(ResourceError::Backend)?;
            self.gl
                .bind_renderbuffer(glow::RENDERBUFFER, Some(renderbuffer));
            self.gl.renderbuffer_storage(
                glow::RENDERBUFFER,
                glow::DEPTH24_STENCIL8,
                width as i32,
                height as i32,
            );
            self.gl.bind_renderbuffer(glow::RENDERBUFFER, None);
            Ok(renderbuffer_handle(renderbuffer))
        }
    }

    fn delete_renderbuffer(&self, renderbuffer: RenderbufferHandle) {
        unsafe { self.gl.delete_renderbuffer(renderbuffer.into_glow()) };
    }

    fn attach_depth_stencil_renderbuffer(&self, renderbuffer: RenderbufferHandle) {
        unsafe {
            self.gl.framebuffer_renderbuffer(
                glow::FRAMEBUFFER,
                glow::DEPTH_STENCIL_ATTACHMENT,
                glow::RENDERBUFFER,
                Some(renderbuffer.into_glow()),
            )
        };
    }

    fn framebuffer_complete(&self) -> bool {
        let status = unsafe { self.gl.check_framebuffer_status(glow::FRAMEBUFFER) };
        status == glow::FRAMEBUFFER_COMPLETE
    }

    // --- Draw Operations ---

    fn set_viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.viewport(x, y, width, height) };
    }

    fn clear(&self, color: [f32; 4]) {
        unsafe {
            self.gl
                .clear_color(color[0], color[1], color[2], color[3]);
            self.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT | glow::STENCIL_BUFFER_BIT);
        }
    }

    fn draw_triangles(&self, first: i32, count: i32) {
        unsafe { self.gl.draw_arrays(glow::TRIANGLES, first, count) };
    }
}
