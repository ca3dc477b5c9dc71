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

//! A call-recording [`GraphicsDevice`] for unit tests.
//!
//! Records every driver call in interior-mutable logs so tests can assert on
//! call counts (uniform cache hits, exactly-once releases) and call payloads
//! (compiled sources, upload shapes) without a live graphics context.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::num::NonZeroU32;

use crate::renderer::api::{
    AttributeKind, AttributeLocation, BufferHandle, FramebufferHandle, ProgramHandle,
    RenderbufferHandle, ShaderHandle, ShaderStage, TextureHandle, TextureOptions, UniformLocation,
};
use crate::renderer::error::{ResourceError, ShaderError};
use crate::renderer::traits::GraphicsDevice;

/// The shape of one recorded uniform upload.
#[derive(Debug, Clone, PartialEq)]
pub enum UniformUpload {
    /// Scalar float upload.
    F32(f32),
    /// Scalar integer upload.
    I32(i32),
    /// 3-vector upload.
    Vec3([f32; 3]),
    /// 4-vector upload.
    Vec4([f32; 4]),
    /// 3x3 matrix upload.
    Mat3([f32; 9]),
    /// 4x4 matrix upload.
    Mat4([f32; 16]),
}

/// A stub device that records every call instead of talking to a driver.
#[derive(Debug)]
pub struct RecordingDevice {
    next_handle: Cell<u32>,

    // Configurable behavior.
    pub fail_compile: Cell<bool>,
    pub fail_link: Cell<bool>,
    pub framebuffer_complete: Cell<bool>,
    uniforms: RefCell<HashMap<String, u32>>,
    attributes: RefCell<HashMap<String, u32>>,

    // Recorded calls.
    pub compiled_shaders: RefCell<Vec<(ShaderStage, String)>>,
    pub attached_shaders: RefCell<Vec<(ProgramHandle, ShaderHandle)>>,
    pub linked_programs: RefCell<Vec<ProgramHandle>>,
    pub used_programs: RefCell<Vec<Option<ProgramHandle>>>,
    pub uniform_queries: Cell<u32>,
    pub attribute_queries: Cell<u32>,
    pub configured_attributes:
        RefCell<Vec<(AttributeLocation, i32, AttributeKind, bool, i32, i32)>>,
    pub uniform_uploads: RefCell<Vec<(Option<UniformLocation>, UniformUpload)>>,
    pub created_textures: RefCell<Vec<(u32, u32, bool, TextureOptions)>>,
    pub bound_textures: RefCell<Vec<Option<TextureHandle>>>,
    pub created_buffers: Cell<u32>,
    pub bound_array_buffers: RefCell<Vec<Option<BufferHandle>>>,
    pub buffer_uploads: RefCell<Vec<Vec<u8>>>,
    pub bound_framebuffers: RefCell<Vec<Option<FramebufferHandle>>>,
    pub color_attachments: RefCell<Vec<TextureHandle>>,
    pub depth_stencil_attachments: RefCell<Vec<RenderbufferHandle>>,
    pub viewports: RefCell<Vec<(i32, i32, i32, i32)>>,
    pub clears: RefCell<Vec<[f32; 4]>>,
    pub draw_calls: RefCell<Vec<(i32, i32)>>,

    // Recorded releases, one entry per delete call.
    pub released_shaders: RefCell<Vec<ShaderHandle>>,
    pub released_programs: RefCell<Vec<ProgramHandle>>,
    pub released_textures: RefCell<Vec<TextureHandle>>,
    pub released_buffers: RefCell<Vec<BufferHandle>>,
    pub released_framebuffers: RefCell<Vec<FramebufferHandle>>,
    pub released_renderbuffers: RefCell<Vec<RenderbufferHandle>>,
}

impl Default for RecordingDevice {
    fn default() -> Self {
        Self {
            next_handle: Cell::new(0),
            fail_compile: Cell::new(false),
            fail_link: Cell::new(false),
            framebuffer_complete: Cell::new(true),
            uniforms: RefCell::new(HashMap::new()),
            attributes: RefCell::new(HashMap::new()),
            compiled_shaders: RefCell::new(Vec::new()),
            attached_shaders: RefCell::new(Vec::new()),
            linked_programs: RefCell::new(Vec::new()),
            used_programs: RefCell::new(Vec::new()),
            uniform_queries: Cell::new(0),
            attribute_queries: Cell::new(0),
            configured_attributes: RefCell::new(Vec::new()),
            uniform_uploads: RefCell::new(Vec::new()),
            created_textures: RefCell::new(Vec::new()),
            bound_textures: RefCell::new(Vec::new()),
            created_buffers: Cell::new(0),
            bound_array_buffers: RefCell::new(Vec::new()),
            buffer_uploads: RefCell::new(Vec::new()),
            bound_framebuffers: RefCell::new(Vec::new()),
            color_attachments: RefCell::new(Vec::new()),
            depth_stencil_attachments: RefCell::new(Vec::new()),
            viewports: RefCell::new(Vec::new()),
            clears: RefCell::new(Vec::new()),
            draw_calls: RefCell::new(Vec::new()),
            released_shaders: RefCell::new(Vec::new()),
            released_programs: RefCell::new(Vec::new()),
            released_textures: RefCell::new(Vec::new()),
            released_buffers: RefCell::new(Vec::new()),
            released_framebuffers: RefCell::new(Vec::new()),
            released_renderbuffers: RefCell::new(Vec::new()),
        }
    }
}

impl RecordingDevice {
    /// Declares `name` as an active uniform resolving to `location`.
    pub fn declare_uniform(&self, name: &str, location: u32) {
        self.uniforms.borrow_mut().insert(name.to_owned(), location);
    }

    /// Declares `name` as an active attribute resolving to `location`.
    pub fn declare_attribute(&self, name: &str, location: u32) {
        self.attributes
            .borrow_mut()
            .insert(name.to_owned(), location);
    }

    /// Number of declared uniforms, handy for allocating distinct locations.
    pub fn uniform_count(&self) -> u32 {
        self.uniforms.borrow().len() as u32
    }

    fn alloc(&self) -> NonZeroU32 {
        let next = self.next_handle.get() + 1;
        self.next_handle.set(next);
        NonZeroU32::new(next).expect("handle counter starts at one")
    }
}

impl GraphicsDevice for RecordingDevice {
    fn compile_shader(
        &self,
        stage: ShaderStage,
        source: &str,
    ) -> Result<ShaderHandle, ShaderError> {
        self.compiled_shaders
            .borrow_mut()
            .push((stage, source.to_owned()));
        if self.fail_compile.get() {
            return Err(ShaderError::Compilation {
                stage,
                details: "recorded compile failure".to_owned(),
            });
        }
        Ok(ShaderHandle(self.alloc()))
    }

    fn delete_shader(&self, shader: ShaderHandle) {
        self.released_shaders.borrow_mut().push(shader);
    }

    fn create_program(&self) -> Result<ProgramHandle, ShaderError> {
        Ok(ProgramHandle(self.alloc()))
    }

    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        self.attached_shaders.borrow_mut().push((program, shader));
    }

    fn link_program(&self, program: ProgramHandle) -> Result<(), ShaderError> {
        let attached = self
            .attached_shaders
            .borrow()
            .iter()
            .filter(|(p, _)| *p == program)
            .count();
        if self.fail_link.get() || attached == 0 {
            return Err(ShaderError::Link {
                details: "recorded link failure".to_owned(),
            });
        }
        self.linked_programs.borrow_mut().push(program);
        Ok(())
    }

    fn delete_program(&self, program: ProgramHandle) {
        self.released_programs.borrow_mut().push(program);
    }

    fn use_program(&self, program: Option<ProgramHandle>) {
        self.used_programs.borrow_mut().push(program);
    }

    fn uniform_location(&self, _program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        self.uniform_queries.set(self.uniform_queries.get() + 1);
        self.uniforms.borrow().get(name).map(|&l| UniformLocation(l))
    }

    fn attribute_location(&self, _program: ProgramHandle, name: &str) -> Option<AttributeLocation> {
        self.attribute_queries.set(self.attribute_queries.get() + 1);
        self.attributes
            .borrow()
            .get(name)
            .map(|&l| AttributeLocation(l))
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
        self.configured_attributes
            .borrow_mut()
            .push((location, components, kind, normalized, stride, offset));
    }

    fn set_uniform_f32(&self, location: Option<UniformLocation>, value: f32) {
        self.uniform_uploads
            .borrow_mut()
            .push((location, UniformUpload::F32(value)));
    }

    fn set_uniform_i32(&self, location: Option<UniformLocation>, value: i32) {
        self.uniform_uploads
            .borrow_mut()
            .push((location, UniformUpload::I32(value)));
    }

    fn set_uniform_vec3(&self, location: Option<UniformLocation>, value: &[f32; 3]) {
        self.uniform_uploads
            .borrow_mut()
            .push((location, UniformUpload::Vec3(*value)));
    }

    fn set_uniform_vec4(&self, location: Option<UniformLocation>, value: &[f32; 4]) {
        self.uniform_uploads
            .borrow_mut()
            .push((location, UniformUpload::Vec4(*value)));
    }

    fn set_uniform_mat3(&self, location: Option<UniformLocation>, value: &[f32; 9]) {
        self.uniform_uploads
            .borrow_mut()
            .push((location, UniformUpload::Mat3(*value)));
    }

    fn set_uniform_mat4(&self, location: Option<UniformLocation>, value: &[f32; 16]) {
        self.uniform_uploads
            .borrow_mut()
            .push((location, UniformUpload::Mat4(*value)));
    }

    fn create_texture(
        &self,
        width: u32,
        height: u32,
        pixels: Option<&[u8]>,
        options: &TextureOptions,
    ) -> Result<TextureHandle, ResourceError> {
        self.created_textures
            .borrow_mut()
            .push((width, height, pixels.is_some(), *options));
        Ok(TextureHandle(self.alloc()))
    }

    fn delete_texture(&self, texture: TextureHandle) {
        self.released_textures.borrow_mut().push(texture);
    }

    fn bind_texture(&self, texture: Option<TextureHandle>) {
        self.bound_textures.borrow_mut().push(texture);
    }

    fn create_buffer(&self) -> Result<BufferHandle, ResourceError> {
        self.created_buffers.set(self.created_buffers.get() + 1);
        Ok(BufferHandle(self.alloc()))
    }

    fn delete_buffer(&self, buffer: BufferHandle) {
        self.released_buffers.borrow_mut().push(buffer);
    }

    fn bind_array_buffer(&self, buffer: Option<BufferHandle>) {
        self.bound_array_buffers.borrow_mut().push(buffer);
    }

    fn upload_array_buffer(&self, data: &[u8]) {
        self.buffer_uploads.borrow_mut().push(data.to_vec());
    }

    fn create_framebuffer(&self) -> Result<FramebufferHandle, ResourceError> {
        Ok(FramebufferHandle(self.alloc()))
    }

    fn delete_framebuffer(&self, framebuffer: FramebufferHandle) {
        self.released_framebuffers.borrow_mut().push(framebuffer);
    }

    fn bind_framebuffer(&self, framebuffer: Option<FramebufferHandle>) {
        self.bound_framebuffers.borrow_mut().push(framebuffer);
    }

    fn attach_color_texture(&self, texture: TextureHandle) {
        self.color_attachments.borrow_mut().push(texture);
    }

    fn create_renderbuffer(
        &self,
        _width: u32,
        _height: u32,
    ) -> Result<RenderbufferHandle, ResourceError> {
        Ok(RenderbufferHandle(self.alloc()))
    }

    fn delete_renderbuffer(&self, renderbuffer: RenderbufferHandle) {
        self.released_renderbuffers.borrow_mut().push(renderbuffer);
    }

    fn attach_depth_stencil_renderbuffer(&self, renderbuffer: RenderbufferHandle) {
        self.depth_stencil_attachments.borrow_mut().push(renderbuffer);
    }

    fn framebuffer_complete(&self) -> bool {
        self.framebuffer_complete.get()
    }

    fn set_viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.viewports.borrow_mut().push((x, y, width, height));
    }

    fn clear(&self, color: [f32; 4]) {
        self.clears.borrow_mut().push(color);
    }

    fn draw_triangles(&self, first: i32, count: i32) {
        self.draw_calls.borrow_mut().push((first, count));
    }
}
