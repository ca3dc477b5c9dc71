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

//! Shader program state: linking, uniform caching, attribute setup.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use glam::{Mat3, Mat4, Vec3, Vec4};

use crate::renderer::api::{
    AttributeKind, AttributeLocation, ProgramHandle, ShaderStage, UniformLocation, UniqueHandle,
};
use crate::renderer::error::ShaderError;
use crate::renderer::shader::Shader;
use crate::renderer::traits::GraphicsDevice;

/// Name of the projection matrix uniform set by the draw path.
pub const PROJECTION_UNIFORM: &str = "projection";

/// Name of the view/model transform uniform set by the draw path.
pub const VIEW_UNIFORM: &str = "view";

/// Name of the modulation color uniform set by the draw path.
pub const COLOR_UNIFORM: &str = "color";

/// Name of the sampler uniform set by the draw path (texture unit zero).
pub const TEXTURE_UNIFORM: &str = "texture_0";

const SPRITE_VERTEX_SHADER: &str = "\
in vec2 space_position;
in vec2 texture_position;

uniform mat4 projection;
uniform mat4 view;

out vec2 f_texture_position;

void main() {
  f_texture_position = texture_position;
  gl_Position = projection * view * vec4(space_position, 0.0, 1.0);
}
";

const SPRITE_FRAGMENT_SHADER: &str = "\
in vec2 f_texture_position;

uniform sampler2D texture_0;
uniform vec4 color;

out vec4 out_color;

void main() {
  out_color = texture(texture_0, f_texture_position) * color;
}
";

/// A value uploadable into a named uniform.
///
/// Each shape maps to exactly one device upload call. Choosing a shape that
/// does not match the uniform's declared type in the shader is a caller
/// error; it is not detected here and yields an unspecified rendering result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// A scalar float.
    F32(f32),
    /// A scalar integer or sampler unit index.
    I32(i32),
    /// A 3-component vector.
    Vec3(Vec3),
    /// A 4-component vector.
    Vec4(Vec4),
    /// A 3x3 matrix.
    Mat3(Mat3),
    /// A 4x4 matrix.
    Mat4(Mat4),
}

impl From<f32> for UniformValue {
    fn from(value: f32) -> Self {
        UniformValue::F32(value)
    }
}

impl From<i32> for UniformValue {
    fn from(value: i32) -> Self {
        UniformValue::I32(value)
    }
}

impl From<(f32, f32, f32)> for UniformValue {
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        UniformValue::Vec3(Vec3::new(x, y, z))
    }
}

impl From<Vec3> for UniformValue {
    fn from(value: Vec3) -> Self {
        UniformValue::Vec3(value)
    }
}

impl From<Vec4> for UniformValue {
    fn from(value: Vec4) -> Self {
        UniformValue::Vec4(value)
    }
}

impl From<Mat3> for UniformValue {
    fn from(value: Mat3) -> Self {
        UniformValue::Mat3(value)
    }
}

impl From<Mat4> for UniformValue {
    fn from(value: Mat4) -> Self {
        UniformValue::Mat4(value)
    }
}

/// One or more compiled shader stages linked into an executable pipeline.
///
/// A program becomes usable only after [`ShaderProgram::link`] succeeds.
/// Before that (or after a failed link) it is inert but never undefined:
/// [`ShaderProgram::bind`] then binds program zero, which draws nothing.
///
/// Uniform locations are resolved lazily and cached per program, including
/// the "not found" outcome, so repeated misses cost one driver query total.
/// Attribute locations are intentionally not cached: attribute setup happens
/// once per draw-call, not in a hot per-frame uniform loop, and re-querying
/// keeps the cache from holding stale locations across relinks.
#[derive(Debug)]
pub struct ShaderProgram {
    handle: UniqueHandle<ProgramHandle>,
    uniforms: RefCell<HashMap<String, Option<UniformLocation>>>,
    linked: Cell<bool>,
}

fn release_program(device: &dyn GraphicsDevice, handle: ProgramHandle) {
    device.delete_program(handle);
}

impl ShaderProgram {
    /// Creates an empty, unlinked program object.
    pub fn new(device: &Rc<dyn GraphicsDevice>) -> Result<Self, ShaderError> {
        let handle = device.create_program()?;
        Ok(Self {
            handle: UniqueHandle::new(Rc::clone(device), handle, release_program),
            uniforms: RefCell::new(HashMap::new()),
            linked: Cell::new(false),
        })
    }

    /// Attaches a compiled shader. Call once per stage before
    /// [`ShaderProgram::link`].
    pub fn add_shader(&self, shader: &Shader) {
        self.handle
            .device()
            .attach_shader(self.handle.get(), shader.handle());
    }

    /// Links the attached shaders into an executable pipeline.
    ///
    /// On failure the error carries the linker's diagnostic log and the
    /// program stays inert.
    pub fn link(&self) -> Result<(), ShaderError> {
        self.handle.device().link_program(self.handle.get())?;
        self.linked.set(true);
        Ok(())
    }

    /// `true` once [`ShaderProgram::link`] has succeeded.
    #[inline]
    pub fn is_linked(&self) -> bool {
        self.linked.get()
    }

    /// The opaque GPU handle of the program object.
    #[inline]
    pub fn handle(&self) -> ProgramHandle {
        self.handle.get()
    }

    /// Binds this program as the active pipeline. Draw calls issued after
    /// `bind` and before the next `bind`/`unbind` use this program.
    ///
    /// A program that never linked binds program zero instead, so drawing
    /// through it is a defined no-op rather than undefined behavior.
    pub fn bind(&self) {
        let handle = self.linked.get().then(|| self.handle.get());
        self.handle.device().use_program(handle);
    }

    /// Unbinds any active program.
    pub fn unbind(&self) {
        self.handle.device().use_program(None);
    }

    /// Resolves a uniform location by name, caching the result.
    ///
    /// The first lookup of a name queries the driver and stores the outcome,
    /// misses included; later lookups are cache hits. A miss is logged once
    /// and yields `None`, and uploading through `None` is a driver no-op.
    pub fn uniform(&self, name: &str) -> Option<UniformLocation> {
        if let Some(cached) = self.uniforms.borrow().get(name) {
            return *cached;
        }

        let location = self
            .handle
            .device()
            .uniform_location(self.handle.get(), name);
        if location.is_none() {
            log::warn!("uniform '{name}' does not exist in the program");
        }
        self.uniforms.borrow_mut().insert(name.to_owned(), location);
        location
    }

    /// Resolves a vertex attribute location by name. Not cached; every call
    /// queries the driver.
    pub fn attribute(&self, name: &str) -> Option<AttributeLocation> {
        let location = self
            .handle
            .device()
            .attribute_location(self.handle.get(), name);
        if location.is_none() {
            log::warn!("attribute '{name}' does not exist in the program");
        }
        location
    }

    /// Points a named float attribute into the currently bound vertex
    /// buffer. Shorthand for [`ShaderProgram::set_attribute_with`] with
    /// unnormalized 32-bit float elements.
    pub fn set_attribute(&self, name: &str, components: i32, stride: i32, offset: i32) {
        self.set_attribute_with(name, components, stride, offset, false, AttributeKind::F32);
    }

    /// Points a named attribute into the currently bound vertex buffer.
    ///
    /// Unresolvable names have already been logged by
    /// [`ShaderProgram::attribute`] and are skipped.
    pub fn set_attribute_with(
        &self,
        name: &str,
        components: i32,
        stride: i32,
        offset: i32,
        normalized: bool,
        kind: AttributeKind,
    ) {
        if let Some(location) = self.attribute(name) {
            self.handle.device().configure_attribute(
                location, components, kind, normalized, stride, offset,
            );
        }
    }

    /// Uploads a value into a named uniform of the currently bound program.
    ///
    /// Accepts any shape convertible into [`UniformValue`]: `f32`, `i32`,
    /// `(f32, f32, f32)`, [`Vec3`], [`Vec4`], [`Mat3`], and [`Mat4`].
    pub fn set_uniform(&self, name: &str, value: impl Into<UniformValue>) {
        let location = self.uniform(name);
        let device = self.handle.device();
        match value.into() {
            UniformValue::F32(value) => device.set_uniform_f32(location, value),
            UniformValue::I32(value) => device.set_uniform_i32(location, value),
            UniformValue::Vec3(value) => device.set_uniform_vec3(location, &value.to_array()),
            UniformValue::Vec4(value) => device.set_uniform_vec4(location, &value.to_array()),
            UniformValue::Mat3(value) => device.set_uniform_mat3(location, &value.to_cols_array()),
            UniformValue::Mat4(value) => device.set_uniform_mat4(location, &value.to_cols_array()),
        }
    }
}

/// Builds the built-in 2D sprite pipeline: a vertex stage transforming
/// [`POSITION_ATTRIBUTE`](crate::renderer::POSITION_ATTRIBUTE) by
/// `projection * view`, and a fragment stage sampling [`TEXTURE_UNIFORM`]
/// modulated by [`COLOR_UNIFORM`].
pub fn sprite_program(device: &Rc<dyn GraphicsDevice>) -> Result<ShaderProgram, ShaderError> {
    let vertex = Shader::from_source(device, SPRITE_VERTEX_SHADER, ShaderStage::Vertex)?;
    let fragment = Shader::from_source(device, SPRITE_FRAGMENT_SHADER, ShaderStage::Fragment)?;

    let program = ShaderProgram::new(device)?;
    program.add_shader(&vertex);
    program.add_shader(&fragment);
    program.link()?;
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recording::{RecordingDevice, UniformUpload};

    fn linked_program(
        recorder: &Rc<RecordingDevice>,
    ) -> (Rc<dyn GraphicsDevice>, ShaderProgram) {
        let device: Rc<dyn GraphicsDevice> = recorder.clone();
        let shader = Shader::from_source(&device, "void main() {}", ShaderStage::Vertex).unwrap();
        let program = ShaderProgram::new(&device).unwrap();
        program.add_shader(&shader);
        program.link().unwrap();
        (device, program)
    }

    #[test]
    fn program_with_no_attached_shaders_stays_inert() {
        let recorder = Rc::new(RecordingDevice::default());
        let device: Rc<dyn GraphicsDevice> = recorder.clone();

        let program = ShaderProgram::new(&device).unwrap();
        assert!(program.link().is_err());
        assert!(!program.is_linked());

        program.bind();
        assert_eq!(recorder.used_programs.borrow().as_slice(), &[None]);
    }

    #[test]
    fn linked_program_binds_its_own_handle() {
        let recorder = Rc::new(RecordingDevice::default());
        let (_device, program) = linked_program(&recorder);
        assert!(program.is_linked());

        program.bind();
        program.unbind();
        let used = recorder.used_programs.borrow();
        assert_eq!(used.as_slice(), &[Some(program.handle()), None]);
    }

    #[test]
    fn unknown_uniform_is_queried_once_and_cached_as_missing() {
        let recorder = Rc::new(RecordingDevice::default());
        let (_device, program) = linked_program(&recorder);

        let first = program.uniform("does_not_exist");
        let second = program.uniform("does_not_exist");
        assert_eq!(first, None);
        assert_eq!(second, None);
        assert_eq!(recorder.uniform_queries.get(), 1);
    }

    #[test]
    fn known_uniform_is_cached_after_the_first_query() {
        let recorder = Rc::new(RecordingDevice::default());
        recorder.declare_uniform("projection", 3);
        let (_device, program) = linked_program(&recorder);

        let first = program.uniform("projection");
        let second = program.uniform("projection");
        assert_eq!(first, Some(UniformLocation(3)));
        assert_eq!(second, first);
        assert_eq!(recorder.uniform_queries.get(), 1);
    }

    #[test]
    fn attribute_lookups_are_never_cached() {
        let recorder = Rc::new(RecordingDevice::default());
        recorder.declare_attribute("space_position", 0);
        let (_device, program) = linked_program(&recorder);

        assert_eq!(program.attribute("space_position"), Some(AttributeLocation(0)));
        assert_eq!(program.attribute("space_position"), Some(AttributeLocation(0)));
        assert_eq!(recorder.attribute_queries.get(), 2);
    }

    #[test]
    fn set_attribute_defaults_to_unnormalized_f32() {
        let recorder = Rc::new(RecordingDevice::default());
        recorder.declare_attribute("texture_position", 1);
        let (_device, program) = linked_program(&recorder);

        program.set_attribute("texture_position", 2, 16, 8);
        let configured = recorder.configured_attributes.borrow();
        assert_eq!(
            configured.as_slice(),
            &[(AttributeLocation(1), 2, AttributeKind::F32, false, 16, 8)]
        );
    }

    #[test]
    fn set_uniform_dispatches_each_shape_to_its_upload_call() {
        let recorder = Rc::new(RecordingDevice::default());
        recorder.declare_uniform("u", 0);
        let (_device, program) = linked_program(&recorder);

        program.set_uniform("u", 0.5f32);
        program.set_uniform("u", 7i32);
        program.set_uniform("u", (1.0, 2.0, 3.0));
        program.set_uniform("u", Vec4::ONE);
        program.set_uniform("u", Mat4::IDENTITY);

        let uploads = recorder.uniform_uploads.borrow();
        let shapes: Vec<_> = uploads.iter().map(|(_, upload)| upload.clone()).collect();
        assert_eq!(
            shapes,
            vec![
                UniformUpload::F32(0.5),
                UniformUpload::I32(7),
                UniformUpload::Vec3([1.0, 2.0, 3.0]),
                UniformUpload::Vec4([1.0; 4]),
                UniformUpload::Mat4(Mat4::IDENTITY.to_cols_array()),
            ]
        );
        // Every upload went to the same cached location.
        assert!(uploads.iter().all(|(location, _)| *location == Some(UniformLocation(0))));
        assert_eq!(recorder.uniform_queries.get(), 1);
    }

    #[test]
    fn uploads_through_a_missing_uniform_still_reach_the_device_as_noop() {
        let recorder = Rc::new(RecordingDevice::default());
        let (_device, program) = linked_program(&recorder);

        program.set_uniform("missing", 1.0f32);
        let uploads = recorder.uniform_uploads.borrow();
        assert_eq!(uploads.as_slice(), &[(None, UniformUpload::F32(1.0))]);
    }

    #[test]
    fn sprite_program_compiles_both_stages_and_links() {
        let recorder = Rc::new(RecordingDevice::default());
        let device: Rc<dyn GraphicsDevice> = recorder.clone();

        let program = sprite_program(&device).unwrap();
        assert!(program.is_linked());

        let compiled = recorder.compiled_shaders.borrow();
        assert_eq!(compiled.len(), 2);
        assert_eq!(compiled[0].0, ShaderStage::Vertex);
        assert_eq!(compiled[1].0, ShaderStage::Fragment);
        // Both stage shaders are attached before linking.
        assert_eq!(recorder.attached_shaders.borrow().len(), 2);
        // The stage objects themselves are already released; the program is not.
        assert_eq!(recorder.released_shaders.borrow().len(), 2);
        assert_eq!(recorder.released_programs.borrow().len(), 0);
    }
}
