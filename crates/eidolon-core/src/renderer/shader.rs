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

//! Compilation of one shader stage from source text.

use std::path::Path;
use std::rc::Rc;

use crate::renderer::api::{ShaderHandle, ShaderStage, UniqueHandle};
use crate::renderer::error::ShaderError;
use crate::renderer::traits::GraphicsDevice;

/// Version/precision header prepended to every shader source before
/// compilation. Portable targets get a constrained-precision ES header; the
/// desktop path gets the full-precision core profile.
#[cfg(target_arch = "wasm32")]
pub const SHADER_HEADER: &str = "#version 300 es\n\
                                 precision mediump float;\n\
                                 precision mediump int;\n\
                                 precision mediump sampler2DArray;\n";

/// Version/precision header prepended to every shader source before
/// compilation.
#[cfg(not(target_arch = "wasm32"))]
pub const SHADER_HEADER: &str = "#version 330\n";

/// One compiled shader stage.
///
/// Compilation happens at construction; a compile error surfaces as
/// [`ShaderError::Compilation`] carrying the compiler's diagnostic log, and
/// no object is returned. After successful compilation the shader is only
/// ever used as an opaque handle for program attachment.
///
/// The wrapper owns the GPU handle exclusively: it is move-only and releases
/// the handle exactly once when dropped.
#[derive(Debug)]
pub struct Shader {
    handle: UniqueHandle<ShaderHandle>,
    stage: ShaderStage,
}

fn release_shader(device: &dyn GraphicsDevice, handle: ShaderHandle) {
    device.delete_shader(handle);
}

impl Shader {
    /// Compiles `source` as a shader of the given stage, after prepending
    /// [`SHADER_HEADER`].
    pub fn from_source(
        device: &Rc<dyn GraphicsDevice>,
        source: &str,
        stage: ShaderStage,
    ) -> Result<Self, ShaderError> {
        let mut full_source = String::with_capacity(SHADER_HEADER.len() + source.len());
        full_source.push_str(SHADER_HEADER);
        full_source.push_str(source);

        let handle = device.compile_shader(stage, &full_source)?;
        log::debug!("compiled {stage} shader {handle:?}");
        Ok(Self {
            handle: UniqueHandle::new(Rc::clone(device), handle, release_shader),
            stage,
        })
    }

    /// Reads `path` and compiles its contents like [`Shader::from_source`].
    pub fn from_file(
        device: &Rc<dyn GraphicsDevice>,
        path: impl AsRef<Path>,
        stage: ShaderStage,
    ) -> Result<Self, ShaderError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|err| ShaderError::Load {
            path: path.display().to_string(),
            source_error: err.to_string(),
        })?;
        Self::from_source(device, &source, stage)
    }

    /// The opaque GPU handle, for attachment to a program.
    #[inline]
    pub fn handle(&self) -> ShaderHandle {
        self.handle.get()
    }

    /// The stage this shader was compiled as.
    #[inline]
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recording::RecordingDevice;

    #[test]
    fn from_source_prepends_the_backend_header() {
        let recorder = Rc::new(RecordingDevice::default());
        let device: Rc<dyn GraphicsDevice> = recorder.clone();

        let shader =
            Shader::from_source(&device, "void main() {}", ShaderStage::Vertex).unwrap();
        assert_eq!(shader.stage(), ShaderStage::Vertex);

        let compiled = recorder.compiled_shaders.borrow();
        assert_eq!(compiled.len(), 1);
        let (stage, source) = &compiled[0];
        assert_eq!(*stage, ShaderStage::Vertex);
        assert!(source.starts_with(SHADER_HEADER));
        assert!(source.ends_with("void main() {}"));
    }

    #[test]
    fn compile_failure_surfaces_the_driver_log() {
        let recorder = Rc::new(RecordingDevice::default());
        recorder.fail_compile.set(true);
        let device: Rc<dyn GraphicsDevice> = recorder.clone();

        let result = Shader::from_source(&device, "nonsense", ShaderStage::Fragment);
        match result {
            Err(ShaderError::Compilation { stage, details }) => {
                assert_eq!(stage, ShaderStage::Fragment);
                assert!(!details.is_empty());
            }
            other => panic!("expected a compilation error, got {other:?}"),
        }
        // Nothing to release: no handle was handed out.
        assert_eq!(recorder.released_shaders.borrow().len(), 0);
    }

    #[test]
    fn shader_is_released_exactly_once() {
        let recorder = Rc::new(RecordingDevice::default());
        let device: Rc<dyn GraphicsDevice> = recorder.clone();

        let shader = Shader::from_source(&device, "void main() {}", ShaderStage::Vertex).unwrap();
        let handle = shader.handle();

        let moved = shader;
        drop(moved);
        assert_eq!(recorder.released_shaders.borrow().as_slice(), &[handle]);
    }

    #[test]
    fn from_file_reports_missing_files_as_load_errors() {
        let recorder = Rc::new(RecordingDevice::default());
        let device: Rc<dyn GraphicsDevice> = recorder.clone();

        let result = Shader::from_file(
            &device,
            "definitely/not/here.vert",
            ShaderStage::Vertex,
        );
        match result {
            Err(ShaderError::Load { path, .. }) => {
                assert_eq!(path, "definitely/not/here.vert");
            }
            other => panic!("expected a load error, got {other:?}"),
        }
    }
}
