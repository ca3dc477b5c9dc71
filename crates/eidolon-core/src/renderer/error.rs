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

//! The hierarchy of error types for the rendering core.
//!
//! Shader compilation, program linking, and framebuffer completeness all
//! report through the same recoverable channel: a typed error from the
//! constructor or factory. Nothing here terminates the process, and no
//! constructor hands back an object wrapping an unusable handle.

use std::fmt;

use crate::renderer::api::ShaderStage;

/// An error related to compiling, linking, or loading shader code.
#[derive(Debug)]
pub enum ShaderError {
    /// The shader source could not be loaded from a path.
    Load {
        /// The path of the file that failed to load.
        path: String,
        /// The underlying I/O error.
        source_error: String,
    },
    /// The driver refused to create a shader or program object.
    Creation {
        /// Backend-specific details.
        details: String,
    },
    /// The shader source failed to compile.
    Compilation {
        /// The stage the source was compiled as.
        stage: ShaderStage,
        /// The compiler's diagnostic log.
        details: String,
    },
    /// The attached shaders failed to link into a program.
    Link {
        /// The linker's diagnostic log.
        details: String,
    },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Load { path, source_error } => {
                write!(f, "Failed to load shader source from '{path}': {source_error}")
            }
            ShaderError::Creation { details } => {
                write!(f, "Failed to create shader object: {details}")
            }
            ShaderError::Compilation { stage, details } => {
                write!(f, "{stage} shader compilation failed: {details}")
            }
            ShaderError::Link { details } => {
                write!(f, "Shader program linking failed: {details}")
            }
        }
    }
}

impl std::error::Error for ShaderError {}

/// An error related to constructing an off-screen render target.
#[derive(Debug)]
pub enum FramebufferError {
    /// The backend reported the assembled framebuffer incomplete.
    Incomplete {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
}

impl fmt::Display for FramebufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FramebufferError::Incomplete { width, height } => {
                write!(f, "Framebuffer of size {width}x{height} is incomplete")
            }
        }
    }
}

impl std::error::Error for FramebufferError {}

/// An error related to the creation or use of a GPU resource.
#[derive(Debug)]
pub enum ResourceError {
    /// A shader-specific error occurred.
    Shader(ShaderError),
    /// A framebuffer-specific error occurred.
    Framebuffer(FramebufferError),
    /// Pixel data does not match the dimensions of the texture it is
    /// uploaded into.
    PixelDataSize {
        /// Number of bytes the texture dimensions require.
        expected: usize,
        /// Number of bytes actually supplied.
        actual: usize,
    },
    /// An error originating from the specific graphics backend.
    Backend(String),
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::Shader(err) => write!(f, "Shader resource error: {err}"),
            ResourceError::Framebuffer(err) => write!(f, "Framebuffer resource error: {err}"),
            ResourceError::PixelDataSize { expected, actual } => {
                write!(f, "Pixel data holds {actual} bytes where {expected} are required")
            }
            ResourceError::Backend(msg) => write!(f, "Backend-specific resource error: {msg}"),
        }
    }
}

impl std::error::Error for ResourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResourceError::Shader(err) => Some(err),
            ResourceError::Framebuffer(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ShaderError> for ResourceError {
    fn from(err: ShaderError) -> Self {
        ResourceError::Shader(err)
    }
}

impl From<FramebufferError> for ResourceError {
    fn from(err: FramebufferError) -> Self {
        ResourceError::Framebuffer(err)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn shader_error_display() {
        let err = ShaderError::Compilation {
            stage: ShaderStage::Fragment,
            details: "0:12: syntax error".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "fragment shader compilation failed: 0:12: syntax error"
        );

        let err_load = ShaderError::Load {
            path: "shaders/sprite.frag".to_string(),
            source_error: "No such file or directory".to_string(),
        };
        assert_eq!(
            format!("{err_load}"),
            "Failed to load shader source from 'shaders/sprite.frag': No such file or directory"
        );
    }

    #[test]
    fn resource_error_display_wrapping_framebuffer_error() {
        let err: ResourceError = FramebufferError::Incomplete {
            width: 128,
            height: 64,
        }
        .into();
        assert_eq!(
            format!("{err}"),
            "Framebuffer resource error: Framebuffer of size 128x64 is incomplete"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn resource_error_wraps_shader_error_with_source() {
        let shader_err = ShaderError::Link {
            details: "no shaders attached".to_string(),
        };
        let res_err: ResourceError = shader_err.into();
        assert_eq!(
            format!("{res_err}"),
            "Shader resource error: Shader program linking failed: no shaders attached"
        );
        assert!(res_err.source().is_some());
    }
}
