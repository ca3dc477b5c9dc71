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

use eidolon_core::renderer::{
    AttributeKind, BufferHandle, FramebufferHandle, ProgramHandle, RenderbufferHandle,
    ShaderHandle, ShaderStage, TextureFilter, TextureHandle, TextureWrap, UniformLocation,
};

/// A local extension trait to convert core types into glow-compatible types.
/// This avoids Rust's orphan rules while keeping an idiomatic `.into_glow()`
/// syntax.
pub trait IntoGlow<T> {
    /// Consumes self and converts it into a glow-compatible type.
    fn into_glow(self) -> T;
}

// --- Enums ---

impl IntoGlow<u32> for ShaderStage {
    fn into_glow(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl IntoGlow<u32> for AttributeKind {
    fn into_glow(self) -> u32 {
        match self {
            AttributeKind::F32 => glow::FLOAT,
            AttributeKind::I8 => glow::BYTE,
            AttributeKind::U8 => glow::UNSIGNED_BYTE,
            AttributeKind::I16 => glow::SHORT,
            AttributeKind::U16 => glow::UNSIGNED_SHORT,
            AttributeKind::I32 => glow::INT,
            AttributeKind::U32 => glow::UNSIGNED_INT,
        }
    }
}

impl IntoGlow<i32> for TextureFilter {
    fn into_glow(self) -> i32 {
        match self {
            TextureFilter::Nearest => glow::NEAREST as i32,
            TextureFilter::Linear => glow::LINEAR as i32,
        }
    }
}

impl IntoGlow<i32> for TextureWrap {
    fn into_glow(self) -> i32 {
        match self {
            TextureWrap::ClampToEdge => glow::CLAMP_TO_EDGE as i32,
            TextureWrap::Repeat => glow::REPEAT as i32,
            TextureWrap::MirrorRepeat => glow::MIRRORED_REPEAT as i32,
        }
    }
}

// --- Handles, core to glow ---

impl IntoGlow<glow::NativeShader> for ShaderHandle {
    fn into_glow(self) -> glow::NativeShader {
        glow::NativeShader(self.0)
    }
}

impl IntoGlow<glow::NativeProgram> for ProgramHandle {
    fn into_glow(self) -> glow::NativeProgram {
        glow::NativeProgram(self.0)
    }
}

impl IntoGlow<glow::NativeTexture> for TextureHandle {
    fn into_glow(self) -> glow::NativeTexture {
        glow::NativeTexture(self.0)
    }
}

impl IntoGlow<glow::NativeBuffer> for BufferHandle {
    fn into_glow(self) -> glow::NativeBuffer {
        glow::NativeBuffer(self.0)
    }
}

impl IntoGlow<glow::NativeFramebuffer> for FramebufferHandle {
    fn into_glow(self) -> glow::NativeFramebuffer {
        glow::NativeFramebuffer(self.0)
    }
}

impl IntoGlow<glow::NativeRenderbuffer> for RenderbufferHandle {
    fn into_glow(self) -> glow::NativeRenderbuffer {
        glow::NativeRenderbuffer(self.0)
    }
}

impl IntoGlow<glow::NativeUniformLocation> for UniformLocation {
    fn into_glow(self) -> glow::NativeUniformLocation {
        glow::NativeUniformLocation(self.0)
    }
}

// --- Handles, glow to core ---

pub(crate) fn shader_handle(native: glow::NativeShader) -> ShaderHandle {
    ShaderHandle(native.0)
}

pub(crate) fn program_handle(native: glow::NativeProgram) -> ProgramHandle {
    ProgramHandle(native.0)
}

pub(crate) fn texture_handle(native: glow::NativeTexture) -> TextureHandle {
    TextureHandle(native.0)
}

pub(crate) fn buffer_handle(native: glow::NativeBuffer) -> BufferHandle {
    BufferHandle(native.0)
}

pub(crate) fn framebuffer_handle(native: glow::NativeFramebuffer) -> FramebufferHandle {
    FramebufferHandle(native.0)
}

pub(crate) fn renderbuffer_handle(native: glow::NativeRenderbuffer) -> RenderbufferHandle {
    RenderbufferHandle(native.0)
}
