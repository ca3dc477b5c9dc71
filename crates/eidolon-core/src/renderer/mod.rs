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

//! The backend-agnostic rendering contracts and high-level wrappers.
//!
//! This module defines the "common language" of the renderer: the abstract
//! [`GraphicsDevice`] trait, the opaque GPU handle types, the error hierarchy,
//! and the wrappers built on top of them ([`Shader`], [`ShaderProgram`],
//! [`Texture`], [`Sprite`], [`Screen`], [`Framebuffer`]).
//!
//! The module defines the 'what' of rendering; the 'how' lives in a concrete
//! backend crate (e.g. a glow/OpenGL backend) implementing [`GraphicsDevice`].
//! Everything here is single-threaded and immediate-mode: each operation
//! issues its driver calls on the calling thread and returns when they do. The
//! graphics context is assumed bound to that thread, so wrappers share the
//! device through [`std::rc::Rc`] and use plain interior mutability where
//! per-object caches are needed.

pub mod api;
pub mod error;
pub mod program;
pub mod shader;
pub mod sprite;
pub mod target;
pub mod texture;
pub mod traits;

#[cfg(test)]
pub(crate) mod recording;

// Re-export the most important types for easier use.
pub use self::api::{
    AttributeKind, AttributeLocation, BufferHandle, FramebufferHandle, ProgramHandle,
    RenderbufferHandle, ShaderHandle, ShaderStage, TextureFilter, TextureHandle, TextureOptions,
    TextureWrap, UniformLocation, UniqueHandle, Vertex, VertexArray, POSITION_ATTRIBUTE,
    TEXTURE_ATTRIBUTE,
};
pub use self::error::{FramebufferError, ResourceError, ShaderError};
pub use self::program::{
    sprite_program, ShaderProgram, UniformValue, COLOR_UNIFORM, PROJECTION_UNIFORM,
    TEXTURE_UNIFORM, VIEW_UNIFORM,
};
pub use self::shader::Shader;
pub use self::sprite::Sprite;
pub use self::target::{DrawState, Framebuffer, RenderTarget, Screen};
pub use self::texture::Texture;
pub use self::traits::GraphicsDevice;
