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

//! Data types shared between the high-level wrappers and the device contract.
//!
//! Organized into three sub-modules:
//!
//! - **[`handle`]**: opaque GPU handle newtypes and the exclusive-ownership
//!   [`UniqueHandle`] wrapper.
//! - **[`enums`]**: shader stages, attribute element kinds, and texture
//!   sampling options.
//! - **[`vertex`]**: the sprite vertex layout and the CPU+GPU vertex sequence.

pub mod enums;
pub mod handle;
pub mod vertex;

pub use enums::{AttributeKind, ShaderStage, TextureFilter, TextureOptions, TextureWrap};
pub use handle::{
    AttributeLocation, BufferHandle, FramebufferHandle, ProgramHandle, RenderbufferHandle,
    ShaderHandle, TextureHandle, UniformLocation, UniqueHandle,
};
pub use vertex::{Vertex, VertexArray, POSITION_ATTRIBUTE, TEXTURE_ATTRIBUTE};
