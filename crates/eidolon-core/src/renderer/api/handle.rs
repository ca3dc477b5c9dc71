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

//! Opaque GPU handle types and exclusive handle ownership.
//!
//! A handle is a non-null integer the driver uses to name a server-side
//! resource. Handles themselves are `Copy` and carry no ownership; ownership
//! lives in [`UniqueHandle`], which pairs a raw handle with the device that
//! created it and releases it exactly once when dropped. Because
//! [`UniqueHandle`] is not `Copy` and Rust moves make the source binding
//! unusable, at most one live owner ever references a given GPU resource and
//! a double release is impossible by construction.

use std::fmt;
use std::num::NonZeroU32;
use std::rc::Rc;

use crate::renderer::traits::GraphicsDevice;

/// An opaque handle to a compiled shader stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub NonZeroU32);

/// An opaque handle to a linked (or linkable) shader program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub NonZeroU32);

/// An opaque handle to a GPU texture resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub NonZeroU32);

/// An opaque handle to a GPU buffer resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub NonZeroU32);

/// An opaque handle to an off-screen framebuffer object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FramebufferHandle(pub NonZeroU32);

/// An opaque handle to a depth/stencil render buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderbufferHandle(pub NonZeroU32);

/// A resolved uniform location inside a linked program.
///
/// "Not found" is represented as `Option::<UniformLocation>::None` throughout
/// the crate; uploading through a `None` location is a driver-level no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub u32);

/// A resolved vertex attribute location inside a linked program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttributeLocation(pub u32);

/// Exclusive ownership of one GPU handle, parameterized by its release call.
///
/// GPU objects have no automatic collection, so every wrapper in this crate
/// stores its raw handle inside a `UniqueHandle`, which invokes the release
/// function exactly once when the owner goes out of scope. Transferring
/// ownership is an ordinary Rust move; the moved-from binding can no longer
/// be dropped, so the release still happens exactly once regardless of how
/// many times the owner changes hands.
pub struct UniqueHandle<T: Copy> {
    raw: T,
    device: Rc<dyn GraphicsDevice>,
    release: fn(&dyn GraphicsDevice, T),
}

impl<T: Copy> UniqueHandle<T> {
    /// Takes ownership of `raw`, releasing it through `release` on drop.
    pub fn new(device: Rc<dyn GraphicsDevice>, raw: T, release: fn(&dyn GraphicsDevice, T)) -> Self {
        Self {
            raw,
            device,
            release,
        }
    }

    /// The raw handle, valid for the lifetime of this owner.
    #[inline]
    pub fn get(&self) -> T {
        self.raw
    }

    /// The device the handle was created on.
    #[inline]
    pub fn device(&self) -> &Rc<dyn GraphicsDevice> {
        &self.device
    }
}

impl<T: Copy> Drop for UniqueHandle<T> {
    fn drop(&mut self) {
        (self.release)(self.device.as_ref(), self.raw);
    }
}

impl<T: Copy + fmt::Debug> fmt::Debug for UniqueHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UniqueHandle").field("raw", &self.raw).finish_non_exhaustive()
    }
}
