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

//! A sampled 2D RGBA texture owned on the GPU.

use std::rc::Rc;

use crate::renderer::api::{TextureHandle, TextureOptions, UniqueHandle};
use crate::renderer::error::ResourceError;
use crate::renderer::traits::GraphicsDevice;

/// Bytes per pixel of the RGBA8 format every texture uses.
const BYTES_PER_PIXEL: usize = 4;

/// A 2D texture with known pixel dimensions and a bindable sampler handle.
///
/// Image decoding is out of scope: pixel data arrives as raw, tightly packed
/// row-major RGBA8 bytes. Move-only; the GPU resource is released exactly
/// once when the texture is dropped.
#[derive(Debug)]
pub struct Texture {
    handle: UniqueHandle<TextureHandle>,
    width: u32,
    height: u32,
}

fn release_texture(device: &dyn GraphicsDevice, handle: TextureHandle) {
    device.delete_texture(handle);
}

impl Texture {
    /// Creates a texture from raw RGBA8 pixel data.
    ///
    /// `pixels` must hold exactly `4 * width * height` bytes.
    pub fn from_pixels(
        device: &Rc<dyn GraphicsDevice>,
        width: u32,
        height: u32,
        pixels: &[u8],
        options: TextureOptions,
    ) -> Result<Self, ResourceError> {
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if pixels.len() != expected {
            return Err(ResourceError::PixelDataSize {
                expected,
                actual: pixels.len(),
            });
        }

        let handle = device.create_texture(width, height, Some(pixels), &options)?;
        Ok(Self {
            handle: UniqueHandle::new(Rc::clone(device), handle, release_texture),
            width,
            height,
        })
    }

    /// Allocates uninitialized texture storage, e.g. for the color attachment
    /// of an off-screen render target.
    pub fn empty(
        device: &Rc<dyn GraphicsDevice>,
        width: u32,
        height: u32,
        options: TextureOptions,
    ) -> Result<Self, ResourceError> {
        let handle = device.create_texture(width, height, None, &options)?;
        Ok(Self {
            handle: UniqueHandle::new(Rc::clone(device), handle, release_texture),
            width,
            height,
        })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The bindable sampler handle.
    #[inline]
    pub fn handle(&self) -> TextureHandle {
        self.handle.get()
    }

    /// Binds the texture for sampling on texture unit zero.
    pub fn bind(&self) {
        self.handle.device().bind_texture(Some(self.handle.get()));
    }

    pub(crate) fn device(&self) -> &Rc<dyn GraphicsDevice> {
        self.handle.device()
    }
}
