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

//! Axis-aligned rectangles in pixel units of a texture's space.

/// An axis-aligned rectangle expressed in pixel units, with the origin at the
/// top-left of the texture it addresses.
///
/// The expected invariant is `right >= left` and `bottom >= top`. Degenerate
/// rectangles (zero width and/or height) are valid and produce zero-area
/// sprites. The invariant is documented, not enforced: components may also
/// exceed the bounds of the texture the rectangle addresses, in which case the
/// sampled result is unspecified but never an error.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Rectangle {
    /// Horizontal coordinate of the left edge, in pixels.
    pub left: f32,
    /// Horizontal coordinate of the right edge, in pixels.
    pub right: f32,
    /// Vertical coordinate of the top edge, in pixels.
    pub top: f32,
    /// Vertical coordinate of the bottom edge, in pixels.
    pub bottom: f32,
}

impl Rectangle {
    /// Creates a rectangle from its four edge coordinates.
    #[inline]
    pub const fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Creates a rectangle anchored at the origin covering `width * height`
    /// pixels. This is the full-texture rectangle when given a texture's
    /// dimensions.
    #[inline]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self {
            left: 0.0,
            right: width,
            top: 0.0,
            bottom: height,
        }
    }

    /// The horizontal extent, `right - left`.
    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// The vertical extent, `bottom - top`.
    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}
