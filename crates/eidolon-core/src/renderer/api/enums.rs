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

//! Enumerations shared by the device contract and the wrappers.

use std::fmt;

/// The programmable pipeline stage a shader source is compiled as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// The vertex shader stage.
    Vertex,
    /// The fragment (or pixel) shader stage.
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// The element type of a vertex attribute inside a vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// 32-bit floating point (the default for every built-in attribute).
    F32,
    /// Signed 8-bit integer.
    I8,
    /// Unsigned 8-bit integer.
    U8,
    /// Signed 16-bit integer.
    I16,
    /// Unsigned 16-bit integer.
    U16,
    /// Signed 32-bit integer.
    I32,
    /// Unsigned 32-bit integer.
    U32,
}

/// Defines the filtering mode for texture sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFilter {
    /// Point sampling. Returns the value of the nearest texel.
    Nearest,
    /// Linear interpolation over the four nearest texels.
    Linear,
}

/// Defines how texture coordinates outside `[0, 1]` are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureWrap {
    /// Coordinates are clamped to the edge texel.
    ClampToEdge,
    /// Coordinates wrap around.
    Repeat,
    /// Coordinates wrap around, mirroring at each integer boundary.
    MirrorRepeat,
}

/// Sampling parameters applied when a texture is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureOptions {
    /// Filtering used when the texture is minified.
    pub min_filter: TextureFilter,
    /// Filtering used when the texture is magnified.
    pub mag_filter: TextureFilter,
    /// Wrapping applied on both axes.
    pub wrap: TextureWrap,
}

impl Default for TextureOptions {
    fn default() -> Self {
        Self {
            min_filter: TextureFilter::Linear,
            mag_filter: TextureFilter::Linear,
            wrap: TextureWrap::ClampToEdge,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_linear_clamped() {
        let options = TextureOptions::default();
        assert_eq!(options.min_filter, TextureFilter::Linear);
        assert_eq!(options.mag_filter, TextureFilter::Linear);
        assert_eq!(options.wrap, TextureWrap::ClampToEdge);
    }

    #[test]
    fn shader_stage_display_names() {
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
    }
}
