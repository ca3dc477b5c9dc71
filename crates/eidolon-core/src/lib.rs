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

//! # Eidolon Core
//!
//! Backend-agnostic core of a minimal 2D renderer: pixel-space rectangles,
//! sprite quad construction with atlas-safe texture coordinates, shader
//! program state, and on/off-screen render targets, all expressed against the
//! [`GraphicsDevice`](renderer::GraphicsDevice) contract implemented by a
//! concrete backend crate.
//!
//! Window and context creation, input, audio, and image decoding are external
//! collaborators; transforms are consumed as already-constructed [`glam`]
//! values.

#![warn(missing_docs)]

pub mod math;
pub mod renderer;
