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

//! # Eidolon Glow
//!
//! The concrete OpenGL backend for `eidolon-core`, implemented over the
//! [`glow`] bindings for native targets.
//!
//! The caller creates the GL context (winit/glutin, SDL, ...) and makes it
//! current on the calling thread before wrapping it in a [`GlowDevice`]; this
//! crate neither creates nor selects a context.

mod conversions;
mod device;

pub use device::GlowDevice;
