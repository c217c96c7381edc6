// Copyright 2026 Daniel Pelikan
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

//! Application-layer method channel.
//!
//! Call/response types, the dispatch handler, and the line-oriented frontend.

mod frontend;
mod handler;
mod method;

pub use frontend::{run_lines, run_stdio};
pub use handler::MethodChannelHandler;
pub use method::{
    MethodCall, MethodResponse, ARG_MESSAGE, METHOD_GET_DATA, METHOD_SEND_MESSAGE,
};
