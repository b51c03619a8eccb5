// SPDX-FileCopyrightText: 2026 The cupt developers
// SPDX-License-Identifier: Apache-2.0

mod client;
mod id;
mod page;

pub use client::*;
pub use id::*;
pub use page::*;
