// SPDX-FileCopyrightText: 2026 The cupt developers
// SPDX-License-Identifier: Apache-2.0

#![warn(rust_2018_idioms, unused_lifetimes, unused_qualifications, clippy::all)]
#![deny(unsafe_code)]

pub mod auth;
pub mod pool;
pub mod user;

mod config;

pub use auth::{Challenge, Outcome as AuthOutcome, Tokens};
pub use config::*;
pub use pool::{ClientId, Cursor, Id as PoolId, Page};
pub use user::{Attribute, Record as UserRecord, MANAGED_ATTRIBUTE};
