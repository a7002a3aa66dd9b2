// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cached remote state.
//!
//! A [`StateCache`] holds one [`Snapshot`] of a remote document and refetches
//! it once the snapshot is older than the staleness window. The client keeps
//! the status document in one of these, so repeated accessor calls within
//! the window cost no network traffic.

mod cache;

pub use cache::{Snapshot, StateCache};
