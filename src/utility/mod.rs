// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! fs
//!   walk:   parallel_walk(), find_matching(), WalkOptions
//!   copy:   copy_entry(), copy_top_level(), remove_entry()
//!   perms:  set_writable(), set_tree_permissions()
//! ```

pub mod fs;
