// mixvault: version lines and snapshots for music projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities with parallel traversal, copying and permission flips.
//!
//! ```text
//! walk:   parallel_walk()      ignore::WalkParallel (multi-core)
//!         find_matching()      predicate over relative paths
//!         WalkOptions          skip_dirs (dot-files always skipped)
//! copy:   copy_entry()         file or recursive directory copy
//!         copy_top_level()     best-effort, per-entry failures logged
//!         remove_entry()       idempotent delete
//! perms:  set_writable()       owner write bit on/off
//!         set_tree_permissions()
//! ```

pub mod copy;
pub mod perms;
pub mod walk;
