/*
 * mod.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! One handler per node kind the filter rewrites.
//!
//! A handler inspects a single node and answers with a [`Rewrite`]. Returning
//! [`Rewrite::Keep`] declines, and the dispatcher moves on to the next
//! handler in the chain or leaves the node alone.
//!
//! [`Rewrite`]: crate::dispatch::Rewrite
//! [`Rewrite::Keep`]: crate::dispatch::Rewrite::Keep

pub mod cite;
pub mod code_block;
pub mod columns;
pub mod cross_ref;
pub mod figure;
pub mod math;
pub mod table;
