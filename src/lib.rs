#![doc(html_root_url = "https://docs.rs/dom-guard/0.0.1")]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Guarded single-element DOM selection and mutation.
//!
//! - [`required`], [`optional`], [`by_id`] and [`exactly_one`] select nodes with an explicit cardinality contract.
//! - [`assert_mutable`] separates HTML elements from bare elements like SVG nodes.
//! - The mutation primitives ([`set_text`], [`set_attribute`], [`toggle_class`], …) narrow before they mutate,
//!   while the `*_any` class helpers deliberately don't.
//! - [`ensure_live`] swaps a stale handle for a fresh one after the tree was restructured.
//! - [`Scope`] binds all of the above to one root.
//!
//! Everything is generic over [`Dom`], implemented for the browser in [`web`] and headlessly in [`memory`].

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod components;
pub mod dom;
mod error;
mod live;
pub mod memory;
mod mutate;
mod narrow;
mod scope;
mod select;
pub mod web;

pub use dom::{Capability, Dom, NodeKind, Root};
pub use error::{Error, Result};
pub use live::ensure_live;
pub use mutate::{add_class, add_class_any, remove_class, remove_class_any, set_attribute, set_attribute_any, set_markup, set_style, set_text, toggle_class, toggle_class_any};
pub use narrow::assert_mutable;
pub use scope::Scope;
pub use select::{by_id, exactly_one, optional, required};
