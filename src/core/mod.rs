//! # Core Module
//!
//! Shared-ownership primitives used by the cooperative scheduler. Everything in
//! the simulation runs on one thread, so resources are reference counted with
//! `Rc` and borrowed dynamically through `RefCell`.
//!
//! ## Usage
//! ```rust
//! use dorfdelf::core::StResource;
//!
//! let counter = StResource::new(0);
//! let handle = counter.clone();
//! *handle.get_mut() += 1;
//! assert_eq!(*counter.get(), 1);
//! ```

pub mod st_resource;

pub use st_resource::StResource;
