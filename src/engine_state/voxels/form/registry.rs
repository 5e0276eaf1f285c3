//! # Form Registry
//!
//! The catalog of block shapes. It is built once when the world is created and
//! handed by reference (`Arc<FormRegistry>`) to the voxel grid and the mesh
//! builder. Forms are never mutated after registration.

use std::collections::HashMap;

use log::info;

use super::{geometry, FormKind, FormVertex};

/// Immutable geometry of a single form.
#[derive(Debug, Clone)]
pub struct Form {
    /// Which form this is.
    pub kind: FormKind,
    /// Vertices in block-local coordinates.
    pub vertices: Vec<FormVertex>,
    /// Triangle list indexing into `vertices`.
    pub indices: Vec<u32>,
}

impl Form {
    fn new(kind: FormKind) -> Self {
        let (vertices, indices) = match kind {
            FormKind::Void => (Vec::new(), Vec::new()),
            FormKind::Block | FormKind::Hidden => geometry::cube(),
            FormKind::Ramp(direction) => geometry::ramp(direction),
        };

        Form {
            kind,
            vertices,
            indices,
        }
    }

    /// The serialized name of this form.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Number of vertices in the form's geometry.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }
}

/// Registry holding the geometry of every form kind.
///
/// # Examples
///
/// ```
/// use dorfdelf::engine_state::voxels::form::{FormKind, FormRegistry};
///
/// let registry = FormRegistry::new();
/// assert_eq!(registry.get(FormKind::Block).num_vertices(), 24);
/// assert_eq!(registry.lookup("RampWN").map(|f| f.name()), Some("RampWN"));
/// ```
#[derive(Debug)]
pub struct FormRegistry {
    /// Forms in registration order.
    forms: Vec<Form>,
    /// Map from kind to its slot in `forms`.
    slots: HashMap<FormKind, usize>,
}

impl FormRegistry {
    /// Builds every form.
    pub fn new() -> Self {
        let forms: Vec<Form> = FormKind::all().map(Form::new).collect();
        let slots = forms
            .iter()
            .enumerate()
            .map(|(slot, form)| (form.kind, slot))
            .collect();

        info!(
            "Registered forms: {:?}",
            forms.iter().map(Form::name).collect::<Vec<_>>()
        );

        FormRegistry { forms, slots }
    }

    /// Geometry of `kind`.
    pub fn get(&self, kind: FormKind) -> &Form {
        // Every kind is registered in `new`.
        &self.forms[self.slots[&kind]]
    }

    /// Finds a form by its serialized name.
    ///
    /// # Returns
    /// `None` if the name is not registered.
    pub fn lookup(&self, name: &str) -> Option<&Form> {
        FormKind::from_name(name)
            .and_then(|kind| self.slots.get(&kind))
            .map(|&slot| &self.forms[slot])
    }

    /// Registered forms in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Form> {
        self.forms.iter()
    }

    /// Names of all registered forms, in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.forms.iter().map(Form::name).collect()
    }

    /// Number of registered forms.
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    /// Whether no form is registered.
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

impl Default for FormRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::form::RampDirection;

    #[test]
    fn void_has_no_geometry() {
        let registry = FormRegistry::new();
        let void = registry.get(FormKind::Void);
        assert!(void.vertices.is_empty());
        assert!(void.indices.is_empty());
    }

    #[test]
    fn hidden_placeholder_matches_cube_layout() {
        let registry = FormRegistry::new();
        assert_eq!(
            registry.get(FormKind::Hidden).num_vertices(),
            registry.get(FormKind::Block).num_vertices()
        );
    }

    #[test]
    fn names_follow_registration_order() {
        let registry = FormRegistry::new();
        let names = registry.names();
        assert_eq!(names.len(), registry.len());
        assert_eq!(names[0], "Void");
        assert_eq!(names[1], "Block");
        assert_eq!(names.last(), Some(&"Hidden"));
    }

    #[test]
    fn lookup_by_name() {
        let registry = FormRegistry::new();
        assert_eq!(
            registry.lookup("RampSW").map(|form| form.kind),
            Some(FormKind::Ramp(RampDirection::SW))
        );
        assert!(registry.lookup("Stairs").is_none());
    }
}
