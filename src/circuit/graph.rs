//! Circuit graph structure.

use indexmap::IndexMap;
use log::debug;

use super::types::Connection;
use crate::components::{Component, ComponentKind, ComponentOptions};
use crate::dsl::NetlistAst;
use crate::error::{LogicError, Result};

/// A circuit: components keyed by id in insertion order, plus connections in
/// insertion order.
///
/// Every connection's endpoints name components owned by this circuit.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    pub(crate) components: IndexMap<String, Component>,
    pub(crate) connections: Vec<Connection>,
    selected: Option<String>,
}

impl Circuit {
    /// Create an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a circuit from a parsed netlist.
    ///
    /// Components are created first, in declaration order, then wires, then
    /// the selection.
    pub fn from_ast(ast: NetlistAst) -> Result<Self> {
        let mut circuit = Circuit::new();

        for decl in ast.components {
            let mut options = ComponentOptions::new();
            options.label = decl.label;
            options.value = decl.value;
            circuit
                .add_component(decl.kind, decl.id, decl.x, decl.y, options)
                .map_err(|e| LogicError::parse(decl.line, e.to_string()))?;
        }

        for wire in ast.wires {
            circuit
                .connect(
                    &wire.from.component,
                    wire.from.pin,
                    &wire.to.component,
                    wire.to.pin,
                )
                .map_err(|e| LogicError::parse(wire.line, e.to_string()))?;
        }

        if let Some(id) = ast.selected {
            circuit.select(&id)?;
        }

        Ok(circuit)
    }

    /// Add a component.
    ///
    /// Fails with [`LogicError::DuplicateId`] if `id` is taken; the circuit is
    /// unchanged on failure.
    pub fn add_component(
        &mut self,
        kind: ComponentKind,
        id: impl Into<String>,
        x: f64,
        y: f64,
        options: ComponentOptions,
    ) -> Result<&Component> {
        let id = id.into();
        if self.components.contains_key(&id) {
            return Err(LogicError::DuplicateId { id });
        }
        debug!("adding {} '{}' at ({}, {})", kind, id, x, y);
        let component = Component::new(id.clone(), kind, x, y, options);
        let entry = self.components.entry(id).or_insert(component);
        Ok(entry)
    }

    /// Add a component by type name.
    ///
    /// Fails with [`LogicError::UnknownType`] for names outside the variant
    /// set, in addition to the failures of [`Circuit::add_component`].
    pub fn add_component_by_name(
        &mut self,
        kind: &str,
        id: impl Into<String>,
        x: f64,
        y: f64,
        options: ComponentOptions,
    ) -> Result<&Component> {
        let kind: ComponentKind = kind.parse()?;
        self.add_component(kind, id, x, y, options)
    }

    /// Remove a component and every connection touching it.
    ///
    /// Returns `None` if no such component exists.
    pub fn remove_component(&mut self, id: &str) -> Option<Component> {
        let component = self.components.shift_remove(id)?;
        let before = self.connections.len();
        self.connections.retain(|c| !c.touches(id));
        debug!(
            "removed '{}' and {} connection(s)",
            id,
            before - self.connections.len()
        );
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        Some(component)
    }

    /// Connect an output pin to an input pin.
    ///
    /// Fails with [`LogicError::UnknownComponent`] if either endpoint is
    /// missing. Pin indices are not checked here; see
    /// [`validate_circuit`](super::validate_circuit).
    pub fn connect(
        &mut self,
        from: &str,
        from_output: usize,
        to: &str,
        to_input: usize,
    ) -> Result<&Connection> {
        for id in [from, to] {
            if !self.components.contains_key(id) {
                return Err(LogicError::unknown_component(id));
            }
        }
        self.connections
            .push(Connection::new(from, from_output, to, to_input));
        Ok(&self.connections[self.connections.len() - 1])
    }

    /// Remove the first connection with the given endpoints.
    pub fn disconnect(
        &mut self,
        from: &str,
        from_output: usize,
        to: &str,
        to_input: usize,
    ) -> bool {
        match self
            .connections
            .iter()
            .position(|c| c.matches(from, from_output, to, to_input))
        {
            Some(idx) => {
                self.connections.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Find a component by id.
    pub fn find_component(&self, id: &str) -> Option<&Component> {
        self.components.get(id)
    }

    /// All components in insertion order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    /// All connections in insertion order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Check if the circuit has no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Move a component on the canvas.
    pub fn move_component(&mut self, id: &str, x: f64, y: f64) -> Result<()> {
        let component = self.component_mut(id)?;
        component.x = x;
        component.y = y;
        Ok(())
    }

    /// Flip an INPUT component. Returns the new value.
    pub fn toggle_input(&mut self, id: &str) -> Result<bool> {
        self.component_mut(id)?.toggle()
    }

    /// Set an INPUT component's value.
    pub fn set_input(&mut self, id: &str, value: bool) -> Result<()> {
        self.component_mut(id)?.set_value(value)
    }

    /// Select a component.
    pub fn select(&mut self, id: &str) -> Result<()> {
        if !self.components.contains_key(id) {
            return Err(LogicError::unknown_component(id));
        }
        self.selected = Some(id.to_string());
        Ok(())
    }

    /// The currently selected component id.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Remove all components and connections.
    pub fn clear(&mut self) {
        self.components.clear();
        self.connections.clear();
        self.selected = None;
    }

    fn component_mut(&mut self, id: &str) -> Result<&mut Component> {
        self.components
            .get_mut(id)
            .ok_or_else(|| LogicError::unknown_component(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> ComponentOptions {
        ComponentOptions::new()
    }

    fn sample() -> Circuit {
        let mut circuit = Circuit::new();
        circuit.add_component(ComponentKind::Input, "a", 0.0, 0.0, opts()).unwrap();
        circuit.add_component(ComponentKind::Input, "b", 0.0, 40.0, opts()).unwrap();
        circuit.add_component(ComponentKind::And, "g", 80.0, 20.0, opts()).unwrap();
        circuit.add_component(ComponentKind::Output, "out", 160.0, 20.0, opts()).unwrap();
        circuit.connect("a", 0, "g", 0).unwrap();
        circuit.connect("b", 0, "g", 1).unwrap();
        circuit.connect("g", 0, "out", 0).unwrap();
        circuit
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let circuit = sample();
        let ids: Vec<&str> = circuit.components().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "g", "out"]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut circuit = sample();
        let err = circuit
            .add_component(ComponentKind::Or, "g", 0.0, 0.0, opts())
            .unwrap_err();
        assert!(matches!(err, LogicError::DuplicateId { id } if id == "g"));
        assert_eq!(circuit.find_component("g").unwrap().kind, ComponentKind::And);
        assert_eq!(circuit.len(), 4);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let mut circuit = Circuit::new();
        let err = circuit
            .add_component_by_name("TRANSISTOR", "t", 0.0, 0.0, opts())
            .unwrap_err();
        assert!(matches!(err, LogicError::UnknownType { .. }));
        assert!(circuit.is_empty());

        circuit
            .add_component_by_name("full_adder", "fa", 0.0, 0.0, opts())
            .unwrap();
        assert_eq!(circuit.find_component("fa").unwrap().kind, ComponentKind::FullAdder);
    }

    #[test]
    fn test_connect_unknown_component() {
        let mut circuit = sample();
        let err = circuit.connect("a", 0, "missing", 0).unwrap_err();
        assert!(matches!(err, LogicError::UnknownComponent { id } if id == "missing"));
        let err = circuit.connect("ghost", 0, "g", 0).unwrap_err();
        assert!(matches!(err, LogicError::UnknownComponent { id } if id == "ghost"));
        assert_eq!(circuit.connections().len(), 3);
    }

    #[test]
    fn test_connect_does_not_check_pin_bounds() {
        let mut circuit = sample();
        let conn = circuit.connect("a", 0, "g", 7).unwrap();
        assert_eq!(conn.to_input, 7);
        assert!(!conn.value);
    }

    #[test]
    fn test_remove_cascades_connections() {
        let mut circuit = sample();
        let removed = circuit.remove_component("g").unwrap();
        assert_eq!(removed.id, "g");
        assert!(circuit.connections().iter().all(|c| !c.touches("g")));
        assert!(circuit.connections().is_empty());
        assert!(circuit.find_component("g").is_none());
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut circuit = sample();
        assert!(circuit.remove_component("nope").is_none());
        assert_eq!(circuit.len(), 4);
        assert_eq!(circuit.connections().len(), 3);
    }

    #[test]
    fn test_remove_clears_selection() {
        let mut circuit = sample();
        circuit.select("a").unwrap();
        circuit.remove_component("b");
        assert_eq!(circuit.selected(), Some("a"));
        circuit.remove_component("a");
        assert_eq!(circuit.selected(), None);
    }

    #[test]
    fn test_disconnect() {
        let mut circuit = sample();
        assert!(circuit.disconnect("b", 0, "g", 1));
        assert!(!circuit.disconnect("b", 0, "g", 1));
        assert_eq!(circuit.connections().len(), 2);
    }

    #[test]
    fn test_toggle_and_set_input() {
        let mut circuit = sample();
        assert!(circuit.toggle_input("a").unwrap());
        circuit.set_input("b", true).unwrap();
        assert!(circuit.find_component("b").unwrap().display_value());
        assert!(matches!(
            circuit.toggle_input("g"),
            Err(LogicError::NotAnInput { .. })
        ));
        assert!(matches!(
            circuit.set_input("zz", true),
            Err(LogicError::UnknownComponent { .. })
        ));
    }

    #[test]
    fn test_move_component() {
        let mut circuit = sample();
        circuit.move_component("g", 12.5, -3.0).unwrap();
        let g = circuit.find_component("g").unwrap();
        approx::assert_relative_eq!(g.x, 12.5);
        approx::assert_relative_eq!(g.y, -3.0);
    }

    #[test]
    fn test_clear() {
        let mut circuit = sample();
        circuit.select("out").unwrap();
        circuit.clear();
        assert!(circuit.is_empty());
        assert!(circuit.connections().is_empty());
        assert!(circuit.selected().is_none());
    }
}
