//! Key to record maps (values only).

use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
    ops::ControlFlow,
};

use super::{Container, Dive, Layout};
use crate::record::Record;

impl<K, V, S> Dive for HashMap<K, V, S>
where
    K: 'static,
    V: Dive,
    S: BuildHasher + 'static,
{
    fn layout() -> Layout {
        Layout::contained(V::layout(), Container::Map)
    }

    fn is_absent(&self) -> bool {
        self.is_empty()
    }

    fn as_record(&self) -> Option<&dyn Record> {
        None
    }

    fn as_record_mut(&mut self) -> Option<&mut dyn Record> {
        None
    }

    fn visit(&self, f: &mut dyn FnMut(&dyn Record) -> ControlFlow<()>) -> ControlFlow<()> {
        for value in self.values() {
            value.visit(f)?;
        }
        ControlFlow::Continue(())
    }

    fn visit_mut(
        &mut self,
        f: &mut dyn FnMut(&mut dyn Record) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        // Values are mutated in place; keys never move.
        for value in self.values_mut() {
            value.visit_mut(f)?;
        }
        ControlFlow::Continue(())
    }
}

impl<K, V> Dive for BTreeMap<K, V>
where
    K: 'static,
    V: Dive,
{
    fn layout() -> Layout {
        Layout::contained(V::layout(), Container::Map)
    }

    fn is_absent(&self) -> bool {
        self.is_empty()
    }

    fn as_record(&self) -> Option<&dyn Record> {
        None
    }

    fn as_record_mut(&mut self) -> Option<&mut dyn Record> {
        None
    }

    fn visit(&self, f: &mut dyn FnMut(&dyn Record) -> ControlFlow<()>) -> ControlFlow<()> {
        for value in self.values() {
            value.visit(f)?;
        }
        ControlFlow::Continue(())
    }

    fn visit_mut(
        &mut self,
        f: &mut dyn FnMut(&mut dyn Record) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        for value in self.values_mut() {
            value.visit_mut(f)?;
        }
        ControlFlow::Continue(())
    }
}
