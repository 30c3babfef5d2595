//! Optional indirections: `Option<T>` and `Box<T>`.

use std::ops::ControlFlow;

use super::{Dive, Layout};
use crate::record::Record;

impl<T> Dive for Option<T>
where
    T: Dive,
{
    fn layout() -> Layout {
        T::layout()
    }

    fn is_absent(&self) -> bool {
        self.as_ref().is_none_or(Dive::is_absent)
    }

    fn as_record(&self) -> Option<&dyn Record> {
        self.as_ref().and_then(Dive::as_record)
    }

    fn as_record_mut(&mut self) -> Option<&mut dyn Record> {
        self.as_mut().and_then(Dive::as_record_mut)
    }

    fn visit(&self, f: &mut dyn FnMut(&dyn Record) -> ControlFlow<()>) -> ControlFlow<()> {
        match self {
            Some(value) => value.visit(f),
            None => ControlFlow::Continue(()),
        }
    }

    fn visit_mut(
        &mut self,
        f: &mut dyn FnMut(&mut dyn Record) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        match self {
            Some(value) => value.visit_mut(f),
            None => ControlFlow::Continue(()),
        }
    }
}

impl<T> Dive for Box<T>
where
    T: Dive,
{
    fn layout() -> Layout {
        T::layout()
    }

    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }

    fn as_record(&self) -> Option<&dyn Record> {
        (**self).as_record()
    }

    fn as_record_mut(&mut self) -> Option<&mut dyn Record> {
        (**self).as_record_mut()
    }

    fn visit(&self, f: &mut dyn FnMut(&dyn Record) -> ControlFlow<()>) -> ControlFlow<()> {
        (**self).visit(f)
    }

    fn visit_mut(
        &mut self,
        f: &mut dyn FnMut(&mut dyn Record) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        (**self).visit_mut(f)
    }
}
