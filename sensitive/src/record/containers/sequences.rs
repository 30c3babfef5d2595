//! Ordered sequences: `Vec<T>` and `VecDeque<T>`.

use std::{collections::VecDeque, ops::ControlFlow};

use super::{Container, Dive, Layout};
use crate::record::Record;

macro_rules! impl_dive_sequence {
    ($($ty:ident),* $(,)?) => {
        $(
            impl<T> Dive for $ty<T>
            where
                T: Dive,
            {
                fn layout() -> Layout {
                    Layout::contained(T::layout(), Container::Sequence)
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

                fn visit(
                    &self,
                    f: &mut dyn FnMut(&dyn Record) -> ControlFlow<()>,
                ) -> ControlFlow<()> {
                    for element in self {
                        element.visit(f)?;
                    }
                    ControlFlow::Continue(())
                }

                fn visit_mut(
                    &mut self,
                    f: &mut dyn FnMut(&mut dyn Record) -> ControlFlow<()>,
                ) -> ControlFlow<()> {
                    for element in self {
                        element.visit_mut(f)?;
                    }
                    ControlFlow::Continue(())
                }
            }
        )*
    };
}

impl_dive_sequence!(Vec, VecDeque);
