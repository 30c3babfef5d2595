//! String views of annotated field values.
//!
//! `data` leaves must be an owned string (`String`, `Box<str>` or
//! `Cow<'static, str>`) or a `String` behind at most one optional or boxed
//! indirection. Newtypes around a string are not recognized. `subjectID`
//! fields must be convertible to a string. Both are
//! decided from the declared [`ValueType`] when the type is scanned, so the
//! walker only downcasts to a type it already knows.

use std::{any::Any, borrow::Cow, sync::Arc};

use crate::record::ValueType;

/// Supported representations of a `data` leaf.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TextSlot {
    Plain,
    Optional,
    Boxed,
    OptionalBoxed,
    BoxedStr,
    Cow,
}

impl TextSlot {
    /// Classifies a declared field type; `None` for non-string types.
    pub(crate) fn of(value: ValueType) -> Option<Self> {
        if value.is::<String>() {
            Some(Self::Plain)
        } else if value.is::<Option<String>>() {
            Some(Self::Optional)
        } else if value.is::<Box<String>>() {
            Some(Self::Boxed)
        } else if value.is::<Option<Box<String>>>() {
            Some(Self::OptionalBoxed)
        } else if value.is::<Box<str>>() {
            Some(Self::BoxedStr)
        } else if value.is::<Cow<'static, str>>() {
            Some(Self::Cow)
        } else {
            None
        }
    }

    /// Reads the current text, `None` for zero values.
    ///
    /// An empty string is a zero value unless it sits inside a present
    /// optional.
    pub(crate) fn get(self, value: &dyn Any) -> Option<&str> {
        match self {
            Self::Plain => value
                .downcast_ref::<String>()
                .map(String::as_str)
                .filter(|text| !text.is_empty()),
            Self::Optional => value
                .downcast_ref::<Option<String>>()
                .and_then(Option::as_deref),
            Self::Boxed => value
                .downcast_ref::<Box<String>>()
                .map(|text| text.as_str())
                .filter(|text| !text.is_empty()),
            Self::OptionalBoxed => value
                .downcast_ref::<Option<Box<String>>>()
                .and_then(Option::as_ref)
                .map(|text| text.as_str()),
            Self::BoxedStr => value
                .downcast_ref::<Box<str>>()
                .map(|text| &**text)
                .filter(|text| !text.is_empty()),
            Self::Cow => value
                .downcast_ref::<Cow<'static, str>>()
                .map(|text| &**text)
                .filter(|text| !text.is_empty()),
        }
    }

    /// Overwrites the text in place. Absent optionals are left untouched.
    pub(crate) fn set(self, value: &mut dyn Any, text: String) {
        let slot = match self {
            Self::BoxedStr => {
                if let Some(slot) = value.downcast_mut::<Box<str>>() {
                    *slot = text.into_boxed_str();
                }
                return;
            }
            Self::Cow => {
                if let Some(slot) = value.downcast_mut::<Cow<'static, str>>() {
                    *slot = Cow::Owned(text);
                }
                return;
            }
            Self::Plain => value.downcast_mut::<String>(),
            Self::Optional => value
                .downcast_mut::<Option<String>>()
                .and_then(Option::as_mut),
            Self::Boxed => value
                .downcast_mut::<Box<String>>()
                .map(|text| &mut **text),
            Self::OptionalBoxed => value
                .downcast_mut::<Option<Box<String>>>()
                .and_then(Option::as_mut)
                .map(|text| &mut **text),
        };
        if let Some(slot) = slot {
            *slot = text;
        }
    }
}

macro_rules! subject_conversions {
    ($($int:ty),* $(,)?) => {
        /// Returns `true` if a `subjectID` field may be declared with this type.
        pub(crate) fn is_subject_type(value: ValueType) -> bool {
            value.is::<String>()
                || value.is::<&'static str>()
                || value.is::<Box<str>>()
                || value.is::<Cow<'static, str>>()
                || value.is::<Arc<str>>()
                || value.is::<char>()
                $(|| value.is::<$int>())*
        }

        /// Converts a subject field value to its string form.
        pub(crate) fn subject_text(value: &dyn Any) -> Option<String> {
            if let Some(text) = value.downcast_ref::<String>() {
                return Some(text.clone());
            }
            if let Some(text) = value.downcast_ref::<&'static str>() {
                return Some((*text).to_string());
            }
            if let Some(text) = value.downcast_ref::<Box<str>>() {
                return Some(text.to_string());
            }
            if let Some(text) = value.downcast_ref::<Cow<'static, str>>() {
                return Some(text.to_string());
            }
            if let Some(text) = value.downcast_ref::<Arc<str>>() {
                return Some(text.to_string());
            }
            if let Some(ch) = value.downcast_ref::<char>() {
                return Some(ch.to_string());
            }
            $(
                if let Some(number) = value.downcast_ref::<$int>() {
                    return Some(number.to_string());
                }
            )*
            None
        }
    };
}

subject_conversions!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
);
