//! Collector contract and the type-erased data it produces.
//!
//! A collector gathers raw facts about one component (runs a version probe,
//! reads a file) without judging them. Absence of the tool is reported as
//! `Ok(None)`; anything that prevents a trustworthy answer is an error.

use std::any::Any;
use std::fmt;

use super::context::Context;
use crate::error::Result;

/// Raw data produced by a collector.
///
/// Any `'static + Debug` type qualifies; validators recover the concrete
/// type with [`downcast_ref`](trait.ComponentData.html#method.downcast_ref).
pub trait ComponentData: Any + fmt::Debug {
    /// Upcast for downcasting.
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + fmt::Debug> ComponentData for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl dyn ComponentData {
    /// Borrow the data as `T` if that is its concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Whether the data is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

/// Owned collector output.
pub type Data = Box<dyn ComponentData>;

/// Gathers raw facts about a component.
pub trait Collector {
    /// Collect data, `Ok(None)` when there is nothing to report.
    fn collect(&self, ctx: &Context) -> Result<Option<Data>>;
}

impl<F> Collector for F
where
    F: Fn(&Context) -> Result<Option<Data>>,
{
    fn collect(&self, ctx: &Context) -> Result<Option<Data>> {
        self(ctx)
    }
}
