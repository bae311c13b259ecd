//! Extension type registry.

use std::collections::HashMap;
use std::fmt;

use crate::PackValue;

type ExtDecodeFn = Box<dyn Fn(i8, &[u8]) -> PackValue>;

/// Maps signed 8-bit extension tags to application-level reconstruction
/// functions.
///
/// The decoder consults the registry after an ext payload resolves. Tags
/// without a registered handler are not an error: the raw
/// [`PackValue::Ext`] pair is produced instead.
#[derive(Default)]
pub struct ExtRegistry {
    handlers: HashMap<i8, ExtDecodeFn>,
}

impl ExtRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a reconstruction function for `tag`, replacing any
    /// previous handler for the same tag.
    pub fn register<F>(&mut self, tag: i8, f: F)
    where
        F: Fn(i8, &[u8]) -> PackValue + 'static,
    {
        self.handlers.insert(tag, Box::new(f));
    }

    /// Resolves a decoded `(tag, payload)` pair into a value.
    pub fn resolve(&self, tag: i8, payload: Vec<u8>) -> PackValue {
        match self.handlers.get(&tag) {
            Some(f) => f(tag, &payload),
            None => PackValue::Ext(tag, payload),
        }
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for ExtRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<i8> = self.handlers.keys().copied().collect();
        tags.sort_unstable();
        f.debug_struct("ExtRegistry").field("tags", &tags).finish()
    }
}
