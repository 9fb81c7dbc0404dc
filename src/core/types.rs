use std::any::{Any, TypeId};
use std::fmt;

/// Runtime descriptor of a collection's declared element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementType {
    name: &'static str,
    type_id: TypeId,
}

impl ElementType {
    pub fn of<T: Any>() -> Self {
        Self {
            name: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn is_compatible(&self, value: &dyn Any) -> bool {
        value.type_id() == self.type_id
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
