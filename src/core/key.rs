use super::Scalar;
use std::fmt;

/// Separator placed between the parts of a composite key.
pub const KEY_SEPARATOR: char = ':';

/// A lookup key derived from an item: one scalar or an ordered tuple of them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndexKey {
    Scalar(Scalar),
    Composite(Vec<Scalar>),
}

impl IndexKey {
    pub fn composite<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Scalar>,
    {
        Self::Composite(parts.into_iter().map(Into::into).collect())
    }

    /// `true` when the key participates in no lookup: an empty text scalar or
    /// a composite without parts.
    pub fn is_absent(&self) -> bool {
        match self {
            Self::Scalar(scalar) => scalar.is_blank(),
            Self::Composite(parts) => parts.is_empty(),
        }
    }

    /// Joins the key into its canonical lookup form.
    ///
    /// Returns `None` for absent keys. Parts are joined in order with
    /// [`KEY_SEPARATOR`], so `Integer(2)`, `Text("2")` and `Composite([2])`
    /// all canonicalize to `"2"`, and text parts containing the separator can
    /// collide with composites.
    pub fn canonicalize(&self) -> Option<CanonicalKey> {
        if self.is_absent() {
            return None;
        }
        let joined = match self {
            Self::Scalar(scalar) => scalar.to_string(),
            Self::Composite(parts) => {
                let mut joined = String::new();
                for (position, part) in parts.iter().enumerate() {
                    if position > 0 {
                        joined.push(KEY_SEPARATOR);
                    }
                    joined.push_str(&part.to_string());
                }
                joined
            }
        };
        Some(CanonicalKey(joined))
    }
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(scalar) => write!(f, "{}", scalar),
            Self::Composite(parts) => {
                write!(f, "(")?;
                for (position, part) in parts.iter().enumerate() {
                    if position > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", part)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// The normalized string form under which a key is stored in the index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Scalar> for IndexKey {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<Vec<Scalar>> for IndexKey {
    fn from(parts: Vec<Scalar>) -> Self {
        Self::Composite(parts)
    }
}

macro_rules! scalar_index_key {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for IndexKey {
                fn from(value: $ty) -> Self {
                    Self::Scalar(Scalar::from(value))
                }
            }
        )*
    };
}

scalar_index_key!(i64, i32, u32, String, &str, &String);

macro_rules! composite_index_key {
    ($($ty:ident $part:ident),+) => {
        impl<$($ty),+> From<($($ty,)+)> for IndexKey
        where
            $($ty: Into<Scalar>),+
        {
            fn from(($($part,)+): ($($ty,)+)) -> Self {
                Self::Composite(vec![$($part.into()),+])
            }
        }
    };
}

composite_index_key!(A a, B b);
composite_index_key!(A a, B b, C c);
composite_index_key!(A a, B b, C c, D d);
