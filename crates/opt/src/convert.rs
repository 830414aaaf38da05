//! Conversions between `Opt` and `Option`, std collections, and serde.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::opt::Opt;

impl<T> From<Option<T>> for Opt<T> {
    fn from(value: Option<T>) -> Self { Opt::of_nullable(value) }
}

impl<T> From<Opt<T>> for Option<T> {
    fn from(value: Opt<T>) -> Self { value.into_option() }
}

impl<T> Opt<T> {
    /// Zero or one element.
    pub fn into_vec(self) -> Vec<T> { self.into_iter().collect() }

    pub fn into_set(self) -> HashSet<T>
    where
        T: Eq + Hash,
    {
        self.into_iter().collect()
    }

    /// Single-entry map built from the value, or an empty map.
    pub fn into_map<K, V, KF, VF>(self, key: KF, value: VF) -> HashMap<K, V>
    where
        K: Eq + Hash,
        KF: FnOnce(&T) -> K,
        VF: FnOnce(T) -> V,
    {
        let mut out = HashMap::new();
        if let Some(v) = self.into_option() {
            out.insert(key(&v), value(v));
        }
        out
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use core::fmt;
    use core::marker::PhantomData;

    use serde::de::{self, Deserialize, Deserializer, Visitor};
    use serde::ser::{Serialize, Serializer};

    use crate::opt::Opt;

    /// Same wire shape as `Option<T>`. Serializing forces a `Lazy`.
    impl<T: Serialize> Serialize for Opt<T> {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match self.as_option() {
                Some(value) => serializer.serialize_some(value),
                None => serializer.serialize_none(),
            }
        }
    }

    impl<'de, T: Deserialize<'de>> Deserialize<'de> for Opt<T> {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            struct OptVisitor<T>(PhantomData<T>);

            impl<'de, T: Deserialize<'de>> Visitor<'de> for OptVisitor<T> {
                type Value = Opt<T>;

                fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                    write!(f, "an optional value")
                }

                fn visit_none<E>(self) -> Result<Self::Value, E>
                where
                    E: de::Error,
                {
                    Ok(Opt::None)
                }

                fn visit_unit<E>(self) -> Result<Self::Value, E>
                where
                    E: de::Error,
                {
                    Ok(Opt::None)
                }

                fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
                where
                    D: Deserializer<'de>,
                {
                    T::deserialize(deserializer).map(Opt::Some)
                }
            }

            deserializer.deserialize_option(OptVisitor(PhantomData))
        }
    }
}
