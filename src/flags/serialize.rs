//! Serde support
//!
//! A flag serializes as the sequence of its atomic components. Named flags
//! serialize as their name and sign; attached actions are not serialized.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::flags::{
    Flag,
    atomic::{AtomicFlag, NamedFlag, ValueFlag},
    point::Point,
};

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum AtomRef<'a, V> {
    Value(&'a V),
    Named { name: &'a str, sign: bool },
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum AtomRepr<V> {
    Value(V),
    Named { name: String, sign: bool },
}

impl<'a, V> From<&'a AtomicFlag<V>> for AtomRef<'a, V> {
    fn from(atom: &'a AtomicFlag<V>) -> Self {
        match atom {
            AtomicFlag::Value(flag) => AtomRef::Value(flag.value()),
            AtomicFlag::Named(flag) => AtomRef::Named {
                name: flag.name(),
                sign: flag.sign(),
            },
        }
    }
}

impl<V> From<AtomRepr<V>> for AtomicFlag<V> {
    fn from(repr: AtomRepr<V>) -> Self {
        match repr {
            AtomRepr::Value(value) => AtomicFlag::Value(ValueFlag::new(value)),
            AtomRepr::Named { name, sign } => AtomicFlag::Named(NamedFlag::new(name, sign)),
        }
    }
}

impl<V: Serialize> Serialize for AtomicFlag<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        AtomRef::from(self).serialize(serializer)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for AtomicFlag<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        AtomRepr::deserialize(deserializer).map(AtomicFlag::from)
    }
}

impl<V: Serialize> Serialize for ValueFlag<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for ValueFlag<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        V::deserialize(deserializer).map(ValueFlag::new)
    }
}

#[derive(Serialize, Deserialize)]
struct NamedRepr {
    name: String,
    sign: bool,
}

impl<V> Serialize for NamedFlag<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        NamedRepr {
            name: self.name().to_string(),
            sign: self.sign(),
        }
        .serialize(serializer)
    }
}

impl<'de, V> Deserialize<'de> for NamedFlag<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let NamedRepr { name, sign } = NamedRepr::deserialize(deserializer)?;

        Ok(NamedFlag::new(name, sign))
    }
}

impl<V: Serialize> Serialize for Point<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Point::Value(value) => AtomRef::Value(value).serialize(serializer),
            Point::Named(named) => {
                let atom: AtomRef<'_, V> = AtomRef::Named {
                    name: named.name(),
                    sign: named.sign(),
                };
                atom.serialize(serializer)
            }
        }
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Point<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match AtomRepr::deserialize(deserializer)? {
            AtomRepr::Value(value) => Point::Value(value),
            AtomRepr::Named { name, sign } => Point::Named(NamedFlag::new(name, sign)),
        })
    }
}

impl<V: Serialize> Serialize for Flag<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.atoms().map(AtomRef::from))
    }
}

impl<'de, V> Deserialize<'de> for Flag<V>
where
    V: Deserialize<'de> + PartialEq,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let atoms = Vec::<AtomicFlag<V>>::deserialize(deserializer)?;

        Ok(atoms.into_iter().map(Flag::from).collect())
    }
}
