//! Insertion-ordered weight mapping.

use super::error::WeightsError;

/// Mapping from asset or component identifier to portfolio weight.
///
/// Iteration follows insertion order, so flags derived from the weights
/// come out in the order the caller supplied them.
///
/// # Examples
///
/// ```
/// use slice_core::types::Weights;
///
/// let weights = Weights::new([("B", 0.3), ("A", 0.7)]).unwrap();
/// assert_eq!(weights.ids().collect::<Vec<_>>(), vec!["B", "A"]);
/// assert_eq!(weights.get("A"), Some(0.7));
/// assert_eq!(weights.get("C"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Weights {
    entries: Vec<(String, f64)>,
}

impl Weights {
    /// Creates a weight mapping.
    ///
    /// # Errors
    ///
    /// - `WeightsError::DuplicateId` if an identifier repeats
    /// - `WeightsError::NonFiniteWeight` if a weight is NaN or infinite
    pub fn new<I, K>(entries: I) -> Result<Self, WeightsError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut weights = Self::default();
        for (id, weight) in entries {
            weights.insert(id.into(), weight)?;
        }
        Ok(weights)
    }

    fn insert(&mut self, id: String, weight: f64) -> Result<(), WeightsError> {
        if !weight.is_finite() {
            return Err(WeightsError::NonFiniteWeight(id));
        }
        if self.contains(&id) {
            return Err(WeightsError::DuplicateId(id));
        }
        self.entries.push((id, weight));
        Ok(())
    }

    /// Returns the weight for an identifier.
    pub fn get(&self, id: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, w)| *w)
    }

    /// Returns true if the identifier has a weight.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == id)
    }

    /// Iterates `(id, weight)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, w)| (k.as_str(), *w))
    }

    /// Iterates identifiers in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the sum of all weights.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Weights {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, weight) in &self.entries {
            map.serialize_entry(id, weight)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Weights {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct WeightsVisitor;

        impl<'de> serde::de::Visitor<'de> for WeightsVisitor {
            type Value = Weights;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of identifier to weight")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Weights, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut weights = Weights::default();
                while let Some((id, weight)) = access.next_entry::<String, f64>()? {
                    weights.insert(id, weight).map_err(serde::de::Error::custom)?;
                }
                Ok(weights)
            }
        }

        deserializer.deserialize_map(WeightsVisitor)
    }
}
