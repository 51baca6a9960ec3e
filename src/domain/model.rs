use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

/// A catalog entry. Fields the backend sends that are not modelled here
/// (coordinates, for instance) are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    #[serde(rename = "title", alias = "name")]
    pub name: String,
    pub image: ImageRef,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Place {
    pub fn new(id: impl Into<String>, name: impl Into<String>, image_src: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: ImageRef {
                src: image_src.into(),
                alt: String::new(),
            },
            description: String::new(),
            extra: BTreeMap::new(),
        }
    }
}

/// Ordered selection, most recent first, unique by `id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SelectedPlaces(Vec<Place>);

impl SelectedPlaces {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Builds a selection from an arbitrary list; later duplicates of an id are dropped.
    pub fn from_places(places: Vec<Place>) -> Self {
        let mut unique: Vec<Place> = Vec::with_capacity(places.len());
        for place in places {
            if !unique.iter().any(|p| p.id == place.id) {
                unique.push(place);
            }
        }
        Self(unique)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|p| p.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Place> {
        self.0.iter().find(|p| p.id == id)
    }

    /// Prepends `place` unless its id is already selected.
    pub fn with_selected(&self, place: Place) -> Self {
        if self.contains(&place.id) {
            return self.clone();
        }
        let mut next = Vec::with_capacity(self.0.len() + 1);
        next.push(place);
        next.extend(self.0.iter().cloned());
        Self(next)
    }

    pub fn without(&self, id: &str) -> Self {
        Self(self.0.iter().filter(|p| p.id != id).cloned().collect())
    }

    pub fn as_slice(&self) -> &[Place] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Place> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.0.iter().map(|p| p.id.as_str()).collect()
    }
}
