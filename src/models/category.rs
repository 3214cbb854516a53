use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Subcategory {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Which categories a record belongs to, and which subcategories within each.
///
/// Equality is membership-based: two assignments are equal when they contain
/// the same categories mapped to the same subcategory sets, regardless of the
/// order anything arrived in on the wire. The sorted-container representation
/// makes that hold structurally rather than by a custom comparison.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryAssignments(BTreeMap<Uuid, BTreeSet<Uuid>>);

impl CategoryAssignments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn assign(
        &mut self,
        category_id: Uuid,
        subcategory_ids: impl IntoIterator<Item = Uuid>,
    ) {
        self.0
            .entry(category_id)
            .or_default()
            .extend(subcategory_ids);
    }

    pub fn category_ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.0.keys().copied()
    }

    pub fn subcategories_for(&self, category_id: Uuid) -> Option<&BTreeSet<Uuid>> {
        self.0.get(&category_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Uuid, &BTreeSet<Uuid>)> {
        self.0.iter()
    }
}

impl FromIterator<(Uuid, BTreeSet<Uuid>)> for CategoryAssignments {
    fn from_iter<T: IntoIterator<Item = (Uuid, BTreeSet<Uuid>)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
