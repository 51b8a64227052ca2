//! In-memory implementations for testing and development
//!
//! Uses RwLock for thread-safe access, mirroring what a real backend would
//! do with a connection pool.

use crate::core::condition::Condition;
use crate::core::content_type::{ContentType, TypeProvider};
use crate::core::criteria::{Criteria, SortClause, SortDirection};
use crate::core::error::{SiftResult, StorageError, TypeError};
use crate::handlers::OptionGroupSource;
use crate::repository::{ContentItem, QueryResult, Repository};
use async_trait::async_trait;
use indexmap::IndexMap;
use rand::seq::SliceRandom;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory repository for one content type
///
/// Executes criteria by filtering, sorting and truncating a snapshot of the
/// item list. Hydration flags pull from side tables: translations overwrite
/// item fields, associations are attached under an `"associations"` field.
#[derive(Clone)]
pub struct InMemoryRepository {
    content_type: ContentType,
    items: Arc<RwLock<Vec<ContentItem>>>,
    translations: Arc<RwLock<HashMap<i64, Map<String, Value>>>>,
    associations: Arc<RwLock<HashMap<i64, Vec<Value>>>>,
}

impl InMemoryRepository {
    pub fn new(content_type: ContentType) -> Self {
        Self {
            content_type,
            items: Arc::new(RwLock::new(Vec::new())),
            translations: Arc::new(RwLock::new(HashMap::new())),
            associations: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn insert(&self, item: ContentItem) -> SiftResult<()> {
        let mut items = self.items.write().map_err(lock_poisoned)?;
        items.push(item);
        Ok(())
    }

    /// Store translated field overrides for one item
    pub fn set_translation(&self, item_id: i64, fields: Map<String, Value>) -> SiftResult<()> {
        let mut translations = self.translations.write().map_err(lock_poisoned)?;
        translations.insert(item_id, fields);
        Ok(())
    }

    /// Attach an association record to one item
    pub fn add_association(&self, item_id: i64, record: Value) -> SiftResult<()> {
        let mut associations = self.associations.write().map_err(lock_poisoned)?;
        associations.entry(item_id).or_default().push(record);
        Ok(())
    }

    fn matches(item: &ContentItem, condition: &Condition) -> bool {
        match condition {
            Condition::Property { property, values } => item
                .property(property)
                .map(|value| values.contains(&value))
                .unwrap_or(false),
            Condition::Variant { option_ids, .. } => item
                .option_ids
                .iter()
                .any(|id| option_ids.contains(id)),
        }
    }

    fn apply_sort(items: &mut [ContentItem], sort: &[SortClause]) {
        if sort
            .iter()
            .any(|clause| clause.direction == SortDirection::Random)
        {
            items.shuffle(&mut rand::thread_rng());
            return;
        }

        // Later clauses are subordinate tie-breaks: applying them first with
        // a stable sort yields the combined order.
        for clause in sort.iter().rev() {
            items.sort_by(|a, b| {
                let ordering = cmp_property(a, b, &clause.property);
                match clause.direction {
                    SortDirection::Descending => ordering.reverse(),
                    _ => ordering,
                }
            });
        }
    }

    fn hydrate(&self, items: &mut Vec<ContentItem>, criteria: &Criteria) -> SiftResult<()> {
        if criteria.load_translations {
            let translations = self.translations.read().map_err(lock_poisoned)?;
            for item in items.iter_mut() {
                if let Some(fields) = translations.get(&item.id) {
                    for (key, value) in fields {
                        item.fields.insert(key.clone(), value.clone());
                    }
                }
            }
        }

        if criteria.load_associations {
            let associations = self.associations.read().map_err(lock_poisoned)?;
            for item in items.iter_mut() {
                if let Some(records) = associations.get(&item.id) {
                    item.fields
                        .insert("associations".to_string(), Value::from(records.clone()));
                }
            }
        }

        Ok(())
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn find_all(&self, criteria: &Criteria) -> SiftResult<QueryResult> {
        let mut items: Vec<ContentItem> = {
            let items = self.items.read().map_err(lock_poisoned)?;
            items
                .iter()
                .filter(|item| {
                    criteria
                        .conditions()
                        .iter()
                        .all(|condition| Self::matches(item, condition))
                })
                .cloned()
                .collect()
        };

        Self::apply_sort(&mut items, criteria.sort());

        if let Some(limit) = criteria.limit {
            items.truncate(limit as usize);
        }

        self.hydrate(&mut items, criteria)?;

        tracing::debug!(
            content_type = self.content_type.name.as_str(),
            matched = items.len(),
            "Executed criteria"
        );

        Ok(QueryResult {
            items,
            content_type: self.content_type.clone(),
        })
    }
}

fn lock_poisoned<E: std::fmt::Display>(err: E) -> StorageError {
    StorageError::LockPoisoned {
        message: err.to_string(),
    }
}

fn cmp_property(a: &ContentItem, b: &ContentItem, property: &str) -> Ordering {
    match (a.property(property), b.property(property)) {
        (Some(va), Some(vb)) => cmp_values(&va, &vb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn cmp_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(na), Value::Number(nb)) => na
            .as_f64()
            .partial_cmp(&nb.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(sa), Value::String(sb)) => sa.cmp(sb),
        (Value::Bool(ba), Value::Bool(bb)) => ba.cmp(bb),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

/// In-memory grouping lookup over a configurator-options row table
///
/// Aggregation order follows row insertion order, the way a grouped SQL
/// query follows table order.
#[derive(Clone, Default)]
pub struct InMemoryOptionGroups {
    rows: Arc<RwLock<Vec<(i64, i64)>>>,
}

impl InMemoryOptionGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one (option id, group id) row
    pub fn insert(&self, option_id: i64, group_id: i64) -> SiftResult<()> {
        let mut rows = self.rows.write().map_err(lock_poisoned)?;
        rows.push((option_id, group_id));
        Ok(())
    }
}

#[async_trait]
impl OptionGroupSource for InMemoryOptionGroups {
    async fn grouped_options(&self, option_ids: &[i64]) -> SiftResult<IndexMap<i64, Vec<i64>>> {
        let rows = self.rows.read().map_err(lock_poisoned)?;

        let mut grouped: IndexMap<i64, Vec<i64>> = IndexMap::new();
        for (option_id, group_id) in rows.iter() {
            if option_ids.contains(option_id) {
                grouped.entry(*group_id).or_default().push(*option_id);
            }
        }

        Ok(grouped)
    }
}

/// In-memory type metadata provider
#[derive(Clone, Default)]
pub struct InMemoryTypeProvider {
    types: Arc<RwLock<HashMap<String, ContentType>>>,
}

impl InMemoryTypeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, content_type: ContentType) -> SiftResult<()> {
        let mut types = self.types.write().map_err(lock_poisoned)?;
        types.insert(content_type.name.clone(), content_type);
        Ok(())
    }
}

#[async_trait]
impl TypeProvider for InMemoryTypeProvider {
    async fn get_type(&self, type_id: &str) -> SiftResult<ContentType> {
        let types = self.types.read().map_err(lock_poisoned)?;
        types.get(type_id).cloned().ok_or_else(|| {
            TypeError::NotFound {
                type_id: type_id.to_string(),
            }
            .into()
        })
    }
}
