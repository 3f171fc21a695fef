//! Whole-collection editing of nested line items
//!
//! The backend has no per-item endpoints: every edit resends the complete
//! array. Editors therefore compute the new collection up front and describe
//! it as a [`ReplaceCollection`] command; the editor adopts the new items only
//! after the server accepted the command.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::fetch::ApiClient;

use super::OwnedResource;

/// An item embedded in a shop or hospital
pub trait LineItem: Clone + Serialize + Send + Sync {
    /// Name of the collection in URLs and request bodies, e.g. "medicines"
    const COLLECTION: &'static str;
    /// Name of one item in messages, e.g. "medicine"
    const LABEL: &'static str;

    type Draft: ItemDraft<Item = Self>;

    /// Id the backend assigned to the embedded document, if any
    fn backend_id(&self) -> Option<&str>;

    fn set_backend_id(&mut self, id: Option<String>);

    /// The matching collection of an owner's resource, if it has one
    fn collection_in(resource: &mut OwnedResource) -> Option<&mut Vec<Self>>;
}

/// Form state for one item, all fields as typed
pub trait ItemDraft: Clone + Default {
    type Item;

    /// Check required fields and parse numbers
    fn validate(&self) -> Result<Self::Item>;

    /// Prefill a form from an existing item
    fn from_item(item: &Self::Item) -> Self;
}

/// Record that exposes one nested collection
pub trait CollectionOwner<T: LineItem> {
    /// Path of the owning resource, e.g. `/medical-shops/42`
    fn resource_path(&self) -> String;

    fn collection(&self) -> &[T];
}

/// Which user action produced a command; decides the alert text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Add,
    Save,
    Delete,
    UpdateStock,
    Replace,
}

impl EditAction {
    fn failure_message(&self, label: &str, collection: &str) -> String {
        match self {
            EditAction::Add => format!("Failed to add {}", label),
            EditAction::Save => format!("Failed to save {}", label),
            EditAction::Delete => format!("Failed to delete {}", label),
            EditAction::UpdateStock => "Failed to update stock".to_string(),
            EditAction::Replace => format!("Failed to update {}", collection),
        }
    }
}

/// `PUT <resource>/<collection>` with the complete new array
///
/// Sending the same command twice leaves the backend in the same state.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaceCollection<T> {
    resource_path: String,
    items: Vec<T>,
    action: EditAction,
}

impl<T: LineItem> ReplaceCollection<T> {
    pub fn new(resource_path: impl Into<String>, items: Vec<T>) -> Self {
        Self::with_action(resource_path, items, EditAction::Replace)
    }

    pub(super) fn with_action(resource_path: impl Into<String>, items: Vec<T>, action: EditAction) -> Self {
        Self {
            resource_path: resource_path.into(),
            items,
            action,
        }
    }

    /// Path of the resource that owns the collection
    pub fn resource_path(&self) -> &str {
        &self.resource_path
    }

    pub fn path(&self) -> String {
        format!("{}/{}", self.resource_path, T::COLLECTION)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn action(&self) -> EditAction {
        self.action
    }

    /// `{ "<collection>": [...] }`
    pub fn body(&self) -> Result<serde_json::Value> {
        let mut body = serde_json::Map::new();
        body.insert(T::COLLECTION.to_string(), serde_json::to_value(&self.items)?);
        Ok(serde_json::Value::Object(body))
    }

    /// Alert shown when the server rejects the command
    pub fn failure_message(&self) -> String {
        self.action.failure_message(T::LABEL, T::COLLECTION)
    }

    pub async fn send(&self, api: &ApiClient) -> Result<()> {
        log::info!(
            "replacing {} with {} item(s) at {}",
            T::COLLECTION,
            self.items.len(),
            self.resource_path
        );
        api.put(&self.path()).json(&self.body()?)?.send_empty().await
    }
}

/// Editor for one nested collection
#[derive(Debug, Clone)]
pub struct CollectionEditor<T: LineItem> {
    resource_path: String,
    items: Vec<T>,
    editing: Option<usize>,
}

impl<T: LineItem> CollectionEditor<T> {
    pub fn new(resource_path: impl Into<String>, items: Vec<T>) -> Self {
        Self {
            resource_path: resource_path.into(),
            items,
            editing: None,
        }
    }

    pub fn from_owner<O: CollectionOwner<T>>(owner: &O) -> Self {
        Self::new(owner.resource_path(), owner.collection().to_vec())
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn resource_path(&self) -> &str {
        &self.resource_path
    }

    /// Index of the item whose edit form is open
    pub fn editing(&self) -> Option<usize> {
        self.editing
    }

    /// Open the edit form for one item, prefilled
    pub fn begin_edit(&mut self, index: usize) -> Option<T::Draft> {
        let draft = T::Draft::from_item(self.items.get(index)?);
        self.editing = Some(index);
        Some(draft)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    fn command(&self, items: Vec<T>, action: EditAction) -> ReplaceCollection<T> {
        ReplaceCollection::with_action(self.resource_path.clone(), items, action)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(Error::validation(format!("No {} at position {}", T::LABEL, index + 1)))
        }
    }

    /// Current items plus the drafted one
    pub fn add(&self, draft: &T::Draft) -> Result<ReplaceCollection<T>> {
        let item = draft.validate()?;
        let mut items = self.items.clone();
        items.push(item);
        Ok(self.command(items, EditAction::Add))
    }

    /// Current items with the one at `index` replaced by the draft
    pub fn edit(&self, index: usize, draft: &T::Draft) -> Result<ReplaceCollection<T>> {
        self.check_index(index)?;
        let mut item = draft.validate()?;
        item.set_backend_id(self.items[index].backend_id().map(str::to_string));
        let mut items = self.items.clone();
        items[index] = item;
        Ok(self.command(items, EditAction::Save))
    }

    /// Current items without the one at `index`
    pub fn remove(&self, index: usize) -> Result<ReplaceCollection<T>> {
        self.check_index(index)?;
        let mut items = self.items.clone();
        items.remove(index);
        Ok(self.command(items, EditAction::Delete))
    }

    /// Adopt the items of an accepted command
    pub fn apply(&mut self, command: &ReplaceCollection<T>) {
        self.items = command.items.clone();
        if command.action == EditAction::Save {
            self.editing = None;
        }
    }

    /// Send the command and adopt its items once the server accepted it;
    /// on failure the editor is left untouched
    pub async fn commit(&mut self, api: &ApiClient, command: &ReplaceCollection<T>) -> Result<()> {
        if let Err(err) = command.send(api).await {
            log::warn!("{}: {}", command.failure_message(), err);
            return Err(err);
        }
        self.apply(command);
        Ok(())
    }
}
