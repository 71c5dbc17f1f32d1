use crate::model::{EntityKind, FilledForm, Notification, PdfTemplate, SupportTicket, WorkOrder};
use crate::numbering::{next_number, parse_number, TICKET_PREFIX, WORK_ORDER_PREFIX};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// An entity stored in one of the store's collections.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: EntityKind;

    fn id(&self) -> &str;

    /// Parsed human number, for records that carry one.
    fn sequence_number(&self) -> Option<u32> {
        None
    }
}

/// A record whose collection mints human numbers ("OT-00001").
pub trait Numbered: Record {
    const NUMBER_PREFIX: &'static str;

    fn number(&self) -> &str;
}

impl Record for WorkOrder {
    const KIND: EntityKind = EntityKind::WorkOrder;

    fn id(&self) -> &str {
        &self.id
    }

    fn sequence_number(&self) -> Option<u32> {
        parse_number(Self::NUMBER_PREFIX, self.number())
    }
}

impl Numbered for WorkOrder {
    const NUMBER_PREFIX: &'static str = WORK_ORDER_PREFIX;

    fn number(&self) -> &str {
        &self.number
    }
}

impl Record for SupportTicket {
    const KIND: EntityKind = EntityKind::SupportTicket;

    fn id(&self) -> &str {
        &self.id
    }

    fn sequence_number(&self) -> Option<u32> {
        parse_number(Self::NUMBER_PREFIX, self.number())
    }
}

impl Numbered for SupportTicket {
    const NUMBER_PREFIX: &'static str = TICKET_PREFIX;

    fn number(&self) -> &str {
        &self.ticket_number
    }
}

impl Record for PdfTemplate {
    const KIND: EntityKind = EntityKind::Template;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for FilledForm {
    const KIND: EntityKind = EntityKind::FilledForm;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Notification {
    const KIND: EntityKind = EntityKind::Notification;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Insertion-ordered records plus the high-water mark of minted numbers.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
    sequence: u32,
}

impl<T: Record> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> Collection<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            sequence: 0,
        }
    }

    /// Rebuild a collection from persisted rows. The sequence never falls
    /// below the largest number already present.
    #[must_use]
    pub fn from_parts(items: Vec<T>, sequence: u32) -> Self {
        let mut collection = Self { items, sequence };
        let highest = collection
            .items
            .iter()
            .filter_map(Record::sequence_number)
            .max()
            .unwrap_or(0);
        collection.sequence = collection.sequence.max(highest);
        collection
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<&T> {
        self.items.iter().find(|item| predicate(item))
    }

    /// Matching records in insertion order.
    pub fn query(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.items
            .iter()
            .filter(|item| predicate(item))
            .cloned()
            .collect()
    }

    pub fn push(&mut self, item: T) {
        if let Some(n) = item.sequence_number() {
            self.sequence = self.sequence.max(n);
        }
        self.items.push(item);
    }

    /// Swap in a modified copy of an existing record.
    pub fn replace(&mut self, item: T) -> Option<T> {
        let slot = self.get_mut(item.id())?;
        Some(std::mem::replace(slot, item))
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }
}

impl<T: Numbered> Collection<T> {
    /// The number the next record will receive.
    ///
    /// Minted from the larger of the collection size and the sequence, so a
    /// number freed by a delete is never handed out again.
    #[must_use]
    pub fn next_number(&self) -> String {
        let size = u32::try_from(self.items.len()).unwrap_or(u32::MAX);
        next_number(T::NUMBER_PREFIX, size.max(self.sequence))
    }
}

#[cfg(test)]
#[path = "collection_tests.rs"]
mod tests;
