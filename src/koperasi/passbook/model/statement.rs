use serde::ser::{Serialize, SerializeMap, Serializer};

use super::Cell;

/// Ordered label → value mapping. Labels are drawn from the constant layout
/// tables, so they are `'static`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    entries: Vec<(&'static str, Cell)>,
}

/// Member details keyed by their passbook label.
pub type MemberRecord = Record;

/// One passbook transaction keyed by its column header.
pub type Transaction = Record;

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a value. New labels are appended, so insertion
    /// order is output order.
    pub fn insert(&mut self, label: &'static str, value: Cell) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((label, value)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&Cell> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == label)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Cell)> {
        self.entries.iter().map(|(label, value)| (*label, value))
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(label, _)| *label).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, value) in &self.entries {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

/// Nominee details parsed from the `PENAMA / K.P` field.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct NomineeRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Cell>,
}

impl NomineeRecord {
    /// True when no field carries a usable value.
    pub fn is_empty(&self) -> bool {
        let text_empty = |value: &Option<String>| value.as_deref().is_none_or(str::is_empty);
        text_empty(&self.name)
            && text_empty(&self.relationship)
            && text_empty(&self.ic)
            && !self.phone.as_ref().is_some_and(Cell::is_truthy)
    }
}

/// Output root: member fields followed by `NOMINEE` and `TRANSACTIONS`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statement {
    pub member: MemberRecord,
    pub nominee: Option<NomineeRecord>,
    pub transactions: Vec<Transaction>,
}

impl Statement {
    pub const NOMINEE_KEY: &'static str = "NOMINEE";
    pub const TRANSACTIONS_KEY: &'static str = "TRANSACTIONS";

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

impl Serialize for Statement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.member.len() + 2))?;
        for (label, value) in self.member.iter() {
            map.serialize_entry(label, value)?;
        }
        map.serialize_entry(Self::NOMINEE_KEY, &self.nominee)?;
        map.serialize_entry(Self::TRANSACTIONS_KEY, &self.transactions)?;
        map.end()
    }
}
