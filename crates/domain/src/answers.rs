//! Reduction of an answer section to a final name to address mapping.

use crate::dns_record::RecordType;
use crate::message::{RecordValue, ResourceRecord};
use std::collections::BTreeMap;
use std::fmt;
use std::net::Ipv4Addr;

/// Every name seen in the answers, mapped to its address. CNAMEs whose chain
/// never reaches an address map to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedAnswers {
    entries: BTreeMap<String, Option<Ipv4Addr>>,
}

impl ResolvedAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` if the name is absent, `Some(None)` if it is an unresolved CNAME.
    pub fn get(&self, name: &str) -> Option<Option<Ipv4Addr>> {
        self.entries.get(name).copied()
    }

    pub fn address(&self, name: &str) -> Option<Ipv4Addr> {
        self.get(name).flatten()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn is_unresolved(&self, name: &str) -> bool {
        matches!(self.get(name), Some(None))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<Ipv4Addr>)> {
        self.entries.iter().map(|(name, address)| (name.as_str(), *address))
    }

    pub fn insert(&mut self, name: impl Into<String>, address: Option<Ipv4Addr>) {
        self.entries.insert(name.into(), address);
    }

    pub fn into_inner(self) -> BTreeMap<String, Option<Ipv4Addr>> {
        self.entries
    }
}

impl fmt::Display for ResolvedAnswers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, address) in self.iter() {
            match address {
                Some(address) => writeln!(f, "{} -> {}", name, address)?,
                None => writeln!(f, "{} -> (unresolved)", name)?,
            }
        }
        Ok(())
    }
}

/// Partition `answers` into addresses (A, MX) and CNAME edges, then fold the
/// edges in by repeated passes until a pass resolves nothing.
///
/// Edges left over at that point (dangling targets and cycles) map to
/// `None`. Worst case is quadratic in the number of CNAMEs, reached when the
/// chain is listed in reverse order.
pub fn resolve_answers(answers: &[ResourceRecord]) -> ResolvedAnswers {
    let mut resolved = ResolvedAnswers::new();
    let mut pending: Vec<(&str, &str)> = Vec::new();

    for record in answers {
        match (&record.rtype, &record.value) {
            (RecordType::A | RecordType::MX, Some(RecordValue::Address(address))) => {
                resolved.insert(record.name.as_str(), Some(*address));
            }
            (RecordType::CNAME, Some(RecordValue::Target(target))) => {
                pending.push((record.name.as_str(), target.as_str()));
            }
            _ => {}
        }
    }

    loop {
        let before = pending.len();
        pending.retain(|(name, target)| match resolved.get(target) {
            Some(address) => {
                resolved.insert(*name, address);
                false
            }
            None => true,
        });

        if pending.is_empty() || pending.len() == before {
            break;
        }
    }

    for (name, _) in pending {
        resolved.insert(name, None);
    }
    resolved
}
