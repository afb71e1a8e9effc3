//! Decoding of raw simulator logs against a merged set of event definitions.

use alloy_dyn_abi::{DynSolValue, EventExt};
use alloy_json_abi::{AbiItem, Event};
use alloy_primitives::{map::B256HashMap, Address, B256};
use tracing::{debug, trace};

use crate::{InterfaceDescriptor, RawLog};

/// A decoded event argument.
#[derive(Debug, Clone, PartialEq)]
pub struct EventArg {
    /// The declared parameter name, `None` for unnamed parameters
    pub name: Option<String>,
    /// The decoded value
    pub value: DynSolValue,
}

/// Event arguments in declaration order, addressable by position or by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventArgs(Vec<EventArg>);

impl EventArgs {
    /// Creates the argument list.
    pub const fn new(args: Vec<EventArg>) -> Self {
        Self(args)
    }

    /// Looks up an argument by name, or by its decimal position when no parameter has that name.
    pub fn get(&self, key: &str) -> Option<&DynSolValue> {
        self.0
            .iter()
            .find(|arg| arg.name.as_deref() == Some(key))
            .map(|arg| &arg.value)
            .or_else(|| key.parse().ok().and_then(|index| self.get_index(index)))
    }

    /// Looks up an argument by position.
    pub fn get_index(&self, index: usize) -> Option<&DynSolValue> {
        self.0.get(index).map(|arg| &arg.value)
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the arguments in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, EventArg> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a EventArgs {
    type Item = &'a EventArg;
    type IntoIter = std::slice::Iter<'a, EventArg>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A log with its arguments decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedLog {
    /// Emitting contract
    pub address: Address,
    /// Event name, `None` for opaque pass-through logs
    pub name: Option<String>,
    /// Decoded arguments
    pub args: EventArgs,
}

/// Outcome of decoding one raw log.
#[derive(Debug, Clone, PartialEq)]
pub enum LogEntry {
    /// The log matched an event definition.
    Decoded(DecodedLog),
    /// The log had no topics at all; its data is passed through under argument `"0"`.
    Opaque(DecodedLog),
    /// The log carried topics, but no known event matched them.
    Undecoded(RawLog),
}

impl LogEntry {
    /// The emitting contract.
    pub const fn address(&self) -> Address {
        match self {
            Self::Decoded(log) | Self::Opaque(log) => log.address,
            Self::Undecoded(raw) => raw.address,
        }
    }

    /// The event name, if the log was decoded against an event.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Decoded(log) => log.name.as_deref(),
            Self::Opaque(_) | Self::Undecoded(_) => None,
        }
    }

    /// The decoded view of the log, for decoded and opaque entries.
    pub const fn as_decoded(&self) -> Option<&DecodedLog> {
        match self {
            Self::Decoded(log) | Self::Opaque(log) => Some(log),
            Self::Undecoded(_) => None,
        }
    }

    /// Returns `true` if the log matched an event definition.
    pub const fn is_decoded(&self) -> bool {
        matches!(self, Self::Decoded(_))
    }
}

/// Event definitions merged from several interface descriptors, keyed by signature hash.
///
/// Several definitions may share a hash (e.g. ERC20 and ERC721 `Transfer`); they are tried in
/// the order they were supplied and the first one whose layout fits the log wins.
#[derive(Debug, Clone, Default)]
pub struct EventTable {
    events: B256HashMap<Vec<Event>>,
}

impl EventTable {
    /// Collects the events of every descriptor, in order. Anonymous events are skipped since they
    /// cannot be recognized by their first topic.
    pub fn from_descriptors<'a, I>(descriptors: I) -> Self
    where
        I: IntoIterator<Item = &'a InterfaceDescriptor>,
    {
        let mut table = Self::default();
        for item in descriptors.into_iter().flatten() {
            if let AbiItem::Event(event) = item {
                table.insert(Event::clone(event));
            }
        }
        debug!(selectors = table.events.len(), events = table.len(), "Built event table");
        table
    }

    /// Adds an event definition after the existing ones.
    pub fn insert(&mut self, event: Event) {
        if event.anonymous {
            trace!(event = %event.name, "Skipping anonymous event");
            return;
        }
        self.events.entry(event.selector()).or_default().push(event);
    }

    /// Number of event definitions.
    pub fn len(&self) -> usize {
        self.events.values().map(Vec::len).sum()
    }

    /// Returns `true` if the table holds no definitions.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Candidate definitions for a signature hash, in insertion order.
    pub fn candidates(&self, selector: &B256) -> &[Event] {
        self.events.get(selector).map(Vec::as_slice).unwrap_or_default()
    }

    /// Decodes one raw log.
    pub fn decode(&self, raw: &RawLog) -> LogEntry {
        let Some(topics) = &raw.topics else {
            return LogEntry::Opaque(DecodedLog {
                address: raw.address,
                name: None,
                args: EventArgs::new(vec![EventArg {
                    name: None,
                    value: DynSolValue::Bytes(raw.data.to_vec()),
                }]),
            });
        };

        let decoded = topics.first().and_then(|selector| {
            self.candidates(selector).iter().find_map(|event| decode_with(event, topics, raw))
        });

        match decoded {
            Some(log) => LogEntry::Decoded(log),
            None => {
                debug!(
                    address = %raw.address,
                    topic0 = ?topics.first(),
                    "No known event matches log"
                );
                LogEntry::Undecoded(raw.clone())
            }
        }
    }
}

/// Decodes `raw` as `event` if the number of topics fits its indexed parameters and the data
/// fits the rest.
fn decode_with(event: &Event, topics: &[B256], raw: &RawLog) -> Option<DecodedLog> {
    let indexed = event.inputs.iter().filter(|param| param.indexed).count();
    if topics.len() != indexed + 1 {
        return None;
    }

    let decoded = event
        .decode_log_parts(topics.iter().copied(), &raw.data, false)
        .inspect_err(|err| trace!(event = %event.signature(), %err, "Event does not fit log"))
        .ok()?;

    let mut indexed = decoded.indexed.into_iter();
    let mut body = decoded.body.into_iter();
    let args = event
        .inputs
        .iter()
        .map(|param| {
            let value = if param.indexed { indexed.next() } else { body.next() }?;
            let name = (!param.name.is_empty()).then(|| param.name.clone());
            Some(EventArg { name, value })
        })
        .collect::<Option<Vec<_>>>()?;

    Some(DecodedLog {
        address: raw.address,
        name: Some(event.name.clone()),
        args: EventArgs::new(args),
    })
}

/// Decodes every raw log against the events of all `abis`, preserving log order.
///
/// The event table is built fresh for every call.
pub fn decode_logs(raw_logs: &[RawLog], abis: &[InterfaceDescriptor]) -> Vec<LogEntry> {
    let table = EventTable::from_descriptors(abis);
    raw_logs.iter().map(|raw| table.decode(raw)).collect()
}
