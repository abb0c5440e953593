//! Motif encoding: repeated (sender, body) pairs replaced by `$P<n>$` symbols.

use gp_core::{Motif, Symbol, Transcript};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Bijective motif ↔ symbol mapping. Symbols are allocated in first-seen order.
///
/// Distinct motifs can still share a composite key when a sender contains the
/// separator; such pairs are recorded in [`MotifDictionary::key_collisions`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MotifDictionary {
    index: HashMap<Motif, Symbol>,
    /// `motifs[i]` holds the motif for symbol `i + 1`.
    motifs: Vec<Motif>,
    keys: HashMap<String, Symbol>,
    /// `(earlier, later)` symbols whose motifs serialize to the same key.
    collisions: Vec<(Symbol, Symbol)>,
}

impl MotifDictionary {
    pub fn len(&self) -> usize {
        self.motifs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motifs.is_empty()
    }

    pub fn symbol_of(&self, motif: &Motif) -> Option<Symbol> {
        self.index.get(motif).copied()
    }

    pub fn resolve(&self, symbol: Symbol) -> Option<&Motif> {
        let idx = symbol.get() as usize;
        self.motifs.get(idx.checked_sub(1)?)
    }

    /// Entries in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Motif)> {
        self.motifs.iter().map(|m| (self.index[m], m))
    }

    /// Symbol pairs whose composite keys collide in the serialized dictionary.
    pub fn key_collisions(&self) -> &[(Symbol, Symbol)] {
        &self.collisions
    }

    /// Returns the earlier symbol already holding this motif's composite key.
    fn record(&mut self, motif: Motif, symbol: Symbol) -> Option<Symbol> {
        debug_assert_eq!(symbol.get() as usize, self.motifs.len() + 1);
        let earlier = match self.keys.entry(motif.composite_key()) {
            Entry::Occupied(e) => Some(*e.get()),
            Entry::Vacant(e) => {
                e.insert(symbol);
                None
            }
        };
        if let Some(earlier) = earlier {
            self.collisions.push((earlier, symbol));
        }
        self.index.insert(motif.clone(), symbol);
        self.motifs.push(motif);
        earlier
    }
}

/// Serialized as `{"<sender>|||<body>": "$P<n>$", ...}` in symbol order.
impl Serialize for MotifDictionary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (symbol, motif) in self.iter() {
            map.serialize_entry(&motif.composite_key(), &symbol)?;
        }
        map.end()
    }
}

/// A message whose body has been replaced by its motif symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedMessage {
    pub time: String,
    #[serde(rename = "user")]
    pub sender: String,
    #[serde(rename = "pattern")]
    pub symbol: Symbol,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedGroup {
    pub date: String,
    #[serde(rename = "msgs")]
    pub messages: Vec<EncodedMessage>,
}

/// Same shape as [`Transcript`], bodies swapped for symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EncodedTranscript {
    pub groups: Vec<EncodedGroup>,
}

impl EncodedTranscript {
    pub fn message_count(&self) -> usize {
        self.groups.iter().map(|g| g.messages.len()).sum()
    }

    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.groups.iter().flat_map(|g| g.messages.iter().map(|m| m.symbol))
    }
}

/// Accumulator for one encoding pass: the dictionary plus the next free symbol.
#[derive(Debug)]
pub struct MotifEncoder {
    dictionary: MotifDictionary,
    next: Symbol,
}

impl MotifEncoder {
    pub fn new() -> Self {
        Self {
            dictionary: MotifDictionary::default(),
            next: Symbol::FIRST,
        }
    }

    /// Symbol for `motif`, allocating the next one if unseen.
    pub fn intern(&mut self, motif: Motif) -> Symbol {
        if let Some(symbol) = self.dictionary.symbol_of(&motif) {
            return symbol;
        }
        let symbol = self.next;
        self.next = symbol.next();
        if let Some(earlier) = self.dictionary.record(motif, symbol) {
            let key = self.dictionary.resolve(symbol).map(Motif::composite_key);
            tracing::warn!(
                %earlier,
                %symbol,
                key = ?key,
                "motif key collides with an earlier motif; only one of them will decode"
            );
        }
        symbol
    }

    /// Single left-to-right pass over `transcript`.
    pub fn encode(mut self, transcript: Transcript) -> (EncodedTranscript, MotifDictionary) {
        let groups = transcript
            .groups
            .into_iter()
            .map(|group| {
                let messages = group
                    .messages
                    .into_iter()
                    .map(|m| {
                        let symbol = self.intern(Motif::new(m.sender.clone(), m.body));
                        EncodedMessage { time: m.time, sender: m.sender, symbol }
                    })
                    .collect();
                EncodedGroup { date: group.date, messages }
            })
            .collect();

        let encoded = EncodedTranscript { groups };
        tracing::debug!(
            messages = encoded.message_count(),
            motifs = self.dictionary.len(),
            "motif encoding complete"
        );
        (encoded, self.dictionary)
    }
}

impl Default for MotifEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a transcript with a fresh encoder.
pub fn encode(transcript: Transcript) -> (EncodedTranscript, MotifDictionary) {
    MotifEncoder::new().encode(transcript)
}
