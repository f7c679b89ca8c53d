use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::config::NameConfig;
use crate::contract::{postcondition, precondition, ContractResult};
use crate::error::ContractError;
use crate::escape::{is_valid_delimiter, join_masked, remask, unmask, DEFAULT_DELIMITER};
use crate::store::{new_store, parse_store, ComponentStore, StoreKind};

/// An ordered sequence of masked components joined by a single delimiter.
///
/// `Name` is a persistent value: `set_component`, `insert`, `append`, `remove`
/// and `concat` leave the receiver untouched and return a new name. Each of
/// them works on a private copy of the store, checks the expected component
/// count and the store invariant, and only then hands the copy back, so a
/// failed call never exposes a half-applied change.
///
/// ```
/// use hiername::Name;
///
/// let parent = Name::parse("home/user", '/').unwrap();
/// let child = parent.append("notes.txt").unwrap();
///
/// assert_eq!(parent.as_string(), "home/user");
/// assert_eq!(child.as_string(), "home/user/notes.txt");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "NameRecord", into = "NameRecord")]
pub struct Name {
    store: Box<dyn ComponentStore>,
}

impl Name {
    /// Builds an array-backed name from already masked components.
    pub fn from_components<I, S>(components: I, delimiter: char) -> ContractResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_config(components, &NameConfig::with_delimiter(delimiter))
    }

    /// Builds a string-backed name by splitting `source` at unescaped delimiters.
    pub fn parse(source: &str, delimiter: char) -> ContractResult<Self> {
        let config = NameConfig::builder()
            .delimiter(delimiter)
            .store(StoreKind::Delimited)
            .build();
        Self::parse_with_config(source, &config)
    }

    pub fn with_config<I, S>(components: I, config: &NameConfig) -> ContractResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let components = components.into_iter().map(Into::into).collect();
        Self::from_store(new_store(config.store, components, config.delimiter)?)
    }

    pub fn parse_with_config(source: &str, config: &NameConfig) -> ContractResult<Self> {
        Self::from_store(parse_store(config.store, source, config.delimiter)?)
    }

    /// Reads the canonical form produced by [`Name::as_data_string`].
    pub fn parse_data_string(data: &str) -> ContractResult<Self> {
        Self::from_store(parse_store(StoreKind::Array, data, DEFAULT_DELIMITER)?)
    }

    fn from_store(store: Box<dyn ComponentStore>) -> ContractResult<Self> {
        store.check_invariant()?;
        Ok(Self { store })
    }

    pub fn delimiter(&self) -> char {
        self.store.delimiter()
    }

    pub fn no_components(&self) -> usize {
        self.store.count()
    }

    pub fn is_empty(&self) -> bool {
        self.no_components() == 0
    }

    pub fn store_kind(&self) -> StoreKind {
        self.store.kind()
    }

    pub fn component(&self, i: usize) -> ContractResult<String> {
        self.store.get(i)
    }

    pub fn components(&self) -> Vec<String> {
        self.store.components()
    }

    pub fn as_string(&self) -> String {
        self.render(self.delimiter())
    }

    /// Like [`Name::as_string`] with another delimiter. Unmasked text that happens
    /// to contain `delimiter` is not escaped again, so the result is not
    /// guaranteed to parse back.
    pub fn as_string_with(&self, delimiter: char) -> ContractResult<String> {
        precondition(
            is_valid_delimiter(delimiter),
            "render delimiter must not be the escape character",
            delimiter,
        )?;
        Ok(self.render(delimiter))
    }

    fn render(&self, delimiter: char) -> String {
        let plain: Vec<String> = self.components().iter().map(|c| unmask(c)).collect();
        join_masked(&plain, delimiter)
    }

    pub fn as_data_string(&self) -> String {
        join_masked(&self.components(), DEFAULT_DELIMITER)
    }

    /// Same delimiter, same number of components, pairwise equal masked text.
    /// The storage strategy does not take part.
    pub fn is_equal(&self, other: &Name) -> bool {
        self.delimiter() == other.delimiter() && self.components() == other.components()
    }

    /// 32-bit polynomial hash (`h * 31 + unit`) over the UTF-16 units of the data string.
    pub fn hash_code(&self) -> i32 {
        self.as_data_string()
            .encode_utf16()
            .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as i32))
    }

    pub fn set_component(&self, i: usize, masked: &str) -> ContractResult<Self> {
        self.mutate("set_component", 0, |store| store.set(i, masked))
    }

    pub fn insert(&self, i: usize, masked: &str) -> ContractResult<Self> {
        self.mutate("insert", 1, |store| store.insert(i, masked))
    }

    pub fn append(&self, masked: &str) -> ContractResult<Self> {
        self.mutate("append", 1, |store| store.append(masked))
    }

    pub fn remove(&self, i: usize) -> ContractResult<Self> {
        self.mutate("remove", -1, |store| store.remove(i))
    }

    /// Appends every component of `other`, re-escaped for this name's delimiter.
    pub fn concat(&self, other: &Name) -> ContractResult<Self> {
        let delimiter = self.delimiter();
        let delta = other.no_components() as isize;

        self.mutate("concat", delta, |store| {
            for masked in other.components() {
                store.append(&remask(&unmask(&masked), delimiter))?;
            }
            Ok(())
        })
    }

    fn mutate<F>(&self, operation: &str, delta: isize, apply: F) -> ContractResult<Self>
    where
        F: FnOnce(&mut dyn ComponentStore) -> ContractResult<()>,
    {
        let before = self.no_components();
        let mut store = self.store.clone();
        apply(store.as_mut())?;

        let after = store.count();
        postcondition(
            before.checked_add_signed(delta) == Some(after),
            "component count must change by the operation's delta",
            (operation, before, delta, after),
        )?;
        store.check_invariant()?;

        trace!("{} on {:?}: {} -> {} components", operation, self.as_data_string(), before, after);
        Ok(Self { store })
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other)
    }
}

impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.delimiter().hash(state);
        self.as_data_string().hash(state);
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_data_string())
    }
}

impl FromStr for Name {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_data_string(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameRecord {
    pub delimiter: char,
    pub components: Vec<String>,
    #[serde(default)]
    pub store: StoreKind,
}

impl TryFrom<NameRecord> for Name {
    type Error = ContractError;

    fn try_from(record: NameRecord) -> Result<Self, Self::Error> {
        let config = NameConfig::builder()
            .delimiter(record.delimiter)
            .store(record.store)
            .build();
        Name::with_config(record.components, &config)
    }
}

impl From<Name> for NameRecord {
    fn from(name: Name) -> Self {
        Self {
            delimiter: name.delimiter(),
            components: name.components(),
            store: name.store_kind(),
        }
    }
}
