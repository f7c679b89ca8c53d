mod array;
mod delimited;

pub use array::ArrayStore;
pub use delimited::DelimitedStore;

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::contract::{precondition, ContractResult};
use crate::escape::{canonicalize, is_valid_delimiter, is_well_formed};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StoreKind {
    #[default]
    Array,
    Delimited,
}

/// Backing storage of a name's masked components.
///
/// Both strategies share bounds rules: `get`, `set` and `remove` take an index
/// in `[0, count)`, `insert` one in `[0, count]`. Components handed to `set`,
/// `insert` and `append` are validated with [`check_component`] before any
/// state changes.
pub trait ComponentStore: Debug + Send + Sync {
    fn kind(&self) -> StoreKind;

    fn delimiter(&self) -> char;

    fn count(&self) -> usize;

    fn get(&self, i: usize) -> ContractResult<String>;

    fn set(&mut self, i: usize, masked: &str) -> ContractResult<()>;

    fn insert(&mut self, i: usize, masked: &str) -> ContractResult<()>;

    fn remove(&mut self, i: usize) -> ContractResult<()>;

    fn append(&mut self, masked: &str) -> ContractResult<()> {
        let count = self.count();
        self.insert(count, masked)
    }

    fn components(&self) -> Vec<String>;

    fn check_invariant(&self) -> ContractResult<()>;

    fn box_clone(&self) -> Box<dyn ComponentStore>;
}

impl Clone for Box<dyn ComponentStore> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

pub fn new_store(
    kind: StoreKind,
    components: Vec<String>,
    delimiter: char,
) -> ContractResult<Box<dyn ComponentStore>> {
    Ok(match kind {
        StoreKind::Array => Box::new(ArrayStore::new(components, delimiter)?),
        StoreKind::Delimited => Box::new(DelimitedStore::from_components(components, delimiter)?),
    })
}

pub fn parse_store(
    kind: StoreKind,
    source: &str,
    delimiter: char,
) -> ContractResult<Box<dyn ComponentStore>> {
    Ok(match kind {
        StoreKind::Array => Box::new(ArrayStore::parse(source, delimiter)?),
        StoreKind::Delimited => Box::new(DelimitedStore::parse(source, delimiter)?),
    })
}

pub(crate) fn check_delimiter(delimiter: char) -> ContractResult<()> {
    precondition(
        is_valid_delimiter(delimiter),
        "delimiter must be a single character other than the escape character",
        delimiter,
    )
}

pub(crate) fn check_component(masked: &str, delimiter: char) -> ContractResult<String> {
    let component = canonicalize(masked);
    precondition(
        is_well_formed(&component, delimiter),
        "component must not contain an unescaped delimiter",
        masked,
    )?;
    Ok(component)
}

pub(crate) fn check_index(i: usize, count: usize) -> ContractResult<()> {
    precondition(i < count, "index out of range [0, count)", (i, count))
}

pub(crate) fn check_insert_index(i: usize, count: usize) -> ContractResult<()> {
    precondition(i <= count, "insert index out of range [0, count]", (i, count))
}
