use crate::contract::{invariant, ContractResult};
use crate::escape::{
    canonicalize, count_masked, has_dangling_escape, is_valid_delimiter, join_masked, split_masked,
};

use super::{
    check_component, check_delimiter, check_index, check_insert_index, ComponentStore, StoreKind,
};

/// Keeps the whole name as one masked string plus a cached component count.
///
/// Any read that needs component boundaries reparses `name`; every structural
/// mutation splits it, edits the list and joins it back. A name with no
/// components is the empty string with a count of zero, which is the only
/// state where the cached count differs from what reparsing would yield.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedStore {
    name: String,
    no_components: usize,
    delimiter: char,
}

impl DelimitedStore {
    /// Parses `source` as-is; the empty string is one empty component.
    pub fn parse(source: &str, delimiter: char) -> ContractResult<Self> {
        check_delimiter(delimiter)?;
        let name = canonicalize(source);
        let no_components = count_masked(&name, delimiter);

        Ok(Self {
            name,
            no_components,
            delimiter,
        })
    }

    pub fn from_components(components: Vec<String>, delimiter: char) -> ContractResult<Self> {
        check_delimiter(delimiter)?;
        let components = components
            .iter()
            .map(|c| check_component(c, delimiter))
            .collect::<ContractResult<Vec<_>>>()?;

        let mut store = Self {
            name: String::new(),
            no_components: 0,
            delimiter,
        };
        store.rebuild(components);
        Ok(store)
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    fn parse_components(&self) -> Vec<String> {
        if self.no_components == 0 {
            return Vec::new();
        }
        split_masked(&self.name, self.delimiter)
    }

    fn rebuild(&mut self, components: Vec<String>) {
        self.name = join_masked(&components, self.delimiter);
        self.no_components = if components.is_empty() {
            0
        } else {
            count_masked(&self.name, self.delimiter)
        };
    }
}

impl ComponentStore for DelimitedStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Delimited
    }

    fn delimiter(&self) -> char {
        self.delimiter
    }

    fn count(&self) -> usize {
        self.no_components
    }

    fn get(&self, i: usize) -> ContractResult<String> {
        check_index(i, self.no_components)?;
        let mut components = self.parse_components();
        Ok(components.swap_remove(i))
    }

    fn set(&mut self, i: usize, masked: &str) -> ContractResult<()> {
        check_index(i, self.no_components)?;
        let component = check_component(masked, self.delimiter)?;
        let mut components = self.parse_components();
        components[i] = component;
        self.rebuild(components);
        Ok(())
    }

    fn insert(&mut self, i: usize, masked: &str) -> ContractResult<()> {
        check_insert_index(i, self.no_components)?;
        let component = check_component(masked, self.delimiter)?;
        let mut components = self.parse_components();
        components.insert(i, component);
        self.rebuild(components);
        Ok(())
    }

    fn remove(&mut self, i: usize) -> ContractResult<()> {
        check_index(i, self.no_components)?;
        let mut components = self.parse_components();
        components.remove(i);
        self.rebuild(components);
        Ok(())
    }

    fn components(&self) -> Vec<String> {
        self.parse_components()
    }

    fn check_invariant(&self) -> ContractResult<()> {
        invariant(
            is_valid_delimiter(self.delimiter),
            "delimiter must not be the escape character",
            self.delimiter,
        )?;
        invariant(
            !has_dangling_escape(&self.name),
            "backing string must not end in a dangling escape",
            &self.name,
        )?;
        if self.no_components == 0 {
            invariant(
                self.name.is_empty(),
                "a name without components must have an empty backing string",
                &self.name,
            )
        } else {
            invariant(
                count_masked(&self.name, self.delimiter) == self.no_components,
                "cached component count must match the backing string",
                (&self.name, self.no_components),
            )
        }
    }

    fn box_clone(&self) -> Box<dyn ComponentStore> {
        Box::new(self.clone())
    }
}
