use crate::contract::{invariant, ContractResult};
use crate::escape::{count_masked, is_valid_delimiter, is_well_formed, join_masked, split_masked};

use super::{
    check_component, check_delimiter, check_index, check_insert_index, ComponentStore, StoreKind,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayStore {
    components: Vec<String>,
    delimiter: char,
}

impl ArrayStore {
    pub fn new(components: Vec<String>, delimiter: char) -> ContractResult<Self> {
        check_delimiter(delimiter)?;
        let components = components
            .iter()
            .map(|c| check_component(c, delimiter))
            .collect::<ContractResult<Vec<_>>>()?;

        Ok(Self {
            components,
            delimiter,
        })
    }

    pub fn parse(source: &str, delimiter: char) -> ContractResult<Self> {
        check_delimiter(delimiter)?;
        Self::new(split_masked(source, delimiter), delimiter)
    }
}

impl ComponentStore for ArrayStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Array
    }

    fn delimiter(&self) -> char {
        self.delimiter
    }

    fn count(&self) -> usize {
        self.components.len()
    }

    fn get(&self, i: usize) -> ContractResult<String> {
        check_index(i, self.components.len())?;
        Ok(self.components[i].clone())
    }

    fn set(&mut self, i: usize, masked: &str) -> ContractResult<()> {
        check_index(i, self.components.len())?;
        let component = check_component(masked, self.delimiter)?;
        self.components[i] = component;
        Ok(())
    }

    fn insert(&mut self, i: usize, masked: &str) -> ContractResult<()> {
        check_insert_index(i, self.components.len())?;
        let component = check_component(masked, self.delimiter)?;
        self.components.insert(i, component);
        Ok(())
    }

    fn remove(&mut self, i: usize) -> ContractResult<()> {
        check_index(i, self.components.len())?;
        self.components.remove(i);
        Ok(())
    }

    fn components(&self) -> Vec<String> {
        self.components.clone()
    }

    fn check_invariant(&self) -> ContractResult<()> {
        invariant(
            is_valid_delimiter(self.delimiter),
            "delimiter must not be the escape character",
            self.delimiter,
        )?;
        for component in &self.components {
            invariant(
                is_well_formed(component, self.delimiter),
                "stored component must be well-formed",
                component,
            )?;
        }
        if !self.components.is_empty() {
            let joined = join_masked(&self.components, self.delimiter);
            invariant(
                count_masked(&joined, self.delimiter) == self.components.len(),
                "joined components must reparse to the same count",
                joined,
            )?;
        }
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn ComponentStore> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_on_unescaped_delimiter() {
        let store = ArrayStore::parse("a/b\\/c/", '/').unwrap();
        assert_eq!(store.components(), vec!["a", "b\\/c", ""]);
    }

    #[test]
    fn empty_list_is_allowed() {
        let store = ArrayStore::new(vec![], '.').unwrap();
        assert_eq!(store.count(), 0);
        store.check_invariant().unwrap();
    }

    #[test]
    fn corrupted_component_breaks_invariant() {
        let store = ArrayStore {
            components: vec!["a.b".to_string()],
            delimiter: '.',
        };
        assert!(store.check_invariant().unwrap_err().is_invariant());
    }

    #[test]
    fn escape_delimiter_breaks_invariant() {
        let store = ArrayStore {
            components: vec![],
            delimiter: '\\',
        };
        assert!(store.check_invariant().unwrap_err().is_invariant());
    }
}
