use std::collections::HashMap;

use midc_ast::{Name, TypeId};

use crate::data::StringId;
use crate::function::Function;

#[derive(Clone, Debug)]
pub struct Global {
    pub name: Name,
    pub ty: TypeId,
    pub init: Option<i64>,
}

/// Deduplicated string literals of a program.
pub struct StringTable {
    map: HashMap<String, StringId>,
    strings: Vec<String>,
}

impl StringTable {
    pub fn new() -> StringTable {
        StringTable {
            map: HashMap::new(),
            strings: Vec::new(),
        }
    }

    pub fn intern(&mut self, value: &str) -> StringId {
        if let Some(&id) = self.map.get(value) {
            return id;
        }

        let id = StringId(self.strings.len());
        self.strings.push(value.to_string());
        self.map.insert(value.to_string(), id);
        id
    }

    pub fn get(&self, id: StringId) -> &str {
        &self.strings[id.0]
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Default for StringTable {
    fn default() -> StringTable {
        StringTable::new()
    }
}

pub struct Program {
    pub functions: Vec<Function>,
    pub globals: Vec<Global>,
    pub strings: StringTable,
}

impl Program {
    pub fn new() -> Program {
        Program {
            functions: Vec::new(),
            globals: Vec::new(),
            strings: StringTable::new(),
        }
    }

    pub fn find_function(&self, name: Name) -> Option<&Function> {
        self.functions.iter().find(|fct| fct.name == name)
    }
}

impl Default for Program {
    fn default() -> Program {
        Program::new()
    }
}

#[test]
fn string_table_dedups() {
    let mut strings = StringTable::new();
    let hello = strings.intern("hello");
    assert_eq!(hello, strings.intern("hello"));
    assert_ne!(hello, strings.intern("world"));
    assert_eq!("hello", strings.get(hello));
    assert_eq!(2, strings.len());
}
