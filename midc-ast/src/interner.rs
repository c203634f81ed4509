use std::collections::hash_map::Entry;
use std::collections::HashMap;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Name(pub usize);

pub struct Interner {
    map: HashMap<String, Name>,
    vec: Vec<String>,
}

impl Interner {
    pub fn new() -> Interner {
        Interner {
            map: HashMap::new(),
            vec: Vec::new(),
        }
    }

    pub fn intern(&mut self, value: &str) -> Name {
        match self.map.entry(value.to_string()) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => {
                let name = Name(self.vec.len());
                self.vec.push(value.to_string());
                e.insert(name);
                name
            }
        }
    }

    pub fn lookup(&self, value: &str) -> Option<Name> {
        self.map.get(value).cloned()
    }

    pub fn str(&self, name: Name) -> &str {
        &self.vec[name.0]
    }
}

impl Default for Interner {
    fn default() -> Interner {
        Interner::new()
    }
}

#[test]
fn interner() {
    let mut interner = Interner::new();

    assert_eq!(Name(0), interner.intern("hello"));
    assert_eq!(Name(0), interner.intern("hello"));

    assert_eq!(Name(1), interner.intern("world"));
    assert_eq!(Name(1), interner.intern("world"));

    assert_eq!("hello", interner.str(Name(0)));
    assert_eq!("world", interner.str(Name(1)));

    assert_eq!(Some(Name(1)), interner.lookup("world"));
    assert_eq!(None, interner.lookup("main"));
}
