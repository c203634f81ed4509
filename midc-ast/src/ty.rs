use id_arena::{Arena, Id};

use crate::interner::{Interner, Name};

pub type TypeId = Id<Type>;

#[derive(Clone, PartialEq, Debug)]
pub enum Type {
    Void,
    Char,
    Int,
    Long,
    Float,
    Double,
    Ptr(TypeId),
    Array(TypeId, u64),
    Struct(Name),
}

impl Type {
    pub fn is_void(&self) -> bool {
        match self {
            Type::Void => true,
            _ => false,
        }
    }

    pub fn is_integer(&self) -> bool {
        match self {
            Type::Char | Type::Int | Type::Long => true,
            _ => false,
        }
    }

    pub fn is_float(&self) -> bool {
        match self {
            Type::Float | Type::Double => true,
            _ => false,
        }
    }

    pub fn is_ptr(&self) -> bool {
        match self {
            Type::Ptr(..) => true,
            _ => false,
        }
    }
}

/// Owns every type of a translation unit. The scalar types are allocated
/// once up front so they can be shared by id.
pub struct Types {
    arena: Arena<Type>,
    void: TypeId,
    char: TypeId,
    int: TypeId,
    long: TypeId,
    float: TypeId,
    double: TypeId,
}

impl Types {
    pub fn new() -> Types {
        let mut arena = Arena::new();
        let void = arena.alloc(Type::Void);
        let char = arena.alloc(Type::Char);
        let int = arena.alloc(Type::Int);
        let long = arena.alloc(Type::Long);
        let float = arena.alloc(Type::Float);
        let double = arena.alloc(Type::Double);

        Types {
            arena,
            void,
            char,
            int,
            long,
            float,
            double,
        }
    }

    pub fn alloc(&mut self, ty: Type) -> TypeId {
        self.arena.alloc(ty)
    }

    pub fn get(&self, id: TypeId) -> &Type {
        &self.arena[id]
    }

    pub fn void(&self) -> TypeId {
        self.void
    }

    pub fn char(&self) -> TypeId {
        self.char
    }

    pub fn int(&self) -> TypeId {
        self.int
    }

    pub fn long(&self) -> TypeId {
        self.long
    }

    pub fn float(&self) -> TypeId {
        self.float
    }

    pub fn double(&self) -> TypeId {
        self.double
    }

    pub fn ptr(&mut self, to: TypeId) -> TypeId {
        self.alloc(Type::Ptr(to))
    }

    pub fn array(&mut self, element: TypeId, len: u64) -> TypeId {
        self.alloc(Type::Array(element, len))
    }

    pub fn is_void(&self, id: TypeId) -> bool {
        self.get(id).is_void()
    }
}

impl Default for Types {
    fn default() -> Types {
        Types::new()
    }
}

pub fn display_ty(types: &Types, interner: &Interner, id: TypeId) -> String {
    match types.get(id) {
        Type::Void => "void".into(),
        Type::Char => "char".into(),
        Type::Int => "int".into(),
        Type::Long => "long".into(),
        Type::Float => "float".into(),
        Type::Double => "double".into(),
        Type::Ptr(to) => format!("{}*", display_ty(types, interner, *to)),
        Type::Array(element, len) => {
            format!("{}[{}]", display_ty(types, interner, *element), len)
        }
        Type::Struct(name) => format!("struct {}", interner.str(*name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_types_are_shared() {
        let mut types = Types::new();
        let int = types.int();
        assert_eq!(int, types.int());
        assert!(types.get(int).is_integer());
        assert!(types.is_void(types.void()));

        let ptr = types.ptr(int);
        assert!(types.get(ptr).is_ptr());
        assert_ne!(ptr, types.ptr(int));
    }

    #[test]
    fn display_nested_types() {
        let mut interner = Interner::new();
        let mut types = Types::new();
        let point = interner.intern("point");
        let st = types.alloc(Type::Struct(point));
        let ptr = types.ptr(st);
        let arr = types.array(ptr, 4);

        assert_eq!("struct point*[4]", display_ty(&types, &interner, arr));
        assert_eq!("double", display_ty(&types, &interner, types.double()));
    }
}
