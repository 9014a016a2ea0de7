//! Symbolic variables for the coordinates of named points.

use std::collections::hash_map::Entry;
use std::fmt::Display;
use std::io::{Read, Write};

use ahash::{HashMap, HashMapExt};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use smartstring::alias::String;
use tracing::debug;

use crate::error::{ArithmeticError, ArithmeticResult};
use crate::poly::{VarKind, Variable};
use crate::utils;

/// A coordinate of a point in the plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Coordinate {
    X,
    Y,
}

impl Coordinate {
    fn to_u8(self) -> u8 {
        match self {
            Coordinate::X => 0,
            Coordinate::Y => 1,
        }
    }

    fn from_u8(tag: u8) -> Option<Coordinate> {
        match tag {
            0 => Some(Coordinate::X),
            1 => Some(Coordinate::Y),
            _ => None,
        }
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Coordinate::X => f.write_str("x"),
            Coordinate::Y => f.write_str("y"),
        }
    }
}

/// A mapping from the coordinates of named points to symbolic variables.
///
/// Variables are numbered densely in the order in which they are registered.
#[derive(Clone, Debug, Default)]
pub struct VariableRegistry {
    str_to_id: HashMap<(String, Coordinate), i64>,
    id_to_str: Vec<(String, Coordinate)>,
}

/// A renaming of symbolic variables, created by [`VariableRegistry::import`].
#[derive(Clone, Debug, Default)]
pub struct VariableMap {
    symbols: HashMap<i64, i64>,
}

impl VariableMap {
    /// Map a variable of the exporting registry to the importing registry.
    /// Variables that are not symbolic are not changed.
    #[inline]
    pub fn map(&self, var: Variable) -> Variable {
        if var.kind() != VarKind::Symbolic {
            return var;
        }

        self.symbols
            .get(&var.index())
            .map(|i| Variable::symbolic(*i))
            .unwrap_or(var)
    }
}

impl VariableRegistry {
    pub fn new() -> VariableRegistry {
        VariableRegistry {
            str_to_id: HashMap::new(),
            id_to_str: vec![],
        }
    }

    /// The number of registered variables.
    pub fn len(&self) -> usize {
        self.id_to_str.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_str.is_empty()
    }

    /// Get the variable of a point coordinate if it is already registered,
    /// else register it and return a new variable.
    pub fn get_or_insert<S: AsRef<str>>(&mut self, point: S, coordinate: Coordinate) -> Variable {
        match self.str_to_id.entry((point.as_ref().into(), coordinate)) {
            Entry::Occupied(o) => Variable::symbolic(*o.get()),
            Entry::Vacant(v) => {
                let id = self.id_to_str.len() as i64;
                self.id_to_str.push(v.key().clone());
                v.insert(id);
                Variable::symbolic(id)
            }
        }
    }

    /// Get the variable of a point coordinate, if it is registered.
    pub fn get<S: AsRef<str>>(&self, point: S, coordinate: Coordinate) -> Option<Variable> {
        let key = (String::from(point.as_ref()), coordinate);
        self.str_to_id.get(&key).map(|id| Variable::symbolic(*id))
    }

    /// Get the point and coordinate of a symbolic variable.
    pub fn label_of(&self, var: Variable) -> Option<(&str, Coordinate)> {
        if var.kind() != VarKind::Symbolic || var.index() < 0 {
            return None;
        }

        self.id_to_str
            .get(var.index() as usize)
            .map(|(p, c)| (p.as_str(), *c))
    }

    /// Iterate over all registered variables with their point and coordinate.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, &str, Coordinate)> {
        self.id_to_str
            .iter()
            .enumerate()
            .map(|(i, (p, c))| (Variable::symbolic(i as i64), p.as_str(), *c))
    }

    /// Write the registry to `dest`, so that it can be imported in another session.
    pub fn export<W: Write>(&self, mut dest: W) -> ArithmeticResult<()> {
        dest.write_u64::<LittleEndian>(self.id_to_str.len() as u64)?;
        for (point, coordinate) in &self.id_to_str {
            dest.write_u64::<LittleEndian>(point.len() as u64)?;
            dest.write_all(point.as_bytes())?;
            dest.write_u8(coordinate.to_u8())?;
        }
        Ok(())
    }

    /// Import an exported registry into `self` and return a map from the
    /// variables of the exported registry to those of `self`.
    ///
    /// A point that is already registered is the same point, unless
    /// `conflict_fn` is provided: then the imported point is renamed with it.
    pub fn import<R: Read>(
        &mut self,
        mut source: R,
        conflict_fn: Option<Box<dyn Fn(&str) -> String>>,
    ) -> ArithmeticResult<VariableMap> {
        let n = source.read_u64::<LittleEndian>()?;

        let mut map = VariableMap {
            symbols: HashMap::with_capacity(n.min(1024) as usize),
        };

        for old_id in 0..n {
            let len = source.read_u64::<LittleEndian>()?;
            let buf = utils::read_bytes(&mut source, len, "a point label")?;
            let point = std::str::from_utf8(&buf)
                .map_err(|e| ArithmeticError::Malformed(format!("point label: {}", e)))?;

            let coordinate = Coordinate::from_u8(source.read_u8()?).ok_or_else(|| {
                ArithmeticError::Malformed(format!("unknown coordinate of point {}", point))
            })?;

            let var = match &conflict_fn {
                Some(f) if self.get(point, coordinate).is_some() => {
                    let mut new_point = f(point);
                    while self.get(&new_point, coordinate).is_some() {
                        new_point = f(&new_point);
                    }
                    debug!("Renaming point {} to {}", point, new_point);
                    self.get_or_insert(&new_point, coordinate)
                }
                _ => self.get_or_insert(point, coordinate),
            };

            map.symbols.insert(old_id as i64, var.index());
        }

        Ok(map)
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use smartstring::alias::String;

    use crate::error::ArithmeticError;
    use crate::poly::Variable;

    use super::{Coordinate, VariableRegistry};

    #[test]
    fn registration() {
        let mut r = VariableRegistry::new();
        let ax = r.get_or_insert("A", Coordinate::X);
        let ay = r.get_or_insert("A", Coordinate::Y);
        assert_eq!(ax, Variable::symbolic(0));
        assert_eq!(ay, Variable::symbolic(1));
        assert_eq!(r.get_or_insert("A", Coordinate::X), ax);
        assert_eq!(r.get("B", Coordinate::X), None);
        assert_eq!(r.label_of(ay), Some(("A", Coordinate::Y)));
        assert_eq!(r.label_of(Variable::x(1)), None);
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn import_rename() {
        let mut r = VariableRegistry::new();
        r.get_or_insert("A", Coordinate::X);
        r.get_or_insert("B", Coordinate::Y);

        let mut export = vec![];
        r.export(&mut export).unwrap();

        let mut s = VariableRegistry::new();
        s.get_or_insert("B", Coordinate::Y);

        let same = s.clone().import(&mut Cursor::new(&export), None).unwrap();
        assert_eq!(same.map(Variable::symbolic(1)), Variable::symbolic(0));

        let map = s
            .import(
                &mut Cursor::new(&export),
                Some(Box::new(|p| String::from(p) + "'")),
            )
            .unwrap();
        assert_eq!(map.map(Variable::symbolic(0)), Variable::symbolic(1));
        assert_eq!(map.map(Variable::symbolic(1)), Variable::symbolic(2));
        assert_eq!(s.label_of(Variable::symbolic(2)), Some(("B'", Coordinate::Y)));
        assert_eq!(map.map(Variable::x(1)), Variable::x(1));
    }

    #[test]
    fn malformed() {
        // one point with a label length that exceeds the data
        let mut data = 1u64.to_le_bytes().to_vec();
        data.extend(u64::MAX.to_le_bytes());
        data.extend(b"A");

        let mut r = VariableRegistry::new();
        assert!(matches!(
            r.import(&mut Cursor::new(&data), None),
            Err(ArithmeticError::Malformed(_))
        ));
        assert!(r.is_empty());
    }
}
