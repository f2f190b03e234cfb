//! `DataType` — closed type lattice for cell values.
//!
//! The lattice is a fixed tree with `Value` at the top:
//!
//! ```text
//! Value
//! ├── Number
//! │   ├── Int
//! │   └── Double
//! ├── Str
//! └── Binary
//!     ├── Image
//!     └── Document
//! ```
//!
//! `Missing` is the sentinel type of the missing cell. It sits outside the
//! tree and acts as the identity of the join, so a column of only missing
//! cells reports `Missing` rather than `Value`.

use std::fmt;

/// Type tag of a cell value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Sentinel type of the missing cell.
    Missing,
    Int,
    Double,
    /// Common ancestor of `Int` and `Double`.
    Number,
    Str,
    Image,
    Document,
    /// Common ancestor of the blob payload types.
    Binary,
    /// Top of the lattice.
    Value,
}

impl DataType {
    /// The immediate ancestor, or `None` for the top and for `Missing`.
    pub fn parent(self) -> Option<DataType> {
        match self {
            DataType::Int | DataType::Double => Some(DataType::Number),
            DataType::Image | DataType::Document => Some(DataType::Binary),
            DataType::Number | DataType::Str | DataType::Binary => Some(DataType::Value),
            DataType::Value | DataType::Missing => None,
        }
    }

    /// Whether `self` is `other` or an ancestor of `other`.
    pub fn is_super_type_of(self, other: DataType) -> bool {
        if other == DataType::Missing {
            return true;
        }
        let mut cur = Some(other);
        while let Some(t) = cur {
            if t == self {
                return true;
            }
            cur = t.parent();
        }
        false
    }

    /// The most specific common ancestor of `a` and `b`.
    ///
    /// Total: every pair joins at `Value` at the latest. `Missing` is the
    /// identity, so folding a column type never widens on missing cells.
    pub fn common_super_type(a: DataType, b: DataType) -> DataType {
        if a == DataType::Missing {
            return b;
        }
        if b == DataType::Missing {
            return a;
        }
        let mut cur = a;
        loop {
            if cur.is_super_type_of(b) {
                return cur;
            }
            match cur.parent() {
                Some(p) => cur = p,
                None => return DataType::Value,
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DataType::Missing => "missing",
            DataType::Int => "int",
            DataType::Double => "double",
            DataType::Number => "number",
            DataType::Str => "string",
            DataType::Image => "image",
            DataType::Document => "document",
            DataType::Binary => "binary",
            DataType::Value => "value",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::DataType::*;
    use super::*;

    const ALL: [DataType; 9] = [Missing, Int, Double, Number, Str, Image, Document, Binary, Value];

    #[test]
    fn join_matrix() {
        let cases = [
            (Int, Int, Int),
            (Int, Double, Number),
            (Double, Number, Number),
            (Int, Str, Value),
            (Image, Document, Binary),
            (Image, Binary, Binary),
            (Image, Str, Value),
            (Binary, Number, Value),
            (Value, Int, Value),
        ];
        for (a, b, expected) in cases {
            assert_eq!(DataType::common_super_type(a, b), expected, "{a} ∨ {b}");
        }
    }

    #[test]
    fn join_is_commutative() {
        for a in ALL {
            for b in ALL {
                assert_eq!(
                    DataType::common_super_type(a, b),
                    DataType::common_super_type(b, a),
                    "{a} ∨ {b}"
                );
            }
        }
    }

    #[test]
    fn missing_is_join_identity() {
        for t in ALL {
            assert_eq!(DataType::common_super_type(Missing, t), t);
            assert_eq!(DataType::common_super_type(t, Missing), t);
        }
    }

    #[test]
    fn join_result_covers_both_operands() {
        for a in ALL {
            for b in ALL {
                let j = DataType::common_super_type(a, b);
                assert!(j.is_super_type_of(a), "{j} vs {a}");
                assert!(j.is_super_type_of(b), "{j} vs {b}");
            }
        }
    }

    #[test]
    fn super_type_reflexive_and_topped() {
        for t in ALL {
            assert!(t.is_super_type_of(t));
            assert!(Value.is_super_type_of(t));
        }
        assert!(!Int.is_super_type_of(Double));
        assert!(!Str.is_super_type_of(Binary));
    }
}
