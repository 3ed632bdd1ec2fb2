//! Cell reference and column token types

use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// The alphabetic part of a cell reference (e.g., "B" in "B3")
///
/// Tokens are stored upper-case and ordered the way spreadsheet columns
/// are laid out: shorter tokens first, then alphabetically within the same
/// length, so `A < B < ... < Z < AA < AB`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnToken(String);

impl ColumnToken {
    /// Create a column token from letters
    ///
    /// # Examples
    /// ```
    /// use tally_core::ColumnToken;
    ///
    /// let col = ColumnToken::new("ab").unwrap();
    /// assert_eq!(col.as_str(), "AB");
    /// ```
    pub fn new(letters: &str) -> Result<Self> {
        if letters.is_empty() {
            return Err(Error::InvalidColumn("empty column letters".into()));
        }
        if let Some(c) = letters.chars().find(|c| !c.is_ascii_alphabetic()) {
            return Err(Error::InvalidColumn(format!(
                "invalid column letter '{}' in '{}'",
                c, letters
            )));
        }
        Ok(Self(letters.to_ascii_uppercase()))
    }

    /// Build the token for a 0-based column index (0 = A, 25 = Z, 26 = AA)
    pub fn from_index(index: u32) -> Self {
        let mut letters = Vec::new();
        let mut n = index as u64 + 1;

        while n > 0 {
            n -= 1;
            letters.push((n % 26) as u8 + b'A');
            n /= 26;
        }
        letters.reverse();

        Self(letters.into_iter().map(char::from).collect())
    }

    /// The upper-case letters of the token
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for ColumnToken {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for ColumnToken {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ColumnToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ColumnToken {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// A cell reference (e.g., "B3", "$AA$10")
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellReference {
    /// Column token
    pub column: ColumnToken,
    /// Row number (1-based, as written in the reference)
    pub row: u32,
}

impl CellReference {
    /// Create a new cell reference
    pub fn new(column: ColumnToken, row: u32) -> Self {
        Self { column, row }
    }

    /// Parse a reference from A1-style notation
    ///
    /// # Examples
    /// ```
    /// use tally_core::CellReference;
    ///
    /// let r = CellReference::parse("$B$3").unwrap();
    /// assert_eq!(r.column.as_str(), "B");
    /// assert_eq!(r.row, 3);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidReference("empty reference".into()));
        }

        let bytes = s.as_bytes();
        let mut pos = 0;

        if bytes.get(pos) == Some(&b'$') {
            pos += 1;
        }

        let col_start = pos;
        while bytes.get(pos).is_some_and(|b| b.is_ascii_alphabetic()) {
            pos += 1;
        }
        if pos == col_start {
            return Err(Error::InvalidReference(format!(
                "no column letters in '{}'",
                s
            )));
        }
        let column = ColumnToken::new(&s[col_start..pos])?;

        if bytes.get(pos) == Some(&b'$') {
            pos += 1;
        }

        let row_str = &s[pos..];
        if row_str.is_empty() {
            return Err(Error::InvalidReference(format!("no row number in '{}'", s)));
        }
        let row: u32 = row_str
            .parse()
            .map_err(|_| Error::InvalidReference(format!("invalid row number in '{}'", s)))?;
        if row == 0 {
            return Err(Error::InvalidReference(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }

        Ok(Self { column, row })
    }
}

impl fmt::Display for CellReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

impl FromStr for CellReference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(s: &str) -> ColumnToken {
        ColumnToken::new(s).unwrap()
    }

    #[test]
    fn test_column_ordering() {
        let mut cols = vec![col("AB"), col("B"), col("AA"), col("Z"), col("A"), col("BA")];
        cols.sort();
        let sorted: Vec<&str> = cols.iter().map(|c| c.as_str()).collect();
        assert_eq!(sorted, vec!["A", "B", "Z", "AA", "AB", "BA"]);
    }

    #[test]
    fn test_ordering_matches_index() {
        for i in 0..2000u32 {
            let a = ColumnToken::from_index(i);
            let b = ColumnToken::from_index(i + 1);
            assert!(a < b, "{} should sort before {}", a, b);
        }
    }

    #[test]
    fn test_from_index() {
        assert_eq!(ColumnToken::from_index(0).as_str(), "A");
        assert_eq!(ColumnToken::from_index(25).as_str(), "Z");
        assert_eq!(ColumnToken::from_index(26).as_str(), "AA");
        assert_eq!(ColumnToken::from_index(701).as_str(), "ZZ");
        assert_eq!(ColumnToken::from_index(702).as_str(), "AAA");
        assert_eq!(ColumnToken::from_index(16383).as_str(), "XFD");
    }

    #[test]
    fn test_long_reference() {
        let r = CellReference::parse("ZZZZZZZZZZZZZZ12").unwrap();
        assert_eq!(r.column.as_str().len(), 14);
        assert_eq!(r.row, 12);
        assert!(ColumnToken::from_index(25) < r.column);
    }

    #[test]
    fn test_parse_reference() {
        let r = CellReference::parse("C12").unwrap();
        assert_eq!(r.column, col("C"));
        assert_eq!(r.row, 12);
        assert_eq!(r.to_string(), "C12");

        let r = CellReference::parse("$aa$10").unwrap();
        assert_eq!(r.column, col("AA"));
        assert_eq!(r.row, 10);

        assert!(CellReference::parse("A0").is_err());
        assert!(CellReference::parse("A").is_err());
        assert!(CellReference::parse("7").is_err());
        assert!(CellReference::parse("A1B").is_err());
    }

    #[test]
    fn test_invalid_token() {
        assert!(ColumnToken::new("").is_err());
        assert!(ColumnToken::new("A1").is_err());
    }
}
