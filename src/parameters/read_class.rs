//! Read classes and the filter that selects which of them count toward
//! coverage.

use std::io;
use std::str::FromStr;

/// An error related to the parsing of a read class.
#[derive(Debug)]
pub struct ParseReadClassError(io::Error);

impl std::fmt::Display for ParseReadClassError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "parse read class error: {}", self.0)
    }
}

impl std::error::Error for ParseReadClassError {}

/// A classification of aligned reads by the quality and uniqueness of their
/// mapping.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ReadClass {
    /// Reads aligned without any mismatch or gap.
    Perfect,
    /// Reads aligned at their best-scoring location.
    Best,
    /// Reads aligned at any additional, lower-scoring location.
    Common,
}

impl ReadClass {
    /// All read classes, in order.
    pub const ALL: [ReadClass; 3] = [ReadClass::Perfect, ReadClass::Best, ReadClass::Common];

    /// The bit used for this class in a [`Filter`].
    fn bit(self) -> u8 {
        match self {
            ReadClass::Perfect => 0b001,
            ReadClass::Best => 0b010,
            ReadClass::Common => 0b100,
        }
    }
}

impl FromStr for ReadClass {
    type Err = ParseReadClassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "perfect" => Ok(Self::Perfect),
            "best" => Ok(Self::Best),
            "common" => Ok(Self::Common),
            c => Err(ParseReadClassError(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{} is not a valid read class", c),
            ))),
        }
    }
}

impl std::fmt::Display for ReadClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadClass::Perfect => write!(f, "perfect"),
            ReadClass::Best => write!(f, "best"),
            ReadClass::Common => write!(f, "common"),
        }
    }
}

/// A selection of [`ReadClass`]es whose reads count toward coverage.
///
/// # Examples
///
/// ```
/// use covscan::parameters::read_class::Filter;
/// use covscan::parameters::read_class::ReadClass;
///
/// let filter = Filter::empty().with(ReadClass::Perfect).with(ReadClass::Best);
///
/// assert!(filter.contains(ReadClass::Best));
/// assert!(!filter.contains(ReadClass::Common));
/// assert_eq!(filter.iter().count(), 2);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Filter(u8);

impl Filter {
    /// A filter admitting no read class.
    pub fn empty() -> Self {
        Self(0)
    }

    /// A filter admitting every read class.
    pub fn all() -> Self {
        ReadClass::ALL
            .into_iter()
            .fold(Self::empty(), |filter, class| filter.with(class))
    }

    /// Returns a copy of the filter that also admits `class`.
    pub fn with(self, class: ReadClass) -> Self {
        Self(self.0 | class.bit())
    }

    /// Returns whether the filter admits `class`.
    pub fn contains(&self, class: ReadClass) -> bool {
        self.0 & class.bit() != 0
    }

    /// Returns whether the filter admits no read class at all.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterates over the admitted read classes.
    pub fn iter(&self) -> impl Iterator<Item = ReadClass> {
        let filter = *self;

        ReadClass::ALL
            .into_iter()
            .filter(move |class| filter.contains(*class))
    }
}

impl Default for Filter {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<ReadClass> for Filter {
    fn from_iter<T: IntoIterator<Item = ReadClass>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |filter, class| filter.with(class))
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let classes = self.iter().map(|c| c.to_string()).collect::<Vec<_>>();
        write!(f, "{}", classes.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_class_from_str() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!("perfect".parse::<ReadClass>()?, ReadClass::Perfect);
        assert_eq!("best".parse::<ReadClass>()?, ReadClass::Best);
        assert_eq!("common".parse::<ReadClass>()?, ReadClass::Common);

        let err = "unique".parse::<ReadClass>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "parse read class error: unique is not a valid read class"
        );

        Ok(())
    }

    #[test]
    fn test_filter_collects_and_displays() {
        let filter = [ReadClass::Common, ReadClass::Perfect]
            .into_iter()
            .collect::<Filter>();

        assert_eq!(filter.to_string(), "perfect,common");
        assert_eq!(Filter::all().to_string(), "perfect,best,common");
        assert!(Filter::empty().is_empty());
        assert_eq!(Filter::default(), Filter::all());
    }
}
