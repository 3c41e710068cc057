//! Ordered response function set

use crate::error::{Error, Result};
use crate::srf::{parse_profile, ResponseFunction, SrfLibrary};

/// Insertion-ordered collection of response functions.
///
/// The set defines the destination sensor: one output band per function, in
/// set order, named after the function. Built once before any pixel work and
/// immutable afterwards. Record order from the library is preserved, there
/// is no sorting by wavelength.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseFunctionSet {
    functions: Vec<ResponseFunction>,
}

impl ResponseFunctionSet {
    /// Build a set by parsing every record of a library, in record order.
    ///
    /// Fails fast on the first invalid record, on a duplicate name and on an
    /// empty library; nothing touches raster I/O until this succeeds.
    pub fn from_library(library: &SrfLibrary) -> Result<Self> {
        if library.is_empty() {
            return Err(Error::EmptyLibrary);
        }

        let mut functions = Vec::with_capacity(library.len());
        for record in library.iter() {
            let function = parse_profile(&record.name, &record.profile)?;
            Self::check_duplicate(&functions, function.name())?;
            functions.push(function);
        }

        Ok(Self { functions })
    }

    /// Build a set from already-constructed functions, e.g. Gaussian ones
    /// derived from center/FWHM pairs. The same uniqueness and non-empty
    /// rules apply.
    pub fn from_functions(functions: Vec<ResponseFunction>) -> Result<Self> {
        if functions.is_empty() {
            return Err(Error::EmptyLibrary);
        }
        for (i, function) in functions.iter().enumerate() {
            Self::check_duplicate(&functions[..i], function.name())?;
        }
        Ok(Self { functions })
    }

    fn check_duplicate(existing: &[ResponseFunction], name: &str) -> Result<()> {
        if existing.iter().any(|f| f.name() == name) {
            return Err(Error::DuplicateBandName {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Number of functions (= output band count)
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// A successfully built set is never empty
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Function at a set position
    pub fn get(&self, index: usize) -> Option<&ResponseFunction> {
        self.functions.get(index)
    }

    /// Look a function up by name
    pub fn by_name(&self, name: &str) -> Option<&ResponseFunction> {
        self.functions.iter().find(|f| f.name() == name)
    }

    /// Iterate functions in set order
    pub fn iter(&self) -> impl Iterator<Item = &ResponseFunction> {
        self.functions.iter()
    }

    /// Destination band names, in set order
    pub fn names(&self) -> Vec<String> {
        self.functions.iter().map(|f| f.name().to_string()).collect()
    }
}
