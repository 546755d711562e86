use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// Number of scales reported by the standard E3 instrument.
pub const STANDARD_SCALE_COUNT: usize = 21;

/// Ordered scale identifiers giving each score position its meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleCatalog {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl ScaleCatalog {
    pub fn new<I, S>(names: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut positions = HashMap::with_capacity(names.len());
        for (position, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(CatalogError::BlankName { position });
            }
            if positions.insert(name.clone(), position).is_some() {
                return Err(CatalogError::DuplicateName { name: name.clone() });
            }
        }

        Ok(Self { names, positions })
    }

    /// Catalog of `scale1` through `scale21`.
    pub fn standard() -> Self {
        let names: Vec<String> = (1..=STANDARD_SCALE_COUNT)
            .map(|position| format!("scale{position}"))
            .collect();
        let positions = names
            .iter()
            .enumerate()
            .map(|(position, name)| (name.clone(), position))
            .collect();
        Self { names, positions }
    }

    /// Reads a JSON array of scale names.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let names: Vec<String> = serde_json::from_reader(reader)?;
        Self::new(names)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Exact, case-sensitive lookup of a scale's position.
    pub fn index_of(&self, scale: &str) -> Option<usize> {
        self.positions.get(scale).copied()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for ScaleCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("scale catalog must list at least one scale")]
    Empty,
    #[error("scale catalog entry {position} is blank")]
    BlankName { position: usize },
    #[error("scale catalog lists '{name}' more than once")]
    DuplicateName { name: String },
    #[error("failed to read scale catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("scale catalog must be a JSON array of names: {0}")]
    Document(#[from] serde_json::Error),
}
