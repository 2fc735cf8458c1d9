//! Plot layers.

use super::aes::Aes;
use super::data::Row;
use super::geom::Geom;

/// One geom with its aesthetic overrides and optional private data.
#[derive(Debug)]
pub struct Layer {
    geom: Box<dyn Geom>,
    name: Option<String>,
    aes: Aes,
    data: Option<Vec<Row>>,
}

impl Layer {
    /// Create a new layer with the given geometry.
    #[must_use]
    pub fn new(geom: impl Geom + 'static) -> Self {
        Self {
            geom: Box::new(geom),
            name: None,
            aes: Aes::new(),
            data: None,
        }
    }

    /// Name the layer; the name qualifies its discrete color and shape keys.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set aesthetics that override the plot's.
    #[must_use]
    pub fn aes(mut self, aes: Aes) -> Self {
        self.aes = aes;
        self
    }

    /// Set layer-specific data.
    #[must_use]
    pub fn data(mut self, data: Vec<Row>) -> Self {
        self.data = Some(data);
        self
    }

    /// The layer's geom.
    #[must_use]
    pub fn geom(&self) -> &dyn Geom {
        self.geom.as_ref()
    }

    /// The layer's name.
    #[must_use]
    pub fn layer_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The layer's own aesthetics.
    #[must_use]
    pub fn layer_aes(&self) -> &Aes {
        &self.aes
    }

    /// The layer's own data.
    #[must_use]
    pub fn layer_data(&self) -> Option<&[Row]> {
        self.data.as_deref()
    }
}
