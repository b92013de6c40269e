//! PNG conversion configuration types

/// PNG deflate effort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PngCompression {
    /// Fastest encode, largest file
    Fast,
    /// Balanced (default)
    Default,
    /// Smallest file, slowest encode
    Best,
}

/// PNG scanline filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PngFilter {
    NoFilter,
    Sub,
    Up,
    Avg,
    Paeth,
    /// Pick a filter per scanline (default)
    Adaptive,
}

/// Where the grayscale output is derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrayscaleSource {
    /// Re-open the colour PNG that was just written and convert it
    Reread,
    /// Convert the in-memory RGB raster directly
    InMemory,
}

/// Configuration for EXR to PNG conversion
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Compression level for both PNG outputs
    pub compression: PngCompression,
    /// Scanline filter for both PNG outputs
    pub filter: PngFilter,
    /// Source of the grayscale output
    pub grayscale_source: GrayscaleSource,
    /// Whether to reject empty images before encoding
    pub validate_dimensions: bool,
    /// Largest accepted width or height, if any
    pub max_dimension: Option<usize>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            compression: PngCompression::Default,
            filter: PngFilter::Adaptive,
            grayscale_source: GrayscaleSource::Reread,
            validate_dimensions: true,
            max_dimension: None,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    compression: Option<PngCompression>,
    filter: Option<PngFilter>,
    grayscale_source: Option<GrayscaleSource>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
}

impl ConversionConfigBuilder {
    pub fn compression(mut self, compression: PngCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn filter(mut self, filter: PngFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn grayscale_source(mut self, source: GrayscaleSource) -> Self {
        self.grayscale_source = Some(source);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            compression: self.compression.unwrap_or(default.compression),
            filter: self.filter.unwrap_or(default.filter),
            grayscale_source: self.grayscale_source.unwrap_or(default.grayscale_source),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
        }
    }
}
