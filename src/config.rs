//! Configuration for redaction sessions.
//!
//! One immutable configuration is built at program start and passed
//! explicitly into every [`crate::processor::Processor`]; there is no hidden
//! process-wide mutable state.

/// Local XObject names that mark a region to remove.
///
/// A fixed, enumerated set reverse-engineered from the producer tools the
/// original dealt with. There is no general detection rule; the list is
/// configuration data and is preserved verbatim, in order.
pub const REGION_XOBJECT_NAMES: [&str; 11] = [
    "X0", "X1", "X3", "R19", "I1", "XO1", "XO2", "XO3", "R72", "Fm0", "X5",
];

/// Local image-resource names the watermark fallback overwrites.
pub const WATERMARK_IMAGE_NAMES: [&str; 1] = ["I1"];

/// Redaction session configuration.
#[derive(Debug, Clone)]
pub struct RedactConfig {
    /// Optional decryption password, passed opaquely to the reader.
    pub password: Option<String>,

    /// Whether the writer should run a final optimization before output.
    pub optimize: bool,

    /// Image-resource names treated as rasterized watermarks on the last page.
    pub watermark_image_names: Vec<String>,

    /// Ordered allow-list of XObject names for the marked-region pass.
    pub region_xobject_names: Vec<String>,
}

impl Default for RedactConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RedactConfig {
    /// Create a configuration with the built-in allow-lists.
    pub fn new() -> Self {
        Self {
            password: None,
            optimize: true,
            watermark_image_names: WATERMARK_IMAGE_NAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            region_xobject_names: REGION_XOBJECT_NAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Set the user password handed to the reader.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Enable or disable the final optimization.
    pub fn with_optimize(mut self, optimize: bool) -> Self {
        self.optimize = optimize;
        self
    }

    /// Override the watermark image allow-list.
    pub fn with_watermark_image_names(mut self, names: Vec<String>) -> Self {
        self.watermark_image_names = names;
        self
    }

    /// Override the marked-region XObject allow-list.
    pub fn with_region_xobject_names(mut self, names: Vec<String>) -> Self {
        self.region_xobject_names = names;
        self
    }
}
