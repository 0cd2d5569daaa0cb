/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Small epsilon to avoid division by zero in floating-point ratios.
pub const EPSILON: f64 = 1e-5;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Minimum particle area (pixels) admitted by the detector.
pub const DEFAULT_MIN_PARTICLE_SIZE: f64 = 50.0;

/// Maximum particle area (pixels) admitted by the detector.
pub const DEFAULT_MAX_PARTICLE_SIZE: f64 = 10_000.0;

/// Pixel neighborhood diameter for the bilateral pre-filter.
pub const DEFAULT_BILATERAL_DIAMETER: usize = 9;

/// Intensity-domain sigma for the bilateral pre-filter.
pub const DEFAULT_BILATERAL_SIGMA_COLOR: f32 = 75.0;

/// Spatial-domain sigma for the bilateral pre-filter.
pub const DEFAULT_BILATERAL_SIGMA_SPACE: f32 = 75.0;

/// Contrast-limited histogram equalization clip limit.
pub const DEFAULT_CLAHE_CLIP_LIMIT: f32 = 2.0;

/// Tile grid side length for local histogram equalization.
pub const DEFAULT_CLAHE_TILES: usize = 8;

/// Number of histogram bins for equalization (8-bit intensity range).
pub const HISTOGRAM_BINS: usize = 256;

/// Local neighborhood side length for adaptive thresholding (odd).
pub const DEFAULT_ADAPTIVE_BLOCK_SIZE: usize = 11;

/// Constant subtracted from the local weighted mean when thresholding.
pub const DEFAULT_ADAPTIVE_OFFSET: f32 = 2.0;

/// Minimum contour point count required for an ellipse fit.
pub const ELLIPSE_FIT_MIN_POINTS: usize = 5;

/// Gaussian smoothing kernel size reserved for the edge-based
/// segmentation variant.
pub const DEFAULT_BLUR_KERNEL: (usize, usize) = (5, 5);

/// Lower hysteresis threshold reserved for the edge-based segmentation
/// variant.
pub const DEFAULT_CANNY_THRESHOLD_LOW: f32 = 50.0;

/// Upper hysteresis threshold reserved for the edge-based segmentation
/// variant.
pub const DEFAULT_CANNY_THRESHOLD_HIGH: f32 = 150.0;

/// Maximum number of per-frame samples retained in the history ring.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Per-iteration yield of the acquisition loop.
pub const LOOP_SLEEP_MS: u64 = 10;

/// Size-distribution bucket edges (tiny/small, small/medium, medium/large).
pub const DEFAULT_SIZE_BUCKET_EDGES: [f64; 3] = [100.0, 500.0, 2000.0];

/// Roughness-distribution edges on intensity std (smooth/rough, rough/weathered).
pub const DEFAULT_ROUGHNESS_EDGES: [f64; 2] = [20.0, 50.0];
