/// Width over height of a 16:9 frame, as an `f32`.
pub const LANDSCAPE_RATIO: f32 = 16.0 / 9.0;
/// Width over height of a 9:16 frame, as an `f32`.
pub const PORTRAIT_RATIO: f32 = 9.0 / 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoDimensions {
    pub width: u32,
    pub height: u32,
}

/// How a measured ratio is compared with the 16:9 and 9:16 constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RatioMatch {
    /// Bit-exact `f32` equality. A ratio one ULP away is `Other`.
    Exact,
    /// Absolute difference within the given epsilon.
    Tolerance(f32),
}

impl RatioMatch {
    fn matches(&self, ratio: f32, target: f32) -> bool {
        match *self {
            RatioMatch::Exact => ratio == target,
            RatioMatch::Tolerance(epsilon) => (ratio - target).abs() <= epsilon,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectRatio {
    Landscape,
    Portrait,
    Other,
}

impl AspectRatio {
    /// Zero dimensions give NaN or infinity, which never match and fall to `Other`.
    pub fn classify(dimensions: VideoDimensions, mode: RatioMatch) -> Self {
        let ratio = dimensions.width as f32 / dimensions.height as f32;

        if mode.matches(ratio, LANDSCAPE_RATIO) {
            AspectRatio::Landscape
        } else if mode.matches(ratio, PORTRAIT_RATIO) {
            AspectRatio::Portrait
        } else {
            AspectRatio::Other
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
            AspectRatio::Other => "other",
        }
    }

    /// Directory the object key is filed under.
    pub fn prefix(&self) -> &'static str {
        match self {
            AspectRatio::Landscape => "landscape",
            AspectRatio::Portrait => "portrait",
            AspectRatio::Other => "other",
        }
    }
}
