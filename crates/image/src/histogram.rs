//! Luma histogram, 32-bucket sampling and exposure classification.
//!
//! The sampled histogram reports the count *at* each multiple of 8, not the
//! sum over the 8-wide band the bar stands for. The classifier works on those
//! samples only, so its totals undercount the real pixel population. Both are
//! kept that way for compatibility with existing consumers; the full 256-level
//! distribution is available through [`LumaHistogram`].

use crate::buffer::PixelBuffer;
use crate::luma::luma_level;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of sampled buckets.
pub const BUCKET_COUNT: usize = 32;

/// Distance between sampled luma levels.
pub const BUCKET_STEP: usize = 8;

/// Below this average the image is dark.
pub const DARK_BELOW: f64 = 85.0;

/// Above this average the image is bright.
pub const BRIGHT_ABOVE: f64 = 170.0;

/// Below this spread the image is low contrast.
pub const LOW_CONTRAST_BELOW: i32 = 80;

/// One sampled histogram bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramBucket {
    /// Luma level, a multiple of 8 in `0..=248`
    pub value: u8,
    /// Pixels whose floored luma equals `value`
    pub count: u64,
}

/// Full 256-level luma distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LumaHistogram {
    counts: [u64; 256],
}

impl LumaHistogram {
    /// Count every pixel of `buffer` at its floored luma.
    pub fn from_buffer(buffer: &PixelBuffer) -> Self {
        let mut counts = [0u64; 256];
        for px in buffer.pixels() {
            counts[usize::from(luma_level(px[0], px[1], px[2]))] += 1;
        }
        Self { counts }
    }

    /// Per-level counts.
    pub fn counts(&self) -> &[u64; 256] {
        &self.counts
    }

    /// Pixels at one level.
    pub fn count_at(&self, level: u8) -> u64 {
        self.counts[usize::from(level)]
    }

    /// Total number of pixels counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// The 32 sampled buckets at levels `0, 8, ..., 248`.
    pub fn sampled(&self) -> [HistogramBucket; BUCKET_COUNT] {
        std::array::from_fn(|i| {
            let level = i * BUCKET_STEP;
            HistogramBucket {
                value: level as u8,
                count: self.counts[level],
            }
        })
    }
}

/// Full luma distribution of `buffer`.
pub fn luma_histogram(buffer: &PixelBuffer) -> LumaHistogram {
    LumaHistogram::from_buffer(buffer)
}

/// Sampled 32-bucket histogram of `buffer`.
///
/// # Example
/// ```
/// use citra_image::{histogram, PixelBuffer};
///
/// let black = PixelBuffer::new(1, 1, vec![0, 0, 0, 255]).unwrap();
/// let buckets = histogram(&black);
/// assert_eq!(buckets.len(), 32);
/// assert_eq!(buckets[0].count, 1);
/// assert!(buckets[1..].iter().all(|b| b.count == 0));
/// ```
pub fn histogram(buffer: &PixelBuffer) -> [HistogramBucket; BUCKET_COUNT] {
    debug!(width = buffer.width(), height = buffer.height(), "histogram");
    luma_histogram(buffer).sampled()
}

/// Exposure class of a histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HistogramStatus {
    /// Average luma below 85
    Dark,
    /// Average luma above 170
    Bright,
    /// Narrow luma spread
    LowContrast,
    /// Wide luma spread; reserved, the classifier does not emit it
    HighContrast,
    /// None of the above
    Balanced,
}

impl HistogramStatus {
    /// Kebab-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HistogramStatus::Dark => "dark",
            HistogramStatus::Bright => "bright",
            HistogramStatus::LowContrast => "low-contrast",
            HistogramStatus::HighContrast => "high-contrast",
            HistogramStatus::Balanced => "balanced",
        }
    }

    fn texts(&self) -> (&'static str, &'static str, &'static str) {
        match self {
            HistogramStatus::Dark => (
                "Underexposed image",
                "Most pixels sit in the shadows; the average brightness is low.",
                "Raise brightness or apply a positive contrast adjustment.",
            ),
            HistogramStatus::Bright => (
                "Overexposed image",
                "Most pixels sit in the highlights; the average brightness is high.",
                "Lower brightness to recover highlight detail.",
            ),
            HistogramStatus::LowContrast => (
                "Low contrast",
                "Pixel intensities are packed into a narrow range.",
                "Increase contrast to spread the tones out.",
            ),
            HistogramStatus::HighContrast => (
                "High contrast",
                "Pixel intensities cluster at both extremes.",
                "Reduce contrast to recover mid-tone detail.",
            ),
            HistogramStatus::Balanced => (
                "Well balanced",
                "Brightness and tonal range are both in a healthy range.",
                "No adjustment needed.",
            ),
        }
    }
}

impl std::fmt::Display for HistogramStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a sampled histogram with presentation text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramAnalysis {
    /// Exposure class
    pub status: HistogramStatus,
    /// Short heading
    pub title: String,
    /// What the histogram shows
    pub description: String,
    /// What to do about it
    pub recommendation: String,
}

impl HistogramAnalysis {
    fn from_status(status: HistogramStatus) -> Self {
        let (title, description, recommendation) = status.texts();
        Self {
            status,
            title: title.to_string(),
            description: description.to_string(),
            recommendation: recommendation.to_string(),
        }
    }
}

/// Summary numbers the classifier decides on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramStats {
    /// Sum of sampled counts
    pub total_pixels: u64,
    /// Count-weighted mean of sampled levels (0 when empty)
    pub avg_brightness: f64,
    /// Lowest level with a non-zero count (255 when empty)
    pub min_bright: u8,
    /// Highest level with a non-zero count (0 when empty)
    pub max_bright: u8,
    /// `max_bright - min_bright`, or 0 when every bucket is empty
    pub range: i32,
}

impl HistogramStats {
    /// Compute the statistics over sampled buckets.
    pub fn from_buckets(buckets: &[HistogramBucket]) -> Self {
        let mut total_pixels = 0u64;
        let mut total_brightness = 0f64;
        let mut min_bright = u8::MAX;
        let mut max_bright = 0u8;

        for bucket in buckets {
            total_pixels += bucket.count;
            total_brightness += f64::from(bucket.value) * bucket.count as f64;
            if bucket.count > 0 {
                min_bright = min_bright.min(bucket.value);
                max_bright = max_bright.max(bucket.value);
            }
        }

        let avg_brightness = if total_pixels == 0 {
            0.0
        } else {
            total_brightness / total_pixels as f64
        };
        let range = if total_pixels == 0 {
            0
        } else {
            i32::from(max_bright) - i32::from(min_bright)
        };

        Self {
            total_pixels,
            avg_brightness,
            min_bright,
            max_bright,
            range,
        }
    }

    /// First matching rule wins: dark, bright, low contrast, balanced.
    pub fn status(&self) -> HistogramStatus {
        if self.avg_brightness < DARK_BELOW {
            HistogramStatus::Dark
        } else if self.avg_brightness > BRIGHT_ABOVE {
            HistogramStatus::Bright
        } else if self.range < LOW_CONTRAST_BELOW {
            HistogramStatus::LowContrast
        } else {
            HistogramStatus::Balanced
        }
    }
}

/// Classify a sampled histogram.
///
/// # Example
/// ```
/// use citra_image::{analyze_histogram, histogram, HistogramStatus, PixelBuffer};
///
/// let black = PixelBuffer::new(1, 1, vec![0, 0, 0, 255]).unwrap();
/// let analysis = analyze_histogram(&histogram(&black));
/// assert_eq!(analysis.status, HistogramStatus::Dark);
/// ```
pub fn analyze_histogram(buckets: &[HistogramBucket]) -> HistogramAnalysis {
    let stats = HistogramStats::from_buckets(buckets);
    let status = stats.status();
    debug!(
        total = stats.total_pixels,
        avg = stats.avg_brightness,
        range = stats.range,
        status = %status,
        "histogram analysis"
    );
    HistogramAnalysis::from_status(status)
}
