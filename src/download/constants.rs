//! Constants for the download module (timeouts, courtesy delays, signature).

use std::time::Duration;

/// Timeout for direct PDF downloads, applied to connect and to each read.
pub const DIRECT_TIMEOUT_SECS: u64 = 10;

/// Lower bound of the randomized courtesy delay before each request or tool run.
pub const DEFAULT_MIN_DELAY: Duration = Duration::from_secs(1);

/// Upper bound of the randomized courtesy delay.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(3);

/// Leading bytes of every PDF file.
pub const PDF_MAGIC: &[u8; 5] = b"%PDF-";
