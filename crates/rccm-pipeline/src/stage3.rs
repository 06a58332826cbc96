//! Stage3: fills remaining gaps from intra-camera, intra-block context by
//! iterative 3x3 / 5x5 neighbourhood voting.

use rccm_types::{CameraIndex, ClassCode, CloudMaskTile, MissingCounts, ALL_CAMERAS, LINES, SAMPLES};

/// Options controlling Stage3's iteration cap.
#[derive(Clone, Copy, Debug)]
pub struct Stage3Options {
    /// Maximum number of passes per camera before giving up on residual
    /// gaps. A small integer; the loop exits earlier if an iteration makes
    /// no changes.
    pub max_iterations: u32,
}

impl Default for Stage3Options {
    fn default() -> Self {
        Self { max_iterations: 4 }
    }
}

pub struct Stage3Output {
    pub tile: CloudMaskTile,
    pub counts: MissingCounts,
    /// True if every camera converged to zero gaps within the iteration
    /// cap (false means at least one camera has residual gaps — a
    /// non-fatal, reported condition, not an error).
    pub converged: bool,
}

/// Class order for majority tie-breaking, highest priority first:
/// prefer higher confidence, and prefer clear over cloud at equal
/// confidence.
const TIE_BREAK_ORDER: [ClassCode; 4] = [
    ClassCode::ClearHigh,
    ClassCode::ClearLow,
    ClassCode::CloudLow,
    ClassCode::CloudHigh,
];

/// Processes each camera independently, in fixed camera-index order.
pub fn fill(input: &CloudMaskTile, options: Stage3Options) -> Stage3Output {
    let mut tile = input.clone();
    let mut converged = true;

    for camera in ALL_CAMERAS {
        let mut plane = tile.camera_plane(camera).to_vec();
        let camera_converged = fill_camera(&mut plane, options.max_iterations);
        tile.set_camera_plane(camera, &plane);
        converged &= camera_converged;
    }

    let counts = MissingCounts::from_tile(&tile);
    tracing::info!(total_missing = counts.total(), converged, "stage3 filled");
    Stage3Output {
        tile,
        counts,
        converged,
    }
}

/// Runs the damped majority filter for one camera's plane in place.
/// Returns `true` if the camera reached zero gaps within the cap.
fn fill_camera(plane: &mut [ClassCode], max_iterations: u32) -> bool {
    for _ in 0..max_iterations {
        let snapshot = plane.to_vec();
        let mut changed = false;

        for sample in 0..SAMPLES {
            for line in 0..LINES {
                let idx = sample * LINES + line;
                if !snapshot[idx].is_gap() {
                    continue;
                }
                if let Some(class) = vote(&snapshot, sample, line) {
                    plane[idx] = class;
                    changed = true;
                }
            }
        }

        if !changed {
            break;
        }
    }

    plane.iter().all(|c| !c.is_gap())
}

/// Votes for one missing pixel: tries a 3x3 window (the leading class must
/// reach a count of 3), then widens to 5x5 (count of 5) if the 3x3 window
/// is inconclusive. The threshold is on the winning class's own count, not
/// the sum of all valid observations in the window — a window split evenly
/// across several classes does not clear the bar even if it holds plenty of
/// valid pixels overall.
fn vote(plane: &[ClassCode], sample: usize, line: usize) -> Option<ClassCode> {
    let (_, counts3) = window_counts(plane, sample, line, 1);
    if let Some(class) = majority_past_threshold(counts3, 3) {
        return Some(class);
    }
    let (_, counts5) = window_counts(plane, sample, line, 2);
    majority_past_threshold(counts5, 5)
}

/// Returns the majority class if its count meets `threshold`, else `None`.
fn majority_past_threshold(counts: [u32; 4], threshold: u32) -> Option<ClassCode> {
    if *counts.iter().max().unwrap() < threshold {
        return None;
    }
    Some(majority(counts))
}

/// Counts valid observations in a `(2*radius+1)`-square window centred on
/// `(sample, line)`, clipped (not wrapped) at the block edges. Returns the
/// total valid count and a per-class breakdown in
/// [`ClassCode::VALID_OBSERVATIONS`] order.
fn window_counts(plane: &[ClassCode], sample: usize, line: usize, radius: usize) -> (u32, [u32; 4]) {
    let mut counts = [0u32; 4];
    let s_lo = sample.saturating_sub(radius);
    let s_hi = (sample + radius).min(SAMPLES - 1);
    let l_lo = line.saturating_sub(radius);
    let l_hi = (line + radius).min(LINES - 1);

    for s in s_lo..=s_hi {
        for l in l_lo..=l_hi {
            let class = plane[s * LINES + l];
            if let Some(i) = ClassCode::VALID_OBSERVATIONS.iter().position(|&v| v == class) {
                counts[i] += 1;
            }
        }
    }
    (counts.iter().sum(), counts)
}

/// Picks the highest-count class, breaking ties via [`TIE_BREAK_ORDER`].
fn majority(counts: [u32; 4]) -> ClassCode {
    let max = *counts.iter().max().unwrap();
    TIE_BREAK_ORDER
        .iter()
        .copied()
        .find(|&class| {
            let i = ClassCode::VALID_OBSERVATIONS
                .iter()
                .position(|&v| v == class)
                .unwrap();
            counts[i] == max
        })
        .expect("at least one class reaches the max count")
}
