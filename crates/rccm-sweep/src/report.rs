//! The tabulated output of one orbit sweep.

use chrono::{Datelike, NaiveDate};

use rccm_types::{MissingCounts, OrbitId, RccmError, ALL_CAMERAS};

/// One orbit's outcome: the nine per-camera Stage1 missing counts and their
/// sum, or a flagged error if the orbit could not be processed.
#[derive(Clone, Debug)]
pub struct SweepRow {
    pub orbit: OrbitId,
    pub calendar_date: NaiveDate,
    /// Day-of-year, the sweep's "Julian date" column (spec.md §4.6).
    pub julian_date: u32,
    pub per_camera: [u32; 9],
    pub total: u32,
    /// Set when the orbit was skipped after a per-orbit failure; the row's
    /// counts are then all zero (spec.md §4.6: "recorded as a zero-count
    /// row flagged with the error kind").
    pub error: Option<String>,
}

impl SweepRow {
    pub fn ok(orbit: OrbitId, date: NaiveDate, counts: MissingCounts) -> Self {
        let mut per_camera = [0u32; 9];
        for camera in ALL_CAMERAS {
            per_camera[camera.index()] = counts.camera(camera);
        }
        Self {
            orbit,
            calendar_date: date,
            julian_date: date.ordinal(),
            per_camera,
            total: counts.total(),
            error: None,
        }
    }

    pub fn failed(orbit: OrbitId, date: NaiveDate, error: &RccmError) -> Self {
        Self {
            orbit,
            calendar_date: date,
            julian_date: date.ordinal(),
            per_camera: [0; 9],
            total: 0,
            error: Some(error.to_string()),
        }
    }
}

/// The full sweep result: one row per orbit in the radiance/RCCM
/// intersection, ascending by orbit.
#[derive(Clone, Debug, Default)]
pub struct SweepReport {
    pub rows: Vec<SweepRow>,
}

impl SweepReport {
    /// Tab-separated table: orbit, date, Julian date, nine per-camera
    /// counts (DF..DA), total, error (empty when none).
    pub fn to_table(&self) -> String {
        let mut out = String::from("orbit\tdate\tjday\tDF\tCF\tBF\tAF\tAN\tAA\tBA\tCA\tDA\ttotal\terror\n");
        for row in &self.rows {
            out.push_str(&format!("{}\t{}\t{}\t", row.orbit, row.calendar_date, row.julian_date));
            for count in row.per_camera {
                out.push_str(&format!("{count}\t"));
            }
            out.push_str(&format!("{}\t{}\n", row.total, row.error.as_deref().unwrap_or("")));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rccm_types::CloudMaskTile;

    #[test]
    fn ok_row_carries_native_camera_order_counts() {
        let mut tile = CloudMaskTile::filled(rccm_types::ClassCode::ClearHigh);
        tile.set(rccm_types::CameraIndex::Cf, 0, 0, rccm_types::ClassCode::Missing);
        let counts = MissingCounts::from_tile(&tile);
        let date = NaiveDate::from_ymd_opt(2020, 2, 1).unwrap();

        let row = SweepRow::ok(12345, date, counts);
        assert_eq!(row.per_camera[rccm_types::CameraIndex::Cf.index()], 1);
        assert_eq!(row.total, 1);
        assert_eq!(row.julian_date, 32);
        assert!(row.error.is_none());
    }

    #[test]
    fn failed_row_is_zeroed_and_flagged() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let row = SweepRow::failed(1, date, &RccmError::EmptyIntersection);
        assert_eq!(row.total, 0);
        assert!(row.error.unwrap().contains("empty intersection"));
    }

    #[test]
    fn table_rendering_includes_header_and_every_row() {
        let mut report = SweepReport::default();
        report.rows.push(SweepRow::ok(
            1,
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            MissingCounts::default(),
        ));
        let text = report.to_table();
        assert!(text.starts_with("orbit\tdate\tjday"));
        assert_eq!(text.lines().count(), 2);
    }
}
