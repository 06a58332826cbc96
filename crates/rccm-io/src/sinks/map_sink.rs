//! Colour-indexed raster rendering of a tile, plus a PNG encoder and text
//! legend.

use std::io::Write;
use std::path::PathBuf;

use rccm_types::{ClassCode, CloudMaskTile, RccmError, ALL_CAMERAS, LINES, SAMPLES};

use super::SaveKey;

/// Upscale factor applied to each source pixel before rasterizing.
const UPSCALE: u32 = 4;

/// The fixed class -> colour -> legend-label table, identical across every
/// stage.
pub const CLASS_PALETTE: &[(ClassCode, (u8, u8, u8), &str)] = &[
    (ClassCode::Missing, (255, 0, 0), "missing"),
    (ClassCode::CloudHigh, (255, 255, 255), "cloud high confidence"),
    (ClassCode::CloudLow, (128, 128, 128), "cloud low confidence"),
    (ClassCode::ClearLow, (0, 255, 255), "clear low confidence"),
    (ClassCode::ClearHigh, (0, 0, 255), "clear high confidence"),
    (ClassCode::Obscured, (255, 215, 0), "obscured by terrain"),
    (ClassCode::Edge, (0, 0, 0), "swath edge"),
    (ClassCode::Fill, (255, 0, 0), "fill"),
];

/// Colour for any class, including anomalous raw bytes (rendered magenta,
/// not part of the fixed palette since they never appear by design).
fn color_for(class: ClassCode) -> (u8, u8, u8) {
    CLASS_PALETTE
        .iter()
        .find(|(c, _, _)| *c == class)
        .map(|(_, rgb, _)| *rgb)
        .unwrap_or((255, 0, 255))
}

/// A row-major RGBA raster, analogous to a flat debug-image buffer used
/// elsewhere in this workspace for 2D visualisation.
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Raster {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        }
    }

    fn set_pixel(&mut self, x: u32, y: u32, rgb: (u8, u8, u8)) {
        let idx = ((y * self.width + x) * 4) as usize;
        self.pixels[idx] = rgb.0;
        self.pixels[idx + 1] = rgb.1;
        self.pixels[idx + 2] = rgb.2;
        self.pixels[idx + 3] = 255;
    }
}

/// Renders one camera plane into a colour-indexed raster at a fixed
/// upscale, with a matching text legend.
pub fn render_camera(tile: &CloudMaskTile, camera: rccm_types::CameraIndex) -> Raster {
    let plane = tile.camera_plane(camera);
    let width = SAMPLES as u32 * UPSCALE;
    let height = LINES as u32 * UPSCALE;
    let mut raster = Raster::new(width, height);

    for sample in 0..SAMPLES {
        for line in 0..LINES {
            let class = plane[sample * LINES + line];
            let rgb = color_for(class);
            for dx in 0..UPSCALE {
                for dy in 0..UPSCALE {
                    raster.set_pixel(
                        sample as u32 * UPSCALE + dx,
                        line as u32 * UPSCALE + dy,
                        rgb,
                    );
                }
            }
        }
    }
    raster
}

/// The text legend sibling to every rendered map, identical across stages.
pub fn legend_text() -> String {
    let mut out = String::from("class,r,g,b,label\n");
    for (class, (r, g, b), label) in CLASS_PALETTE {
        out.push_str(&format!("{},{r},{g},{b},{label}\n", class.to_raw()));
    }
    out
}

/// Renders each camera plane of a tile into a colour-indexed raster and
/// persists it alongside a text legend.
pub trait MapSink {
    fn render_tile(&mut self, key: &SaveKey, tile: &CloudMaskTile) -> Result<(), RccmError>;
}

/// Writes one PNG per camera plus a shared `legend.txt`, under
/// `root/{tile.directory_name()}/{mode}/`.
pub struct FsMapSink {
    root: PathBuf,
}

impl FsMapSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn encode_png(raster: &Raster) -> Result<Vec<u8>, RccmError> {
        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, raster.width, raster.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder
                .write_header()
                .map_err(|e| RccmError::SinkFailure(format!("png header: {e}")))?;
            writer
                .write_image_data(&raster.pixels)
                .map_err(|e| RccmError::SinkFailure(format!("png data: {e}")))?;
        }
        Ok(buf)
    }
}

impl MapSink for FsMapSink {
    fn render_tile(&mut self, key: &SaveKey, tile: &CloudMaskTile) -> Result<(), RccmError> {
        let dir = self.root.join(key.tile.directory_name()).join(key.mode);
        std::fs::create_dir_all(&dir)
            .map_err(|e| RccmError::SinkFailure(format!("creating {}: {e}", dir.display())))?;

        for camera in ALL_CAMERAS {
            let raster = render_camera(tile, camera);
            let png_bytes = Self::encode_png(&raster)?;
            let path = dir.join(key.file_name(camera, "png"));
            let mut file = std::fs::File::create(&path)
                .map_err(|e| RccmError::SinkFailure(format!("creating {}: {e}", path.display())))?;
            file.write_all(&png_bytes)
                .map_err(|e| RccmError::SinkFailure(format!("writing {}: {e}", path.display())))?;
        }

        let legend_path = dir.join("legend.txt");
        std::fs::write(&legend_path, legend_text())
            .map_err(|e| RccmError::SinkFailure(format!("writing {}: {e}", legend_path.display())))?;
        tracing::info!(stage = %key.stage, "rendered map");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rccm_types::{CameraIndex, StageId, TileKey};

    #[test]
    fn render_camera_upscales_by_four() {
        let tile = CloudMaskTile::filled(ClassCode::ClearHigh);
        let raster = render_camera(&tile, CameraIndex::An);
        assert_eq!(raster.width, SAMPLES as u32 * 4);
        assert_eq!(raster.height, LINES as u32 * 4);
    }

    #[test]
    fn writes_png_and_legend_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FsMapSink::new(dir.path());
        let tile = CloudMaskTile::filled(ClassCode::Missing);
        let key = SaveKey {
            mode: "repair",
            tile: TileKey {
                path: 1,
                orbit: 2,
                block: 3,
                test_id: String::new(),
                edge: false,
            },
            stage: StageId::Stage0,
            acquisition_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            generation_date: NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(),
        };
        sink.render_tile(&key, &tile).unwrap();
        let dir_path = dir.path().join(key.tile.directory_name()).join(key.mode);
        assert!(dir_path.join("legend.txt").exists());
        assert!(dir_path.join(key.file_name(CameraIndex::An, "png")).exists());
    }
}
