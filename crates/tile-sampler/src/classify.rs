//! Per-pixel color-to-severity classification.

use image::RgbaImage;
use tracing::warn;

use hazard_common::{ColorTable, PixelOffset, SeverityReading};

/// Classify the pixel at `offset` against a layer's color table.
///
/// Policy, in order:
/// 1. exact RGB match in the table wins, regardless of alpha;
/// 2. a fully transparent pixel means no hazard is mapped here;
/// 3. anything else (anti-aliasing artifacts, legend colors not in the
///    table) is the unclassified sentinel.
///
/// Out-of-bounds access is a processing failure, logged and reported as a
/// sentinel reading rather than raised.
pub fn classify_pixel(
    image: &RgbaImage,
    offset: PixelOffset,
    table: &ColorTable,
    no_risk_label: &str,
) -> SeverityReading {
    let Some(pixel) = image.get_pixel_checked(offset.px, offset.py) else {
        warn!(
            px = offset.px,
            py = offset.py,
            width = image.width(),
            height = image.height(),
            "Pixel offset outside decoded tile"
        );
        return SeverityReading::processing_failed();
    };

    let [r, g, b, a] = pixel.0;

    if let Some(reading) = table.lookup((r, g, b)) {
        return reading.clone();
    }

    if a == 0 {
        return SeverityReading::no_risk(no_risk_label);
    }

    SeverityReading::unclassified()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{solid_tile, tile_with_pixel, transparent_tile};

    fn inundation_table() -> ColorTable {
        ColorTable::from_entries([
            ((255, 145, 145), "5m以上10m未満", 5.0),
            ((220, 122, 220), "20m以上", 20.0),
        ])
    }

    #[test]
    fn test_table_match() {
        let tile = solid_tile([255, 145, 145, 255]);
        let reading = classify_pixel(
            &tile,
            PixelOffset { px: 128, py: 128 },
            &inundation_table(),
            "浸水なし",
        );

        assert_eq!(reading.description, "5m以上10m未満");
        assert_eq!(reading.weight, 5.0);
    }

    #[test]
    fn test_transparent_is_no_risk() {
        let tile = transparent_tile();
        let reading = classify_pixel(
            &tile,
            PixelOffset { px: 0, py: 0 },
            &inundation_table(),
            "浸水なし",
        );

        assert_eq!(reading.description, "浸水なし");
        assert_eq!(reading.weight, 0.0);
    }

    #[test]
    fn test_opaque_unknown_color_is_unclassified() {
        let tile = solid_tile([1, 2, 3, 255]);
        let reading = classify_pixel(
            &tile,
            PixelOffset { px: 10, py: 10 },
            &inundation_table(),
            "浸水なし",
        );

        assert!(reading.is_sentinel());
        assert_eq!(reading.description, "情報なし");
    }

    #[test]
    fn test_out_of_bounds_is_processing_failure() {
        let tile = transparent_tile();
        let reading = classify_pixel(
            &tile,
            PixelOffset { px: 300, py: 300 },
            &inundation_table(),
            "浸水なし",
        );

        assert!(reading.is_sentinel());
        assert_eq!(reading.description, "処理失敗");
    }

    #[test]
    fn test_classification_is_idempotent() {
        let tile = tile_with_pixel(42, 42, [220, 122, 220]);
        let offset = PixelOffset { px: 42, py: 42 };

        let first = classify_pixel(&tile, offset, &inundation_table(), "浸水なし");
        let second = classify_pixel(&tile, offset, &inundation_table(), "浸水なし");

        assert_eq!(first, second);
    }
}
