//! The fixed tile-based hazard layers and their published color legends.
//!
//! Each layer is one `HazardLayerConfig` consumed by the generic sampling
//! routine; all rasters are published at zoom 17.

use hazard_common::ColorTable;
use tile_sampler::HazardLayerConfig;

const LAYER_ZOOM: u32 = 17;

/// Depth-band legend shared by the three inundation-style layers.
fn depth_band_table() -> ColorTable {
    ColorTable::from_entries([
        ((220, 122, 220), "20m以上", 20.0),
        ((242, 133, 201), "10m以上20m未満", 10.0),
        ((255, 145, 145), "5m以上10m未満", 5.0),
        ((255, 183, 183), "3m以上5m未満", 3.0),
        ((255, 216, 192), "0.5m以上3m未満", 1.0),
        ((248, 225, 166), "0.5m以上1m未満", 0.5),
        ((247, 245, 169), "0.5m未満", 0.4),
        ((255, 255, 179), "0.3m未満", 0.2),
    ])
}

/// Expected maximum flood inundation depth.
pub fn inundation_depth() -> HazardLayerConfig {
    HazardLayerConfig {
        name: "inundation_depth",
        tile_url_template:
            "https://disaportaldata.gsi.go.jp/raster/01_flood_l2_shinsuishin_data/{z}/{x}/{y}.png"
                .to_string(),
        zoom: LAYER_ZOOM,
        color_table: depth_band_table(),
        no_risk_label: "浸水なし",
    }
}

/// Expected tsunami inundation.
pub fn tsunami_inundation() -> HazardLayerConfig {
    HazardLayerConfig {
        name: "tsunami_inundation",
        tile_url_template:
            "https://disaportaldata.gsi.go.jp/raster/04_tsunami_newlegend_data/{z}/{x}/{y}.png"
                .to_string(),
        zoom: LAYER_ZOOM,
        color_table: depth_band_table(),
        no_risk_label: "浸水想定なし",
    }
}

/// Expected high-tide inundation.
pub fn hightide_inundation() -> HazardLayerConfig {
    HazardLayerConfig {
        name: "hightide_inundation",
        tile_url_template:
            "https://disaportaldata.gsi.go.jp/raster/03_hightide_l2_shinsuishin_data/{z}/{x}/{y}.png"
                .to_string(),
        zoom: LAYER_ZOOM,
        color_table: depth_band_table(),
        no_risk_label: "浸水想定なし",
    }
}

/// Debris flow warning and special warning zones.
pub fn debris_flow() -> HazardLayerConfig {
    HazardLayerConfig {
        name: "debris_flow",
        tile_url_template:
            "https://disaportaldata.gsi.go.jp/raster/05_dosekiryukeikaikuiki/{z}/{x}/{y}.png"
                .to_string(),
        zoom: LAYER_ZOOM,
        color_table: ColorTable::from_entries([
            ((165, 0, 33), "土石流(特別警戒)", 2.0),
            ((230, 200, 50), "土石流", 1.0),
        ]),
        no_risk_label: "該当なし",
    }
}

/// Steep slope failure warning zones.
pub fn steep_slope() -> HazardLayerConfig {
    HazardLayerConfig {
        name: "steep_slope",
        tile_url_template:
            "https://disaportaldata.gsi.go.jp/raster/05_kyukeishakeikaikuiki/{z}/{x}/{y}.png"
                .to_string(),
        zoom: LAYER_ZOOM,
        color_table: ColorTable::from_entries([
            ((250, 40, 0), "急傾斜地(特別警戒)", 2.0),
            ((250, 230, 0), "急傾斜地", 1.0),
        ]),
        no_risk_label: "該当なし",
    }
}

/// Landslide warning zones.
pub fn landslide() -> HazardLayerConfig {
    HazardLayerConfig {
        name: "landslide",
        tile_url_template:
            "https://disaportaldata.gsi.go.jp/raster/05_jisuberikeikaikuiki/{z}/{x}/{y}.png"
                .to_string(),
        zoom: LAYER_ZOOM,
        color_table: ColorTable::from_entries([
            ((180, 0, 40), "地すべり(特別警戒)", 2.0),
            ((255, 153, 0), "地すべり", 1.0),
        ]),
        no_risk_label: "該当なし",
    }
}
