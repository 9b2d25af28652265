//! Exported nodes normalise back to the kind and category they came from.

use rstest::rstest;
use seamark_core::{RawRecord, SeamarkRecord};
use seamark_data::{normalise_osm, normalise_shom};
use serde_json::json;

fn hydrographic(structure: &str, description: &str) -> SeamarkRecord {
    let raw = RawRecord::from_value(json!({
        "@gml:id": "BALISAGE_FR000000000000777",
        "tn:geometry": {"gml:Point": {"gml:pos": "48.8123 -3.5512"}},
        "type": structure,
        "gml:description": description
    }))
    .expect("fixture is an object");
    normalise_shom(raw).expect("valid feature").record
}

#[rstest]
#[case("beacon", "BCNCAR;CATCAM : 1;HEIGHT : 3.5;COLOUR : 2,6;COLPAT : 1")]
#[case("beacon", "BCNCAR;CATCAM : 4;COLOUR : 6,2,6")]
#[case("buoy", "BOYCAR;CATCAM : 2")]
#[case("buoy", "BOYLAT;CATLAM : 3;COLOUR : 3,4,3")]
#[case("beacon", "BCNLAT;CATLAM : 2;numald : 22900456")]
fn export_then_normalise_preserves_classification(
    #[case] structure: &str,
    #[case] description: &str,
) {
    let original = hydrographic(structure, description);
    let node = original.export(Some(4242));
    let document = serde_json::to_value(&node).expect("serialise node");
    let raw = RawRecord::from_value(document).expect("node is an object");

    let reloaded = normalise_osm(raw).expect("exported node normalises").record;

    assert_eq!(reloaded.id(), "4242");
    assert_eq!(reloaded.kind(), original.kind());
    assert_eq!(reloaded.category(), original.category());
    assert_eq!(reloaded.height(), original.height());
    assert_eq!(reloaded.colours(), original.colours());
    assert_eq!(reloaded.colour_pattern(), original.colour_pattern());
    assert_eq!(reloaded.coordinate(), original.coordinate());
}
