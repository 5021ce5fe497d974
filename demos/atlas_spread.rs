use spread::atlas::load_pool;
use spread::metric::{AsnDistance, GreatCircle};
use spread::{SelectionConfig, SelectionStrategy, Selector};
use tracing_subscriber::EnvFilter;

// A small probe page in the platform's JSON shape. Pass a path to a saved
// API response to use real data instead: `cargo run --example atlas_spread -- probes.json 10`.
const SAMPLE: &str = r#"{ "results": [
    { "id": 1001, "asn_v4": 3320, "geometry": { "type": "Point", "coordinates": [13.40, 52.52] } },
    { "id": 1002, "asn_v4": 3320, "geometry": { "type": "Point", "coordinates": [11.58, 48.14] } },
    { "id": 1003, "asn_v4": 1136, "geometry": { "type": "Point", "coordinates": [4.90, 52.37] } },
    { "id": 1004, "asn_v4": 7922, "geometry": { "type": "Point", "coordinates": [-74.01, 40.71] } },
    { "id": 1005, "asn_v4": 7922, "geometry": { "type": "Point", "coordinates": [-122.42, 37.77] } },
    { "id": 1006, "asn_v4": 2516, "geometry": { "type": "Point", "coordinates": [139.69, 35.69] } },
    { "id": 1007, "asn_v4": 1221, "geometry": { "type": "Point", "coordinates": [151.21, -33.87] } },
    { "id": 1008, "asn_v4": 28573, "geometry": { "type": "Point", "coordinates": [-46.63, -23.55] } },
    { "id": 1009, "asn_v4": 37100, "geometry": { "type": "Point", "coordinates": [18.42, -33.92] } },
    { "id": 1010, "asn_v4": null, "geometry": { "type": "Point", "coordinates": [2.35, 48.86] } }
] }"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let json = match args.first() {
        Some(path) => std::fs::read_to_string(path)?,
        None => SAMPLE.to_string(),
    };
    let k: usize = match args.get(1) {
        Some(k) => k.parse()?,
        None => 4,
    };

    let pool = load_pool(&json)?;
    println!("{} selectable probes, selecting {k}", pool.len());

    // Geographic spread; exhaustive restarts are fine for a pool this size.
    let strategy = if pool.len() <= 200 {
        SelectionStrategy::ExhaustiveStart
    } else {
        SelectionStrategy::default()
    };
    let geo = SelectionConfig::new(k)
        .with_strategy(strategy)
        .with_max_per_asn(1)
        .select(&pool, &GreatCircle::new())?;

    println!("geographic (one per ASN):");
    for (&i, sep) in geo.indices().iter().zip(geo.separations()) {
        println!("  {}\tseparation: {sep:.0} km", pool[i]);
    }

    let asn = SelectionConfig::new(k).select(&pool, &AsnDistance::new())?;
    println!("network-diverse: {:?}", asn.ids());
    println!("union: {:?}", geo.union(&asn));

    Ok(())
}
