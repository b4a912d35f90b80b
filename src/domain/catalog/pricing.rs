//! Price conversion between the platform API and manifest files

/// Unit manifests express prices in
pub const PRICE_UNIT: &str = "0.0001";

/// Convert an API price per million tokens to a manifest price string.
///
/// The API reports prices per million tokens in units of 0.0001; manifests
/// store the per-token price in the same unit, with at most six decimals
/// and no trailing zeros (`8900` becomes `"0.0089"`).
pub fn convert_price(price_per_m: f64) -> String {
    let per_token = price_per_m / 1_000_000.0;
    let formatted = format!("{:.6}", per_token);

    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
