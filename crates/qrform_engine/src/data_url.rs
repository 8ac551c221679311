use base64::Engine;

pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Self-contained `data:` reference for PNG bytes.
pub fn to_data_url(png: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(png);
    let mut url = String::with_capacity(PNG_DATA_URL_PREFIX.len() + encoded.len());
    url.push_str(PNG_DATA_URL_PREFIX);
    url.push_str(&encoded);
    url
}
