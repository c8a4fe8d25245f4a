#![cfg(test)]
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

pub const MIXED: &str = r#"
properties:
  - property_name: shop
    property_records:
      - record_name: www.shop.example
        record_type: A
        record_value: 23.1.2.3
        record_value_is_provider_ip: true
      - record_name: api.shop.example
        record_type: A
        record_value: 203.0.113.7
        record_value_is_provider_ip: false
      - record_name: static.shop.example
        record_type: CNAME
        record_value: shop.edgesuite.example
  - property_name: parked
  - property_name: blog
    property_records:
      - record_name: blog.example
        record_type: A
        record_value: 198.51.100.4
        record_value_is_akamai_ip: false
"#;

/// Writes `yaml` to a fresh temporary file.
pub fn yaml_file(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(yaml.as_bytes()).expect("write temp file");
    file
}

pub fn read(path: &Path) -> Vec<u8> {
    std::fs::read(path).expect("read output")
}
