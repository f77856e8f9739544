use lazyseq::{SeqError, ZipConfig};

#[test]
fn test_default_zip_config() {
    let config = ZipConfig::default();
    assert_eq!(config.handoff_capacity, 1);
    assert_eq!(ZipConfig::new(), config);
    assert!(config.validate().is_ok());
}

#[test]
fn test_builder_sets_capacity() {
    let config = ZipConfig::new().handoff_capacity(32);
    assert_eq!(config.handoff_capacity, 32);
}

#[test]
fn test_zero_capacity_is_invalid() {
    let err = ZipConfig::new().handoff_capacity(0).validate().unwrap_err();
    assert_eq!(err, SeqError::InvalidHandoffCapacity { capacity: 0 });
    assert!(err.to_string().contains("must be positive"));
}

#[test]
fn test_deserialize_from_json() {
    let config: ZipConfig = serde_json::from_str(r#"{"handoff_capacity": 4}"#).unwrap();
    assert_eq!(config.handoff_capacity, 4);

    let config: ZipConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, ZipConfig::default());
}

#[test]
fn test_serialize_round_trip() {
    let config = ZipConfig::new().handoff_capacity(8);
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(json, r#"{"handoff_capacity":8}"#);
}
