use chrono::NaiveDate;
use lexlock_client::{LicenseReader, ReaderError};
use lexlock_crypto::{encode, ClientKeyMaterial, EncryptionKey, ServerKeyMaterial, SigningKey};
use lexlock_license::{FeatureValue, License};
use lexlock_server::LicenseWriter;
use std::sync::Arc;

fn signed_materials() -> (Arc<ServerKeyMaterial>, Arc<ClientKeyMaterial>) {
    let signing = SigningKey::from_bytes(&[21u8; 32]);
    let verifying = signing.verifying_key();
    (
        Arc::new(ServerKeyMaterial::new(signing)),
        Arc::new(ClientKeyMaterial::new(verifying)),
    )
}

fn encrypted_materials() -> (Arc<ServerKeyMaterial>, Arc<ClientKeyMaterial>) {
    let signing = SigningKey::from_bytes(&[21u8; 32]);
    let verifying = signing.verifying_key();
    let content_key = EncryptionKey::from_bytes([5u8; 32]);
    (
        Arc::new(ServerKeyMaterial::new(signing).with_encryption(content_key.clone())),
        Arc::new(ClientKeyMaterial::new(verifying).with_decryption(content_key)),
    )
}

fn sample_license() -> License {
    License::new("ABC-123")
        .with_expiry(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap())
        .with_feature("pro", true)
        .with_feature("seats", 25i64)
        .with_custom("customer", "Acme Corp")
}

// ── End-to-end round trips ───────────────────────────────────────

#[test]
fn issued_license_roundtrips_through_string() {
    let (server, client) = signed_materials();
    let writer = LicenseWriter::new(server);
    let reader = LicenseReader::new(client);

    let license = sample_license();
    let encoded = writer.to_string(&license).unwrap();
    let recovered = reader.from_string(&encoded).unwrap();

    assert_eq!(recovered, license);
    assert_eq!(recovered.feature("pro"), Some(FeatureValue::Bool(true)));
    assert_eq!(recovered.custom_field("customer"), Some("Acme Corp"));
}

#[test]
fn issued_license_roundtrips_through_file() {
    let (server, client) = signed_materials();
    let writer = LicenseWriter::new(server);
    let reader = LicenseReader::new(client);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("license.txt");

    let license = sample_license();
    writer.to_file(&path, &license).unwrap();
    let recovered = reader.from_file(&path).unwrap();

    assert_eq!(recovered, license);
}

#[test]
fn encrypted_license_roundtrips() {
    let (server, client) = encrypted_materials();
    let writer = LicenseWriter::new(server);
    let reader = LicenseReader::new(client);

    let license = sample_license();
    let encoded = writer.to_string(&license).unwrap();
    assert!(encoded.starts_with("v1:ed25519+chacha20:"));

    let recovered = reader.from_string(&encoded).unwrap();
    assert_eq!(recovered, license);
}

#[test]
fn file_with_trailing_newline_is_accepted() {
    let (server, client) = signed_materials();
    let writer = LicenseWriter::new(server);
    let reader = LicenseReader::new(client);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("license.txt");

    let encoded = writer.to_string(&sample_license()).unwrap();
    std::fs::write(&path, format!("{encoded}\n")).unwrap();

    assert!(reader.from_file(&path).is_ok());
}

// ── Rejection ────────────────────────────────────────────────────

#[test]
fn wrong_verification_key_rejects() {
    let (server, _) = signed_materials();
    let writer = LicenseWriter::new(server);

    let other = SigningKey::from_bytes(&[99u8; 32]).verifying_key();
    let reader = LicenseReader::new(Arc::new(ClientKeyMaterial::new(other)));

    let encoded = writer.to_string(&sample_license()).unwrap();
    let result = reader.from_string(&encoded);
    assert!(matches!(result, Err(ReaderError::Crypto(_))));
}

#[test]
fn tampered_file_rejects() {
    let (server, client) = signed_materials();
    let writer = LicenseWriter::new(server);
    let reader = LicenseReader::new(client);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("license.txt");
    writer.to_file(&path, &sample_license()).unwrap();

    // Corrupt one byte in the middle of the file.
    let mut content = std::fs::read_to_string(&path).unwrap();
    let mid = content.len() / 2;
    let original = content.as_bytes()[mid];
    let replacement = if original == b'A' { 'B' } else { 'A' };
    content.replace_range(mid..=mid, &replacement.to_string());
    std::fs::write(&path, content).unwrap();

    let result = reader.from_file(&path);
    assert!(matches!(result, Err(ReaderError::Crypto(_))));
}

#[test]
fn garbage_string_rejects() {
    let (_, client) = signed_materials();
    let reader = LicenseReader::new(client);
    let result = reader.from_string("not an envelope at all");
    assert!(matches!(result, Err(ReaderError::Crypto(_))));
}

#[test]
fn missing_file_is_io_error() {
    let (_, client) = signed_materials();
    let reader = LicenseReader::new(client);
    let dir = tempfile::tempdir().unwrap();
    let result = reader.from_file(dir.path().join("absent.txt"));
    assert!(matches!(result, Err(ReaderError::Io(_))));
}

#[test]
fn authentic_envelope_with_unknown_field_is_converter_error() {
    // Authenticity and grammar are separate layers: a correctly signed
    // envelope whose text the converter rejects fails at the converter.
    let (server, client) = signed_materials();
    let reader = LicenseReader::new(client);

    let encoded = encode("id=X-1\nedition=gold", &server).unwrap();
    let result = reader.from_string(encoded.as_str());
    assert!(matches!(result, Err(ReaderError::Converter(_))));
}

#[test]
fn encrypted_envelope_without_decryption_key_rejects() {
    let (server, _) = encrypted_materials();
    let writer = LicenseWriter::new(server);

    let signing = SigningKey::from_bytes(&[21u8; 32]);
    let bare_client = Arc::new(ClientKeyMaterial::new(signing.verifying_key()));
    let reader = LicenseReader::new(bare_client);

    let encoded = writer.to_string(&sample_license()).unwrap();
    let result = reader.from_string(&encoded);
    assert!(matches!(result, Err(ReaderError::Crypto(_))));
}
