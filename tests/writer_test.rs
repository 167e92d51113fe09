use std::fs;
use std::path::Path;

use cookiesync::config::writer::ConfigWriter;
use cookiesync::SyncError;

const DOUYIN_CONFIG: &str = r#"TokenManager:
  douyin:
    headers:
      Accept-Language: en-US,en;q=0.9
      User-Agent: Mozilla/5.0
      Referer: https://www.douyin.com/
      Cookie: seed=1
    proxies:
      http: null
      https: null
Other:
  keep: me
"#;

const BILIBILI_CONFIG: &str = r#"TokenManager:
  bilibili:
    headers:
      user-agent: Mozilla/5.0
      referer: https://www.bilibili.com/
      cookie: old=1
    proxies:
      http: http://127.0.0.1:7890
      https: http://127.0.0.1:7890
"#;

fn write_config(root: &Path, platform: &str, content: &str) {
    let path = root.join(format!("crawlers/{platform}/web"));
    fs::create_dir_all(&path).unwrap();
    fs::write(path.join("config.yaml"), content).unwrap();
}

#[test]
fn test_persist_replaces_only_cookie_field() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), "douyin", DOUYIN_CONFIG);
    let writer = ConfigWriter::new(dir.path());

    writer.persist("douyin", "fresh=2; s_v=3").unwrap();

    let text = fs::read_to_string(dir.path().join("crawlers/douyin/web/config.yaml")).unwrap();
    let doc: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
    let headers = &doc["TokenManager"]["douyin"]["headers"];
    assert_eq!(headers["Cookie"].as_str(), Some("fresh=2; s_v=3"));
    assert_eq!(headers["User-Agent"].as_str(), Some("Mozilla/5.0"));
    assert_eq!(headers["Referer"].as_str(), Some("https://www.douyin.com/"));
    assert_eq!(doc["Other"]["keep"].as_str(), Some("me"));
}

#[test]
fn test_persist_preserves_key_order() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), "douyin", DOUYIN_CONFIG);
    let writer = ConfigWriter::new(dir.path());

    writer.persist("douyin", "fresh=2").unwrap();

    let text = fs::read_to_string(dir.path().join("crawlers/douyin/web/config.yaml")).unwrap();
    let accept = text.find("Accept-Language").unwrap();
    let agent = text.find("User-Agent").unwrap();
    let referer = text.find("Referer").unwrap();
    let cookie = text.find("Cookie").unwrap();
    assert!(accept < agent && agent < referer && referer < cookie);
}

#[test]
fn test_persist_uses_platform_key_casing() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), "bilibili", BILIBILI_CONFIG);
    let writer = ConfigWriter::new(dir.path());

    writer.persist("bilibili", "SESSDATA=x").unwrap();

    let text = fs::read_to_string(dir.path().join("crawlers/bilibili/web/config.yaml")).unwrap();
    let doc: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
    let headers = &doc["TokenManager"]["bilibili"]["headers"];
    // Lowercase key is source-given for bilibili and must not be normalized.
    assert_eq!(headers["cookie"].as_str(), Some("SESSDATA=x"));
    assert!(headers["Cookie"].as_str().is_none());
}

#[test]
fn test_persist_missing_file_fails_without_creating_it() {
    let dir = tempfile::tempdir().unwrap();
    let writer = ConfigWriter::new(dir.path());

    let err = writer.persist("douyin", "c=1").unwrap_err();
    assert!(matches!(err, SyncError::PersistFailure { .. }));
    assert!(!dir.path().join("crawlers/douyin/web/config.yaml").exists());
}

#[test]
fn test_persist_unknown_platform_fails() {
    let dir = tempfile::tempdir().unwrap();
    let writer = ConfigWriter::new(dir.path());

    let err = writer.persist("kuaishou", "c=1").unwrap_err();
    assert!(matches!(err, SyncError::PersistFailure { .. }));
}

#[test]
fn test_persist_failure_leaves_file_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let garbled = "TokenManager: [unclosed\n  - : :\n";
    write_config(dir.path(), "douyin", garbled);
    let writer = ConfigWriter::new(dir.path());

    let err = writer.persist("douyin", "c=1").unwrap_err();
    assert!(matches!(err, SyncError::PersistFailure { .. }));

    let after = fs::read_to_string(dir.path().join("crawlers/douyin/web/config.yaml")).unwrap();
    assert_eq!(after, garbled);
}

#[test]
fn test_persist_missing_header_path_fails_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let content = "TokenManager:\n  somethingelse: {}\n";
    write_config(dir.path(), "tiktok", content);
    let writer = ConfigWriter::new(dir.path());

    let err = writer.persist("tiktok", "c=1").unwrap_err();
    assert!(matches!(err, SyncError::PersistFailure { .. }));

    let after = fs::read_to_string(dir.path().join("crawlers/tiktok/web/config.yaml")).unwrap();
    assert_eq!(after, content);
}

#[test]
fn test_read_cookie() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), "bilibili", BILIBILI_CONFIG);
    let writer = ConfigWriter::new(dir.path());

    assert_eq!(writer.read_cookie("bilibili").as_deref(), Some("old=1"));
    assert_eq!(writer.read_cookie("douyin"), None);
    assert_eq!(writer.read_cookie("unknown"), None);
}

#[test]
fn test_read_header_config_order_and_proxies() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), "bilibili", BILIBILI_CONFIG);
    let writer = ConfigWriter::new(dir.path());

    let config = writer.read_header_config("bilibili").unwrap();
    let keys: Vec<&str> = config.headers.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["user-agent", "referer", "cookie"]);
    assert_eq!(config.proxies.http.as_deref(), Some("http://127.0.0.1:7890"));
    assert_eq!(config.proxies.https.as_deref(), Some("http://127.0.0.1:7890"));
}
