use super::*;
use base64::Engine as _;

fn item(content: Option<&str>, encoding: Option<&str>) -> ContentsItem {
    ContentsItem {
        kind: "file".to_string(),
        name: "files.json".to_string(),
        path: "data/files.json".to_string(),
        sha: "abc".to_string(),
        size: 2,
        content: content.map(str::to_string),
        encoding: encoding.map(str::to_string),
    }
}

#[test]
fn base64_content_ignores_line_breaks() {
    let encoded = BASE64.encode(b"[{\"file\":\"uploads/a.pdf\"}]");
    let wrapped = format!("{}\n{}\n", &encoded[..10], &encoded[10..]);
    let bytes = decode_content(&item(Some(&wrapped), Some("base64"))).expect("decode");
    assert_eq!(bytes, b"[{\"file\":\"uploads/a.pdf\"}]");
}

#[test]
fn content_that_is_not_inline_is_a_fetch_error() {
    let err = decode_content(&item(Some(""), Some("none"))).unwrap_err();
    assert!(matches!(err, FileDockError::Fetch { .. }));
    assert!(err.to_string().contains("encoding none"));
}

#[test]
fn contents_url_encodes_each_segment_and_pins_branch() {
    let mut host = HostConfig::new("octo", "files");
    host.api_base = "https://api.example.test/".to_string();
    host.branch = "release".to_string();
    let client = RemoteClient::new(host).expect("client");

    let u = client
        .contents_url("uploads/annual report #1.pdf", true)
        .expect("url");
    assert_eq!(
        u.as_str(),
        "https://api.example.test/repos/octo/files/contents/uploads/annual%20report%20%231.pdf?ref=release"
    );
}

#[test]
fn repo_urls_respect_api_base_prefix() {
    let mut host = HostConfig::new("octo", "files");
    host.api_base = "https://ghe.example.test/api/v3/".to_string();
    let client = RemoteClient::new(host).expect("client");
    assert_eq!(
        client.repo_url("/git/blobs"),
        "https://ghe.example.test/api/v3/repos/octo/files/git/blobs"
    );
    let u = client.contents_url("data/files.json", false).expect("url");
    assert_eq!(
        u.as_str(),
        "https://ghe.example.test/api/v3/repos/octo/files/contents/data/files.json"
    );
}
