use super::ObjectPath;

#[test]
fn legal_paths() {
    assert!(ObjectPath::new(b"").is_err());
    assert!(ObjectPath::new(b"a").is_err());
    assert!(ObjectPath::new(b"/").is_ok());
    assert!(ObjectPath::new(b"/a").is_ok());
    assert!(ObjectPath::new(b"//").is_err());
    assert!(ObjectPath::new(b"/a//b").is_err());
    assert!(ObjectPath::new(b"/a/b").is_ok());
    assert!(ObjectPath::new(b"/a/b/").is_err());
    assert!(ObjectPath::new(b"/se/tedro").is_ok());
    assert!(ObjectPath::new(b"/com/example/MusicPlayer1").is_ok());
    assert!(ObjectPath::new(b"/_reserved/names_").is_ok());
    assert!(ObjectPath::new(b"/with-dash").is_err());
    assert!(ObjectPath::new(b"/with.dot").is_err());
}
