use crate::headers::AsHeaderName;
use crate::headers::{HeaderField, HeaderMultiMap, HeaderName, HeaderOptions, HeaderValue};

const fn is_send_sync<T: Send + Sync>() { }
const _: () = {
    is_send_sync::<HeaderMultiMap>();
    is_send_sync::<HeaderName>();
    is_send_sync::<HeaderValue>();
    is_send_sync::<HeaderField>();
    fn _is_dyn_compat(_: &dyn AsHeaderName) { }
};

fn collect(map: &HeaderMultiMap) -> Vec<(String, Vec<String>)> {
    let mut out = Vec::new();
    map.for_each(|name, values| {
        out.push((name.to_string(), values.iter().map(ToString::to_string).collect()));
    });
    out
}

#[test]
fn header_map() {
    let mut map = HeaderMultiMap::new();

    assert!(map.get("content-type").is_empty());

    map.set("content-type", "FOO");
    assert!(map.has("content-type"));

    map.set("accept", "BAR");
    map.set("content-length", "LEN");
    map.set("host", "BAR");
    map.set("date", "BAR");
    map.set("referer", "BAR");
    map.set("rim", "BAR");
    map.set("lea", "BAR");

    assert_eq!(map.len(), 8);
    for name in ["content-type", "accept", "content-length", "host", "date", "referer", "rim", "lea"] {
        assert!(map.has(name), "{name}");
    }

    // Append Multi

    map.append("content-length", "BAR");

    let mut all = map.get_all("content-length");
    assert!(matches!(all.next(), Some(v) if v == "LEN"));
    assert!(matches!(all.next(), Some(v) if v == "BAR"));
    assert!(all.next().is_none());

    // Remove accept

    assert_eq!(map.delete("accept"), ["BAR"]);
    for name in ["content-type", "content-length", "host", "date", "referer", "rim", "lea"] {
        assert!(map.has(name), "{name}");
    }

    // Remove lea

    assert!(!map.delete("lea").is_empty());
    for name in ["content-type", "content-length", "host", "date", "referer", "rim"] {
        assert!(map.has(name), "{name}");
    }

    assert_eq!(map.delete("content-length"), ["LEN", "BAR"]);

    // Clear

    map.clear();
    assert_eq!(map.len(), 0);
    assert!(map.is_empty());
    assert!(!map.has("content-type"));
    assert!(!map.has("host"));
}

#[test]
fn case_insensitive_names() {
    let mut map = HeaderMultiMap::new();
    map.append("X-Grpc-Web", "1");
    assert_eq!(map.get("x-grpc-web"), ["1"]);
    assert_eq!(map.get("X-GRPC-WEB"), ["1"]);
    assert!(map.has(HeaderName::from_static("x-grpc-web")));

    map.append("x-grpc-web", "2");
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("X-Grpc-Web"), ["1", "2"]);
}

#[test]
fn delete_is_idempotent() {
    let mut map = HeaderMultiMap::new();
    map.append("Accept", ["a", "b"]);

    assert_eq!(map.delete("ACCEPT").len(), 2);
    assert!(!map.has("accept"));

    assert!(map.delete("accept").is_empty());
    assert!(!map.has("accept"));
    assert!(map.is_empty());
}

#[test]
fn delete_last_value_removes_name() {
    let mut map = HeaderMultiMap::new();
    map.append("X", "1");
    map.delete_value("X", "1");
    assert!(!map.has("X"));
    assert!(map.is_empty());
}

#[test]
fn delete_value() {
    let mut map = HeaderMultiMap::new();
    map.append("accept", ["a", "b", "a"]);

    // only the first occurrence
    map.delete_value("accept", " a ");
    assert_eq!(map.get("accept"), ["b", "a"]);

    // absent value and absent name are no-op
    map.delete_value("accept", "z");
    map.delete_value("missing", "a");
    assert_eq!(map.get("accept"), ["b", "a"]);
    assert_eq!(map.len(), 1);
}

#[test]
fn has_value() {
    let mut map = HeaderMultiMap::new();
    map.append("accept", "text/plain");

    assert!(map.has_value("Accept", "text/plain"));
    assert!(map.has_value("accept", "  text/plain\r\n"));
    assert!(!map.has_value("accept", "text/html"));
    assert!(!map.has_value("missing", "text/plain"));
}

#[test]
fn set_replaces() {
    let mut map = HeaderMultiMap::new();
    map.append("k", ["old", "older"]);

    map.set("K", ["v1", "v2"]);
    assert_eq!(map.get("k"), ["v1", "v2"]);

    map.set("k", "v3");
    assert_eq!(map.get("k"), ["v3"]);

    map.set("k", Vec::<String>::new());
    assert!(!map.has("k"));

    map.set("fresh", vec!["a".to_owned()]);
    assert_eq!(map.get("fresh"), ["a"]);
}

#[test]
fn get_returns_copy() {
    let mut map = HeaderMultiMap::new();
    map.append("accept", ["a", "b"]);

    let mut values = map.get("accept");
    values.push(HeaderValue::from_static("c"));
    values.clear();

    assert_eq!(map.get("accept"), ["a", "b"]);
    assert_eq!(map.first("accept").unwrap(), "a");
    assert!(map.first("missing").is_none());
}

#[test]
fn absent_is_empty() {
    let map = HeaderMultiMap::new();
    assert!(map.get("anything").is_empty());
    assert!(!map.has("anything"));
    assert_eq!(map.get_all("anything").count(), 0);
    assert!(!map.get_all("anything").has_remaining());
}

#[test]
fn append_never_removes() {
    let mut map = HeaderMultiMap::new();
    map.append("a", "1");
    map.append("a", Vec::<&str>::new());
    map.append("a", ["2", "1"]);
    assert_eq!(map.get("a"), ["1", "2", "1"]);

    // no value creates no name
    map.append("b", Vec::<&str>::new());
    assert!(!map.has("b"));
}

#[test]
fn sanitizes_names_and_values() {
    let mut map = HeaderMultiMap::new();
    map.append("X Custom:", "a\r\nb");
    assert_eq!(map.get("xcustom"), ["ab"]);
    assert_eq!(map.get("x custom"), ["ab"]);

    // name that is empty after normalization is ignored
    map.append(" : ", "lost");
    map.set("\r\n", "lost");
    assert_eq!(map.len(), 1);
    assert!(!map.has(" : "));
    assert!(map.get("").is_empty());
    assert!(map.delete("").is_empty());
}

#[test]
fn for_each_full_sequence() {
    let mut map = HeaderMultiMap::new();
    map.append("a", ["1", "2"]);
    map.append("b", "3");
    map.append("A", "4");

    assert_eq!(
        collect(&map),
        [
            ("a".to_owned(), vec!["1".to_owned(), "2".to_owned(), "4".to_owned()]),
            ("b".to_owned(), vec!["3".to_owned()]),
        ]
    );

    let pairs = map.iter().map(|(n, v)| format!("{n}={v}")).collect::<Vec<_>>();
    assert_eq!(pairs, ["a=1", "a=2", "a=4", "b=3"]);
    assert_eq!(map.fields().len(), 2);
}

#[test]
fn round_trip_from_instance() {
    let mut map = HeaderMultiMap::new();
    map.append("grpc-status", "0");
    map.append("grpc-message", ["first", "second"]);
    map.append("content-type", "application/grpc-web+proto");

    let copy = HeaderMultiMap::from_init(&map, HeaderOptions::new());
    assert_eq!(collect(&copy), collect(&map));
    assert_eq!(copy, map);
}

#[test]
fn raw_string_construction() {
    let map = HeaderMultiMap::from_init("Content-Type: text/plain\r\nX-Custom: a, b", HeaderOptions::new());
    assert_eq!(map.get("content-type"), ["text/plain"]);
    assert_eq!(map.get("x-custom"), ["a, b"]);
}

#[test]
fn display_round_trip() {
    let mut map = HeaderMultiMap::new();
    map.append("Content-Type", "text/plain");
    map.append("set-cookie", ["a=1", "b=2"]);

    let raw = map.to_string();
    assert_eq!(raw, "content-type: text/plain\r\nset-cookie: a=1\r\nset-cookie: b=2");

    let parsed = raw.parse::<HeaderMultiMap>().unwrap();
    assert_eq!(parsed, map);

    assert_eq!(HeaderMultiMap::new().to_string(), "");
}

#[test]
fn equality_ignores_name_order() {
    let a = [("x", "1"), ("y", "2")].into_iter().collect::<HeaderMultiMap>();
    let b = [("Y", "2"), ("X", "1")].into_iter().collect::<HeaderMultiMap>();
    assert_eq!(a, b);

    let c = [("x", "1"), ("x", "2")].into_iter().collect::<HeaderMultiMap>();
    let d = [("x", "2"), ("x", "1")].into_iter().collect::<HeaderMultiMap>();
    assert_ne!(c, d);
}

#[test]
fn insertion_order_after_removal() {
    let mut map = HeaderMultiMap::new();
    map.append("a", "1");
    map.append("b", "2");
    map.append("c", "3");
    map.delete("a");
    map.append("a", "4");

    let names = map.fields().map(|(name, _)| name.to_string()).collect::<Vec<_>>();
    assert_eq!(names, ["b", "c", "a"]);
}

#[test]
fn growth_keeps_every_name() {
    let mut map = HeaderMultiMap::new();
    for i in 0..200 {
        map.append(format!("X-Header-{i}"), i.to_string());
    }
    assert_eq!(map.len(), 200);
    assert!(map.capacity() >= 200);

    for i in (0..200).rev().step_by(2) {
        map.delete(format!("x-header-{i}"));
    }
    assert_eq!(map.len(), 100);

    for i in 0..200 {
        let expected = if i % 2 == 0 { vec![i.to_string()] } else { vec![] };
        let got = map.get(format!("x-header-{i}")).into_iter().map(String::from).collect::<Vec<_>>();
        assert_eq!(got, expected, "x-header-{i}");
    }
}
