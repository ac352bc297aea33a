use browser_headers::{
    ExportError, HeaderMultiMap, HeaderOptions,
    headers::{HttpPlatform, Unsupported},
};

fn main() -> Result<(), ExportError> {
    env_logger::init();

    // response trailers as a raw blob, one malformed line
    let raw = "grpc-status: 0\r\ngrpc-message: OK\r\nmalformed\r\nvary: origin, accept";
    let trailers = raw.parse::<HeaderMultiMap>().unwrap_or_default();
    log::info!("trailers: {trailers:?}");

    // native response headers, with comma separated values split
    let mut response = http::HeaderMap::new();
    response.append("vary", http::HeaderValue::from_static("origin, accept"));
    let response = HeaderMultiMap::from_init(&response, HeaderOptions::new().split_values(true));
    log::info!("vary: {:?}", response.get("vary"));

    // request metadata from a plain object
    let metadata = serde_json::json!({
        "Content-Type": "application/grpc-web+proto",
        "X-Grpc-Web": "1",
        "X-Tags": ["a", "b"],
    });
    let mut request = match metadata.as_object() {
        Some(object) => HeaderMultiMap::from_init(object, HeaderOptions::new()),
        None => HeaderMultiMap::new(),
    };
    request.append("x-user-agent", "grpc-web-rust/0.1");
    request.delete_value("x-tags", "a");

    let native: http::HeaderMap = request.to_native(&HttpPlatform)?;
    for (name, value) in &native {
        log::info!("{name}: {value:?}");
    }

    if let Err(err) = request.to_native(&Unsupported) {
        log::warn!("{err}");
    }

    println!("{request}");
    Ok(())
}
