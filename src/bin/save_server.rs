//! Remote save endpoint
//!
//! Usage: `save_server [addr] [save_file]`
//! (defaults: `127.0.0.1:8000`, `save.json`)

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);
    native::init_logging();

    let mut args = std::env::args().skip(1);
    let addr = args.next().unwrap_or_else(|| "127.0.0.1:8000".to_string());
    let save_file = std::path::PathBuf::from(args.next().unwrap_or_else(|| "save.json".to_string()));

    if let Err(e) = native::serve(&addr, save_file) {
        tracing::error!("Save server stopped: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use planetes::server::SaveRegistry;
    use std::io::Read;
    use std::path::PathBuf;
    use tracing::{info, warn};
    use tracing_subscriber::EnvFilter;

    pub fn init_logging() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    pub fn serve(addr: &str, save_file: PathBuf) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let server = tiny_http::Server::http(addr)?;
        info!("Save server listening on http://{}/save", addr);

        let mut registry = SaveRegistry::new(Some(save_file));
        for mut request in server.incoming_requests() {
            let mut body = String::new();
            if let Err(e) = request.as_reader().read_to_string(&mut body) {
                warn!("Unreadable request body: {}", e);
            }
            let method = request.method().as_str().to_string();
            let url = request.url().to_string();
            let reply = registry.handle(&method, &url, &body);
            info!("{} {} -> {}", method, url, reply.status);

            let mut response = tiny_http::Response::from_string(reply.body).with_status_code(reply.status);
            if let Ok(header) = tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
                response.add_header(header);
            }
            if let Err(e) = request.respond(response) {
                warn!("Failed to send response: {}", e);
            }
        }
        Ok(())
    }
}
