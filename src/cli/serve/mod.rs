//! Local server for the published output.
//!
//! Every request goes through [`AssetRouter`] backed by a [`DirStore`] over
//! the output directory, so local serving follows the same fallback chain
//! and header policy as the hosting layer.

mod lifecycle;
mod response;

use crate::{
    asset::{AssetRouter, AssetStore, DirStore, HeaderRules},
    config::SiteConfig,
    core::is_shutdown,
    debug, log,
};
use anyhow::{Context, Result};
use rayon::ThreadPool;
use std::sync::Arc;
use tiny_http::{Request, Server};

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
    router: Arc<AssetRouter<DirStore>>,
    threads: usize,
}

/// Open the output directory and bind the HTTP server.
pub fn bind_server(config: &SiteConfig) -> Result<BoundServer> {
    let store = DirStore::new(&config.build.output, HeaderRules::from_config(config))
        .context("nothing to serve, run `aiau build` first")?;
    let router = Arc::new(AssetRouter::new(store, config));

    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    lifecycle::register_server_for_shutdown(&server);

    log!("serve"; "http://{}", addr);
    debug!("serve"; "serving {}", router.store().root().display());

    Ok(BoundServer {
        server,
        router,
        threads: config.serve.threads,
    })
}

impl BoundServer {
    /// Start the request loop (blocking until shutdown).
    pub fn run(self) -> Result<()> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .thread_name(|i| format!("serve-{i}"))
            .build()
            .context("failed to create request thread pool")?;

        serve_requests(&self.server, &self.router, &pool);

        log!("serve"; "stopped");
        Ok(())
    }
}

/// Accept requests until the server is unblocked, then wait for every
/// in-flight response before returning.
fn serve_requests<S: AssetStore>(server: &Server, router: &AssetRouter<S>, pool: &ThreadPool) {
    pool.in_place_scope(|scope| {
        for request in server.incoming_requests() {
            scope.spawn(move |_| {
                if let Err(e) = handle_request(request, router) {
                    log!("serve"; "request error: {e}");
                }
            });
        }
    });
}

/// Bind and serve until Ctrl+C.
pub fn serve_site(config: &SiteConfig) -> Result<()> {
    bind_server(config)?.run()
}

/// Handle a single HTTP request
fn handle_request<S: AssetStore>(request: Request, router: &AssetRouter<S>) -> Result<()> {
    if is_shutdown() {
        return response::respond_unavailable(request, router.security());
    }

    let method = request.method().clone();
    let url = request.url().to_owned();

    if !response::is_allowed_method(&method) {
        debug!("serve"; "{} {} -> 405", method, url);
        return response::respond_method_not_allowed(request, router.security());
    }

    let resolved = router.resolve(&url);
    debug!("serve"; "{} {} -> {} ({})", method, url, resolved.asset.status, resolved.source.as_str());

    response::respond_asset(request, resolved.asset)
}
