//! Offline cache policy for the site's service worker.
//!
//! The worker itself runs in the browser; this module renders it from the
//! configured policy. Routing of the precache list is decided here, the
//! per-request decisions are emitted as constants the handlers read.

use kepailitan_config::schema::OfflineConfig;
use serde::Serialize;
use tracing::debug;

/// Only responses with this status are written to the cache.
pub const STORED_STATUS: u16 = 200;
/// Only same-origin (`basic`) responses are written to the cache.
pub const STORED_TYPE: &str = "basic";

/// How a request is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStrategy {
    /// Try the network, fall back to the cache (CDN assets).
    NetworkFirst,
    /// Serve from cache, fetch and store on a miss.
    CacheFirst,
}

#[derive(Debug, Clone)]
pub struct CachePolicy {
    config: OfflineConfig,
}

impl CachePolicy {
    pub fn new(config: OfflineConfig) -> Self {
        Self { config }
    }

    pub fn cache_name(&self) -> &str {
        &self.config.cache_name
    }

    pub fn strategy_for(&self, url: &str) -> FetchStrategy {
        if self
            .config
            .network_first_hosts
            .iter()
            .any(|host| url.contains(host.as_str()))
        {
            FetchStrategy::NetworkFirst
        } else {
            FetchStrategy::CacheFirst
        }
    }

    /// Precache assets with the given strategy, in configured order.
    pub fn precache_with(&self, strategy: FetchStrategy) -> Vec<&str> {
        self.config
            .precache
            .iter()
            .map(String::as_str)
            .filter(|asset| self.strategy_for(asset) == strategy)
            .collect()
    }

    /// Complete service worker script.
    ///
    /// Cache-first assets are added atomically on install; network-first
    /// (CDN) assets are added one by one and may fail without aborting
    /// the install.
    pub fn service_worker(&self) -> String {
        let mut script = self.constants();
        script.push_str(WORKER_HANDLERS);
        script
    }

    fn constants(&self) -> String {
        let local = self.precache_with(FetchStrategy::CacheFirst);
        let remote = self.precache_with(FetchStrategy::NetworkFirst);
        debug!(local = local.len(), remote = remote.len(), "precache split");

        format!(
            "const CACHE_NAME = {};\n\
             const CACHE_ASSETS = {};\n\
             const CDN_ASSETS = {};\n\
             const NETWORK_FIRST_HOSTS = {};\n\
             const OFFLINE_FALLBACK = {};\n\
             const STORED_STATUS = {STORED_STATUS};\n\
             const STORED_TYPE = {};\n",
            js_literal(&self.config.cache_name),
            js_literal(&local),
            js_literal(&remote),
            js_literal(&self.config.network_first_hosts),
            js_literal(&self.config.offline_fallback),
            js_literal(STORED_TYPE),
        )
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::new(OfflineConfig::default())
    }
}

fn js_literal<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".into())
}

const WORKER_HANDLERS: &str = r#"
self.addEventListener('install', event => {
  event.waitUntil(
    caches.open(CACHE_NAME)
      .then(cache => cache.addAll(CACHE_ASSETS)
        .then(() => Promise.allSettled(CDN_ASSETS.map(url => cache.add(url)))))
      .then(() => self.skipWaiting())
  );
});

self.addEventListener('activate', event => {
  event.waitUntil(
    caches.keys()
      .then(names => Promise.all(
        names.filter(name => name !== CACHE_NAME).map(name => caches.delete(name))
      ))
      .then(() => self.clients.claim())
  );
});

self.addEventListener('fetch', event => {
  const url = event.request.url;
  if (NETWORK_FIRST_HOSTS.some(host => url.includes(host))) {
    event.respondWith(fetch(event.request).catch(() => caches.match(event.request)));
    return;
  }
  event.respondWith(
    caches.match(event.request).then(cached => {
      if (cached) return cached;
      return fetch(event.request)
        .then(response => {
          if (response && response.status === STORED_STATUS && response.type === STORED_TYPE) {
            const copy = response.clone();
            caches.open(CACHE_NAME).then(cache => cache.put(event.request, copy));
          }
          return response;
        })
        .catch(() => {
          if (event.request.mode === 'navigate') return caches.match(OFFLINE_FALLBACK);
        });
    })
  );
});
"#;
