use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;

use crate::{
    error::{NetError, NetResult},
    loader::Loader,
    types::{LoadOptions, Loaded, NetOptions, RetryPolicy},
};

/// HTTP loader over reqwest.
///
/// Retries retryable failures (5xx, 429, transport errors) with exponential
/// backoff according to [`NetOptions`]. Anything else is returned to the
/// caller on the first attempt.
#[derive(Clone, Debug)]
pub struct HttpLoader {
    client: reqwest::Client,
    policy: RetryPolicy,
}

impl HttpLoader {
    pub fn new(opts: &NetOptions) -> NetResult<Self> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(opts.request_timeout)
            .build()
            .map_err(|e| NetError::Http(e.to_string()))?;

        Ok(Self {
            client,
            policy: RetryPolicy::from_options(opts),
        })
    }

    async fn get_once(&self, url: &Url, opts: LoadOptions) -> NetResult<Loaded> {
        let mut request = self.client.get(url.clone());
        if opts.no_cache {
            request = request.header("Cache-Control", "no-cache");
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NetError::HttpStatus {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let mime_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_string());

        let data = response.bytes().await?;
        Ok(Loaded { data, mime_type })
    }
}

#[async_trait]
impl Loader for HttpLoader {
    async fn load(&self, url: &Url, opts: LoadOptions) -> NetResult<Loaded> {
        let mut attempt: u32 = 0;

        loop {
            match self.get_once(url, opts).await {
                Ok(loaded) => {
                    debug!(
                        url = %url,
                        bytes = loaded.data.len(),
                        mime = loaded.mime_type.as_deref().unwrap_or("-"),
                        "segue-net: http load done"
                    );
                    return Ok(loaded);
                }
                Err(e) if e.is_retryable() && attempt < self.policy.max_retries => {
                    attempt += 1;
                    let delay = self.policy.delay_for_attempt(attempt);
                    warn!(
                        url = %url,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "segue-net: http load retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    if attempt > 0 {
                        return Err(NetError::RetryExhausted {
                            max_retries: self.policy.max_retries,
                            source: Box::new(e),
                        });
                    }
                    return Err(e);
                }
            }
        }
    }
}
