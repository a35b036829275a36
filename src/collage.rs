use std::{future::Future, time::Duration};

use url::Url;

use crate::error::QuizError;

/// Source images stitched into one collage (a 2x2 grid).
pub const TILE_COUNT: usize = 4;

pub trait CollageSource {
    /// Returns an encoded image composed of `count` pictures matching `tag`.
    fn fetch(
        &self,
        tag: &str,
        count: usize,
    ) -> impl Future<Output = Result<Vec<u8>, QuizError>> + Send;
}

/// Client for the image search and compose service.
///
/// Issues `GET {base}?tag=<tag>&count=<count>` and forwards the body as is.
#[derive(Debug, Clone)]
pub struct HttpCollageService {
    client: reqwest::Client,
    base: Url,
}

impl HttpCollageService {
    pub fn new(base: Url, timeout: Duration) -> Result<Self, QuizError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| QuizError::downstream("collage service", e))?;
        Ok(Self { client, base })
    }

    pub(crate) fn request_url(&self, tag: &str, count: usize) -> Url {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .append_pair("tag", tag)
            .append_pair("count", &count.to_string());
        url
    }
}

impl CollageSource for HttpCollageService {
    async fn fetch(&self, tag: &str, count: usize) -> Result<Vec<u8>, QuizError> {
        let url = self.request_url(tag, count);
        log::debug!("Requesting collage: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| QuizError::downstream("collage service", e))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| QuizError::downstream("collage service", e))?;

        if body.is_empty() {
            return Err(QuizError::downstream("collage service", "empty image"));
        }

        Ok(body.to_vec())
    }
}
